use crate::values::Value;
use ecow::EcoString;
use hashbrown::HashMap;

/// Looks up the current value of a variable.
///
/// Resolvers are scoped to the record being evaluated. `None` means the
/// variable is absent, which is different from a variable bound to
/// `Value::Null`.
pub trait VariableResolver {
    fn resolve(&self, name: &str) -> Option<Value>;

    fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }
}

/// Resolver over a map of bindings.
#[derive(Debug, Default, Clone)]
pub struct MapVariableResolver {
    variables: HashMap<EcoString, Value>,
}

impl MapVariableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, builder style.
    pub fn with(mut self, name: impl Into<EcoString>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<EcoString>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<N: Into<EcoString>, V: Into<Value>> FromIterator<(N, V)> for MapVariableResolver {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let variables = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self { variables }
    }
}

impl VariableResolver for MapVariableResolver {
    fn resolve(&self, name: &str) -> Option<Value> {
        self.variables.get(name).cloned()
    }

    fn exists(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }
}

/// Resolves every name as absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyVariableResolver;

impl VariableResolver for EmptyVariableResolver {
    fn resolve(&self, _name: &str) -> Option<Value> {
        None
    }
}

impl<F> VariableResolver for F
where
    F: Fn(&str) -> Option<Value>,
{
    fn resolve(&self, name: &str) -> Option<Value> {
        self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_absent_is_not_null() {
        let resolver = MapVariableResolver::new().with("present", Value::Null);
        assert_eq!(resolver.resolve("present"), Some(Value::Null));
        assert!(resolver.exists("present"));
        assert_eq!(resolver.resolve("absent"), None);
        assert!(!resolver.exists("absent"));
    }

    #[test]
    fn test_from_iterator() {
        let resolver: MapVariableResolver = [("x", 1), ("y", 2)].into_iter().collect();
        assert_eq!(resolver.len(), 2);
        assert_eq!(resolver.resolve("y"), Some(Value::Int(2)));
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |name: &str| (name == "x").then(|| Value::Long(5));
        assert_eq!(resolver.resolve("x"), Some(Value::Long(5)));
        assert!(!resolver.exists("y"));
    }
}
