//! Explicit function registration.
//!
//! Functions are registered by name once, at process start, with a
//! constructor. The registry builds and initializes an instance the first
//! time a name is resolved and hands the same instance to every later caller.

use crate::Box;
use crate::api::Context;
use crate::resolver::{FunctionError, FunctionName, FunctionResolver, StellarFunction};
use crate::{ToString, Vec};
use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering, fence};
use hashbrown::HashMap;
use once_cell::sync::OnceCell;
use tracing::debug;

/// Descriptive metadata of a registered function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub namespace: Option<&'static str>,
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [&'static str],
    pub returns: &'static str,
}

impl FunctionInfo {
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            namespace: None,
            name,
            description,
            params: &[],
            returns: "",
        }
    }

    pub const fn namespace(mut self, namespace: &'static str) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub const fn params(mut self, params: &'static [&'static str]) -> Self {
        self.params = params;
        self
    }

    pub const fn returns(mut self, returns: &'static str) -> Self {
        self.returns = returns;
        self
    }

    pub fn function_name(&self) -> FunctionName {
        FunctionName::new(self.namespace, self.name)
    }
}

type Constructor = Box<dyn Fn() -> Arc<dyn StellarFunction> + Send + Sync>;

struct Entry {
    info: FunctionInfo,
    construct: Constructor,
    instance: OnceCell<Arc<dyn StellarFunction>>,
    /// Set once the instance's `close` hook has run.
    closed: AtomicBool,
}

/// Collects registrations before the registry is frozen.
#[derive(Default)]
pub struct FunctionRegistryBuilder {
    entries: HashMap<FunctionName, Entry>,
    context: Context,
}

impl FunctionRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context handed to each function's `initialize` hook.
    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Register a function. A later registration under the same name replaces
    /// the earlier one.
    pub fn register<F, C>(&mut self, info: FunctionInfo, construct: C) -> &mut Self
    where
        F: StellarFunction + 'static,
        C: Fn() -> F + Send + Sync + 'static,
    {
        let name = info.function_name();
        let entry = Entry {
            info,
            construct: Box::new(move || Arc::new(construct()) as Arc<dyn StellarFunction>),
            instance: OnceCell::new(),
            closed: AtomicBool::new(false),
        };
        if self.entries.insert(name.clone(), entry).is_some() {
            debug!(function = %name, "Replacing registered function");
        }
        self
    }

    pub fn build(self) -> FunctionRegistry {
        FunctionRegistry {
            entries: self.entries,
            context: self.context,
            closed: AtomicBool::new(false),
        }
    }
}

/// Function resolver backed by an explicit registration table.
///
/// Instances are created lazily, at most once per registry, even when several
/// threads resolve the same name concurrently.
pub struct FunctionRegistry {
    entries: HashMap<FunctionName, Entry>,
    context: Context,
    closed: AtomicBool,
}

impl FunctionRegistry {
    pub fn builder() -> FunctionRegistryBuilder {
        FunctionRegistryBuilder::new()
    }

    /// A registry holding every standard function.
    pub fn with_stdlib() -> Self {
        let mut builder = Self::builder();
        crate::stdlib::register_stdlib(&mut builder);
        builder.build()
    }

    pub fn info(&self, name: &FunctionName) -> Option<&FunctionInfo> {
        self.entries.get(name).map(|entry| &entry.info)
    }

    /// Metadata of every registered function, sorted by qualified name.
    pub fn functions(&self) -> Vec<&FunctionInfo> {
        let mut infos: Vec<&FunctionInfo> = self.entries.values().map(|e| &e.info).collect();
        infos.sort_by_key(|info| info.function_name());
        infos
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Run the instance's `close` hook, at most once per entry.
    fn close_instance(name: &FunctionName, entry: &Entry) {
        let Some(function) = entry.instance.get() else {
            return;
        };
        if !entry.closed.swap(true, Ordering::AcqRel) {
            debug!(function = %name, "Closing function");
            function.close();
        }
    }
}

impl FunctionResolver for FunctionRegistry {
    fn resolve(&self, name: &FunctionName) -> Result<Arc<dyn StellarFunction>, FunctionError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(FunctionError::Closed);
        }
        let entry = self.entries.get(name).ok_or_else(|| FunctionError::NotFound {
            name: name.as_str().into(),
        })?;
        let function = entry.instance.get_or_try_init(|| {
            let function = (entry.construct)();
            if !function.is_initialized() {
                function
                    .initialize(&self.context)
                    .map_err(|e| match e {
                        FunctionError::Initialization { .. } => e,
                        other => FunctionError::Initialization {
                            name: name.as_str().into(),
                            message: other.to_string().into(),
                        },
                    })?;
            }
            debug!(function = %name, "Initialized function");
            Ok::<_, FunctionError>(function)
        })?;
        // Pairs with the fence in `close`: either `close` sees this instance
        // or this load sees the registry closed.
        fence(Ordering::SeqCst);
        if self.closed.load(Ordering::Relaxed) {
            Self::close_instance(name, entry);
            return Err(FunctionError::Closed);
        }
        Ok(Arc::clone(function))
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        fence(Ordering::SeqCst);
        for (name, entry) in &self.entries {
            Self::close_instance(name, entry);
        }
    }
}

impl Drop for FunctionRegistry {
    fn drop(&mut self) {
        FunctionResolver::close(self);
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.functions())
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Value;
    use core::sync::atomic::AtomicUsize;
    use pretty_assertions::assert_eq;
    use std::sync::Barrier;

    /// Counts lifecycle calls through shared counters.
    struct Lifecycle {
        initialized: Arc<AtomicUsize>,
        closed: Arc<AtomicUsize>,
    }

    impl StellarFunction for Lifecycle {
        fn apply(&self, args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
            Ok(Value::Int(args.len() as i32))
        }

        fn initialize(&self, _context: &Context) -> Result<(), FunctionError> {
            self.initialized.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn close(&self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counting_registry() -> (FunctionRegistry, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let initialized = Arc::new(AtomicUsize::new(0));
        let closed = Arc::new(AtomicUsize::new(0));
        let mut builder = FunctionRegistry::builder();
        let (i, c) = (initialized.clone(), closed.clone());
        builder.register(
            FunctionInfo::new("COUNT", "Counts its arguments").namespace("TEST"),
            move || Lifecycle {
                initialized: i.clone(),
                closed: c.clone(),
            },
        );
        (builder.build(), initialized, closed)
    }

    #[test]
    fn test_lazy_single_initialization() {
        let (registry, initialized, _) = counting_registry();
        assert_eq!(initialized.load(Ordering::SeqCst), 0);

        let name = FunctionName::from("TEST_COUNT");
        let first = registry.resolve(&name).unwrap();
        let second = registry.resolve(&name).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(initialized.load(Ordering::SeqCst), 1);
        assert_eq!(
            first.apply(&[Value::Null, Value::Null], registry.context()),
            Ok(Value::Int(2))
        );
    }

    #[test]
    fn test_concurrent_resolution_initializes_once() {
        let (registry, initialized, _) = counting_registry();
        let name = FunctionName::from("TEST_COUNT");
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| registry.resolve(&name).map(|_| ()));
            }
        });
        assert_eq!(initialized.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_function() {
        let (registry, _, _) = counting_registry();
        let err = registry
            .resolve(&FunctionName::from("NOPE"))
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Unable to resolve function `NOPE`");
    }

    #[test]
    fn test_close_runs_once_for_initialized_functions() {
        let (registry, _, closed) = counting_registry();
        registry.close();
        assert_eq!(closed.load(Ordering::SeqCst), 0);

        let (registry, _, closed) = counting_registry();
        registry.resolve(&FunctionName::from("TEST_COUNT")).unwrap();
        registry.close();
        registry.close();
        assert_eq!(closed.load(Ordering::SeqCst), 1);
        assert_eq!(
            registry.resolve(&FunctionName::from("TEST_COUNT")).err(),
            Some(FunctionError::Closed)
        );
        drop(registry);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    /// Blocks inside `initialize` until the test releases it.
    struct Gated {
        entered: Arc<Barrier>,
        release: Arc<Barrier>,
        closed: Arc<AtomicUsize>,
    }

    impl StellarFunction for Gated {
        fn apply(&self, _args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
            Ok(Value::Null)
        }

        fn initialize(&self, _context: &Context) -> Result<(), FunctionError> {
            self.entered.wait();
            self.release.wait();
            Ok(())
        }

        fn close(&self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_close_during_initialization_still_closes() {
        let entered = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));
        let closed = Arc::new(AtomicUsize::new(0));
        let mut builder = FunctionRegistry::builder();
        let (e, r, c) = (entered.clone(), release.clone(), closed.clone());
        builder.register(FunctionInfo::new("GATED", "Waits to initialize"), move || Gated {
            entered: e.clone(),
            release: r.clone(),
            closed: c.clone(),
        });
        let registry = builder.build();

        let result = std::thread::scope(|s| {
            let resolving = s.spawn(|| registry.resolve(&FunctionName::from("GATED")).err());
            entered.wait();
            registry.close();
            release.wait();
            resolving.join().unwrap()
        });

        assert_eq!(result, Some(FunctionError::Closed));
        assert_eq!(closed.load(Ordering::SeqCst), 1);
        drop(registry);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_closes() {
        let (registry, _, closed) = counting_registry();
        registry.resolve(&FunctionName::from("TEST_COUNT")).unwrap();
        drop(registry);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_function_listing() {
        let (registry, _, _) = counting_registry();
        let names: Vec<FunctionName> = registry
            .functions()
            .iter()
            .map(|info| info.function_name())
            .collect();
        assert_eq!(names, [FunctionName::from("TEST_COUNT")]);
    }
}
