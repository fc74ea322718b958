//! The Stellar compilation engine.

use super::{
    CompilationOptions, EngineOptions, Error, Expression, ExpressionCache, ExpressionState,
};
use crate::compiler::{CompileError, StackCompiler};
use crate::parser::Node;
use crate::values::Token;
use alloc::sync::Arc;

/// Compiles parse trees into shareable expressions.
///
/// The engine manages:
/// - Runtime configuration (EngineOptions)
/// - A cache of compiled expressions keyed by tree fingerprint
///
/// It holds no resolvers. Those are supplied per execution, which is what
/// lets one cached expression serve every record.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use stellar_core::api::{Engine, ExpressionState};
/// use stellar_core::parser::TreeBuilder;
/// use stellar_core::values::Token;
///
/// let arena = Bump::new();
/// let b = TreeBuilder::new(&arena);
/// let engine = Engine::default();
///
/// let first = engine.compile(b.mul(b.int("6"), b.long("7L"))).unwrap();
/// let second = engine.compile(b.mul(b.int("6"), b.long("7L"))).unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
///
/// let result = first.execute(&ExpressionState::empty()).unwrap();
/// assert_eq!(result, Token::long(42));
/// ```
#[derive(Debug)]
pub struct Engine {
    options: EngineOptions,
    cache: ExpressionCache,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        let cache = ExpressionCache::new(options.cache_capacity);
        Self { options, cache }
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn cache(&self) -> &ExpressionCache {
        &self.cache
    }

    /// Compile a tree with the default compilation options, reusing the
    /// cached expression when a structurally identical tree was compiled
    /// before.
    pub fn compile(&self, node: &Node<'_>) -> Result<Arc<Expression>, CompileError> {
        self.cache.get_or_try_insert_with(node.fingerprint(), || {
            self.compile_uncached(node, &self.options.default_compilation_options)
        })
    }

    /// The cached expression for `node`, if there is one.
    pub fn cached(&self, node: &Node<'_>) -> Option<Arc<Expression>> {
        self.cache.get(node.fingerprint())
    }

    /// Compile a tree with explicit options. The result bypasses the cache,
    /// since cached entries were compiled with the default options.
    pub fn compile_with(
        &self,
        node: &Node<'_>,
        options: &CompilationOptions,
    ) -> Result<Arc<Expression>, CompileError> {
        self.compile_uncached(node, options).map(Arc::new)
    }

    /// Compile (or fetch) and execute in one call.
    pub fn execute(&self, node: &Node<'_>, state: &ExpressionState<'_>) -> Result<Token, Error> {
        let expression = self.compile(node)?;
        Ok(expression.execute(state)?)
    }

    fn compile_uncached(
        &self,
        node: &Node<'_>,
        options: &CompilationOptions,
    ) -> Result<Expression, CompileError> {
        let program = StackCompiler::compile(node, options)?;
        Ok(Expression::new(
            program,
            self.options.default_execution_options.clone(),
        ))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ExecutionOptions;
    use crate::evaluator::EvalError;
    use crate::parser::{ArithmeticOp, NodeKind, TreeBuilder};
    use crate::resolver::MapVariableResolver;
    use bumpalo::Bump;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compile_is_cached_by_text() {
        crate::test_utils::init_test_logging();

        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let engine = Engine::default();

        let first = engine.compile(b.add(b.int("1"), b.int("2"))).unwrap();
        let second = engine.compile(b.add(b.int("1"), b.int("2"))).unwrap();
        let other = engine.compile(b.add(b.int("2"), b.int("1"))).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(engine.cache().len(), 2);
    }

    #[test]
    fn test_grouping_is_not_confused_by_shared_text() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let engine = Engine::default();
        let sub = |left, right| NodeKind::Arithmetic {
            op: ArithmeticOp::Sub,
            left,
            right,
        };
        // A front end that keeps no parentheses in the text hands over the
        // same text for both groupings.
        let one_two = b.node(sub(b.int("1"), b.int("2")), "1 - 2");
        let two_three = b.node(sub(b.int("2"), b.int("3")), "2 - 3");
        let left_first = b.node(sub(one_two, b.int("3")), "1 - 2 - 3");
        let right_first = b.node(sub(b.int("1"), two_three), "1 - 2 - 3");
        let state = ExpressionState::empty();

        assert_eq!(
            engine.compile(left_first).unwrap().execute(&state).unwrap(),
            Token::int(-4)
        );
        assert_eq!(
            engine.compile(right_first).unwrap().execute(&state).unwrap(),
            Token::int(2)
        );
        assert_eq!(engine.cache().len(), 2);
    }

    #[test]
    fn test_literal_kind_is_not_confused_by_shared_text() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let engine = Engine::default();
        let state = ExpressionState::empty();

        let int = engine.compile(b.int("1000")).unwrap();
        let double = engine.compile(b.double("1000")).unwrap();

        assert_eq!(int.execute(&state).unwrap(), Token::int(1000));
        assert_eq!(double.execute(&state).unwrap(), Token::double(1000.0));
        assert!(engine.cached(b.int("1000")).is_some());
        assert_eq!(engine.cache().len(), 2);
    }

    #[test]
    fn test_compile_error_is_not_cached() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let engine = Engine::default();

        let err = engine.compile(b.int("99999999999")).unwrap_err();
        assert!(matches!(err, CompileError::Literal(_)));
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn test_default_execution_options_apply() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let engine = Engine::new(EngineOptions {
            default_execution_options: ExecutionOptions {
                strict_variables: true,
            },
            ..EngineOptions::default()
        });

        let expression = engine.compile(b.variable("missing")).unwrap();
        let state = ExpressionState::empty();

        assert_eq!(
            expression.execute(&state).unwrap_err(),
            EvalError::UnresolvedVariable {
                name: "missing".into()
            }
        );
        let lenient = ExecutionOptions::default();
        assert_eq!(
            expression.execute_with(&state, &lenient).unwrap(),
            Token::null()
        );
    }

    #[test]
    fn test_execute_folds_errors() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let engine = Engine::default();
        let variables = MapVariableResolver::new().with("x", 0);
        let state = ExpressionState::with_variables(&variables);

        let err = engine
            .execute(b.div(b.int("1"), b.variable("x")), &state)
            .unwrap_err();
        assert_eq!(err, Error::Eval(EvalError::DivisionByZero));

        let err = engine
            .execute(b.unrecognized("Lambda", "x -> x"), &state)
            .unwrap_err();
        assert!(err.is_compile());
    }

    #[test]
    fn test_compile_with_bypasses_cache() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let engine = Engine::default();
        let tree = b.add(b.add(b.int("1"), b.int("1")), b.int("1"));

        let err = engine
            .compile_with(tree, &CompilationOptions { max_depth: 2 })
            .unwrap_err();
        assert_eq!(err, CompileError::NestingTooDeep { max_depth: 2 });
        assert!(engine.cache().is_empty());
    }
}
