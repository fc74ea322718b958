//! Compiled Stellar expressions.

use super::{ExecutionOptions, ExpressionState};
use crate::evaluator::EvalError;
use crate::values::Token;
use crate::vm::{Program, VM};
use core::fmt;
use static_assertions::assert_impl_all;

/// A compiled expression ready for execution.
///
/// An expression owns its program and nothing else. Variables, functions and
/// context arrive with each call through an [`ExpressionState`], so one
/// expression can be executed against any number of records, from any
/// number of threads, without synchronization.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use stellar_core::api::{Engine, ExpressionState};
/// use stellar_core::parser::TreeBuilder;
/// use stellar_core::resolver::MapVariableResolver;
/// use stellar_core::values::Token;
///
/// let arena = Bump::new();
/// let b = TreeBuilder::new(&arena);
/// let engine = Engine::default();
/// let expr = engine.compile(b.add(b.variable("x"), b.int("1"))).unwrap();
///
/// let variables = MapVariableResolver::new().with("x", 41);
/// let result = expr.execute(&ExpressionState::with_variables(&variables)).unwrap();
/// assert_eq!(result, Token::int(42));
/// ```
#[derive(Clone, PartialEq)]
pub struct Expression {
    program: Program,
    default_options: ExecutionOptions,
}

assert_impl_all!(Expression: Send, Sync);

impl Expression {
    pub(crate) fn new(program: Program, default_options: ExecutionOptions) -> Self {
        Self {
            program,
            default_options,
        }
    }

    /// The source text the expression was compiled from.
    pub fn source(&self) -> &str {
        &self.program.source
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Execute with the options the expression was compiled under.
    pub fn execute(&self, state: &ExpressionState<'_>) -> Result<Token, EvalError> {
        self.execute_with(state, &self.default_options)
    }

    /// Execute with explicit options.
    pub fn execute_with(
        &self,
        state: &ExpressionState<'_>,
        options: &ExecutionOptions,
    ) -> Result<Token, EvalError> {
        VM::new(&self.program, state, options).run()
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expression")
            .field("source", &self.source())
            .field("instructions", &self.program.instructions.len())
            .finish()
    }
}
