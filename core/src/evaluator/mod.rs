//! Operator semantics for Stellar tokens.
//!
//! ## Design Principles
//!
//! - **Promotion by declared kind**: binary numeric operations promote both
//!   operands along Integer < Long < Float < Double, using each token's
//!   declared kind.
//! - **Explicit null policy**: equality, ordering and arithmetic each state
//!   what a null operand means; a null is never an error by itself.
//! - **Never panic**: integer arithmetic wraps, division by zero is an error.
//!
//! ## Example
//!
//! ```ignore
//! use stellar_core::evaluator::{ComparisonContext, ComparisonDispatcher};
//! use stellar_core::parser::ComparisonOp;
//! use stellar_core::values::Token;
//!
//! let context = ComparisonContext::new(ComparisonOp::Lt, "1 < 1.5");
//! let result = ComparisonDispatcher::new()
//!     .evaluate(&Token::int(1), &Token::double(1.5), &context)?;
//! assert_eq!(result, Token::boolean(true));
//! ```

mod comparison;
mod error;
mod literals;
mod operators;


pub use comparison::{
    ComparisonContext, ComparisonDispatcher, ComparisonEvaluator, EqualityEvaluator,
    OrderingEvaluator,
};
pub use error::{EvalError, LiteralError};
pub use literals::{
    DoubleLiteralEvaluator, FloatLiteralEvaluator, IntLiteralEvaluator, LiteralTable,
    LongLiteralEvaluator, NUMBER_LITERALS, NumberEvaluator, evaluate_literal, evaluate_with,
};
pub use operators::{eval_arithmetic, eval_logical, eval_not};
