//! Evaluation errors.
//!
//! Literal errors surface while compiling, because literal tokens are built
//! ahead of time. Everything else surfaces while a program runs. None of these
//! are retried; the caller decides whether to skip the record or give up.

use crate::resolver::FunctionError;
use crate::values::Kind;
use crate::parser::{ComparisonOp, LiteralKind};
use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

/// A number literal that could not be turned into a token.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum LiteralError {
    /// A literal evaluator was handed a node it does not handle. This means
    /// the compiler dispatched to the wrong evaluator.
    #[error("Unsupported literal node kind: {kind}")]
    #[diagnostic(code(stellar::eval::unsupported_literal))]
    UnsupportedLiteral { kind: EcoString },

    #[error("Invalid {kind} `{text}`")]
    #[diagnostic(
        code(stellar::eval::invalid_literal),
        help("number literals may end in one of l, L, f, F, d or D")
    )]
    InvalidLiteral { kind: LiteralKind, text: EcoString },
}

/// Error raised while executing a compiled program.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum EvalError {
    #[error("Unsupported operand kinds for `{operator}`: {left} and {right}")]
    #[diagnostic(code(stellar::eval::unsupported_operand))]
    UnsupportedOperand {
        operator: &'static str,
        left: Kind,
        right: Kind,
    },

    #[error("Unsupported operand kind for `{operator}`: {operand}")]
    #[diagnostic(code(stellar::eval::unsupported_operand))]
    UnsupportedUnaryOperand {
        operator: &'static str,
        operand: Kind,
    },

    #[error("Unsupported comparison: {left} {operator} {right} in `{expression}`")]
    #[diagnostic(
        code(stellar::eval::unsupported_comparison),
        help("only numbers, strings and booleans have an ordering, and only among themselves")
    )]
    UnsupportedComparison {
        left: Kind,
        right: Kind,
        operator: ComparisonOp,
        expression: EcoString,
    },

    #[error("Unsupported operations. The following expression is invalid: {expression}")]
    #[diagnostic(code(stellar::eval::unsupported_operation))]
    UnsupportedOperation { expression: EcoString },

    #[error("Division by zero")]
    #[diagnostic(code(stellar::eval::division_by_zero))]
    DivisionByZero,

    #[error("Unable to resolve variable `{name}`")]
    #[diagnostic(
        code(stellar::eval::unresolved_variable),
        help("absent variables evaluate to null unless strict variable resolution is enabled")
    )]
    UnresolvedVariable { name: EcoString },

    #[error("Function `{function}` failed")]
    #[diagnostic(code(stellar::eval::function))]
    Function {
        function: EcoString,
        #[source]
        source: FunctionError,
    },

    /// The program left the operand stack in an impossible state. This is a
    /// compiler defect, never a problem with the input record.
    #[error("Invalid program: {message}")]
    #[diagnostic(code(stellar::eval::invalid_program))]
    InvalidProgram { message: EcoString },
}
