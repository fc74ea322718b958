//! Compilation errors.

use crate::evaluator::LiteralError;
use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while compiling a parse tree.
///
/// All of them are fatal to the compile; nothing is emitted for a tree that
/// fails.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum CompileError {
    /// The tree holds a node kind the compiler has no translation for.
    #[error("Unsupported syntax `{rule}` in `{text}`")]
    #[diagnostic(code(stellar::compile::unsupported_syntax))]
    UnsupportedSyntax { rule: EcoString, text: EcoString },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Literal(#[from] LiteralError),

    #[error("Expression nests deeper than {max_depth} levels")]
    #[diagnostic(
        code(stellar::compile::nesting_too_deep),
        help("raise `CompilationOptions::max_depth` or simplify the expression")
    )]
    NestingTooDeep { max_depth: usize },
}
