//! Public error type for the Stellar API.
//!
//! Internal errors keep their own types; the API boundary folds them into
//! [`Error`] so callers match on one enum. Every variant forwards its
//! `miette` diagnostic, so codes and help text survive the conversion.

use crate::compiler::CompileError;
use crate::evaluator::EvalError;
use miette::Diagnostic;
use thiserror::Error;

/// Public error type for all Stellar operations.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum Error {
    /// The parse tree could not be compiled. Nothing was cached.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(#[from] CompileError),

    /// Execution failed for one record. The expression stays usable.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    pub fn is_compile(&self) -> bool {
        matches!(self, Error::Compile(_))
    }

    pub fn is_eval(&self) -> bool {
        matches!(self, Error::Eval(_))
    }
}
