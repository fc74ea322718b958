//! Callable functions and the contract for looking them up.

use crate::api::Context;
use crate::values::{Kind, Value};
use alloc::sync::Arc;
use core::fmt;
use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

/// A namespace-qualified function name, `NAMESPACE_NAME` or just `NAME`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionName(EcoString);

impl FunctionName {
    pub fn new(namespace: Option<&str>, name: &str) -> Self {
        match namespace {
            Some(namespace) => Self(ecow::eco_format!("{}_{}", namespace, name)),
            None => Self(name.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FunctionName {
    fn from(qualified: &str) -> Self {
        Self(qualified.into())
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors raised while resolving, initializing or applying a function.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum FunctionError {
    #[error("Unable to resolve function `{name}`")]
    #[diagnostic(code(stellar::function::not_found))]
    NotFound { name: EcoString },

    #[error("Function resolver is closed")]
    #[diagnostic(code(stellar::function::closed))]
    Closed,

    #[error("Expected {expected} argument(s), got {actual}")]
    #[diagnostic(code(stellar::function::arity))]
    Arity { expected: EcoString, actual: usize },

    #[error("Argument {position} must be {expected}, got {actual}")]
    #[diagnostic(code(stellar::function::argument_kind))]
    ArgumentKind {
        position: usize,
        expected: &'static str,
        actual: Kind,
    },

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(stellar::function::invalid_argument))]
    InvalidArgument { message: EcoString },

    #[error("Unable to initialize `{name}`: {message}")]
    #[diagnostic(code(stellar::function::initialization))]
    Initialization { name: EcoString, message: EcoString },
}

impl FunctionError {
    /// Fail unless `args.len()` lies in `min..=max`.
    pub fn check_arity(args: &[Value], min: usize, max: usize) -> Result<(), FunctionError> {
        if (min..=max).contains(&args.len()) {
            return Ok(());
        }
        let expected = if min == max {
            ecow::eco_format!("{}", min)
        } else if max == usize::MAX {
            ecow::eco_format!("at least {}", min)
        } else {
            ecow::eco_format!("{} to {}", min, max)
        };
        Err(FunctionError::Arity {
            expected,
            actual: args.len(),
        })
    }

    pub fn argument_kind(position: usize, expected: &'static str, actual: &Value) -> Self {
        FunctionError::ArgumentKind {
            position,
            expected,
            actual: actual.kind(),
        }
    }
}

/// A function callable from Stellar expressions.
///
/// One instance is shared by every execution that resolves it, possibly from
/// several threads at once, so `apply` must not rely on exclusive access.
pub trait StellarFunction: Send + Sync {
    fn apply(&self, args: &[Value], context: &Context) -> Result<Value, FunctionError>;

    /// Called at most once, before the first `apply`.
    fn initialize(&self, context: &Context) -> Result<(), FunctionError> {
        let _ = context;
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        false
    }

    /// Called when the resolver that owns this instance is torn down.
    fn close(&self) {}
}

/// Maps a qualified name to a function instance.
pub trait FunctionResolver: Send + Sync {
    fn resolve(&self, name: &FunctionName) -> Result<Arc<dyn StellarFunction>, FunctionError>;

    /// Release every function instance this resolver handed out.
    fn close(&self) {}
}

/// Resolves nothing; every lookup is `NotFound`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyFunctionResolver;

impl FunctionResolver for EmptyFunctionResolver {
    fn resolve(&self, name: &FunctionName) -> Result<Arc<dyn StellarFunction>, FunctionError> {
        Err(FunctionError::NotFound {
            name: name.as_str().into(),
        })
    }
}
