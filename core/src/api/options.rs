//! Configuration options for the Stellar engine.

/// Configuration options for compilation.
///
/// # Example
///
/// ```
/// use stellar_core::api::CompilationOptions;
///
/// let options = CompilationOptions { max_depth: 200 };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationOptions {
    /// Maximum nesting depth of the parse tree (for recursion protection).
    ///
    /// Default: 1000
    pub max_depth: usize,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self { max_depth: 1000 }
    }
}

/// Configuration options for expression execution.
///
/// # Example
///
/// ```
/// use stellar_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions {
///     strict_variables: true,
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Fail with `UnresolvedVariable` when a variable is absent, instead of
    /// evaluating it to null.
    ///
    /// Default: false
    pub strict_variables: bool,
}

/// Configuration options for the Stellar engine.
///
/// These options set the defaults for compilation and execution,
/// which can be overridden on a per-call basis.
///
/// # Example
///
/// ```
/// use stellar_core::api::{CompilationOptions, EngineOptions, ExecutionOptions};
///
/// let options = EngineOptions {
///     default_compilation_options: CompilationOptions::default(),
///     default_execution_options: ExecutionOptions {
///         strict_variables: true,
///     },
///     cache_capacity: 1024,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Default options for compilation.
    pub default_compilation_options: CompilationOptions,

    /// Default options for execution.
    ///
    /// These can be overridden when calling `Expression::execute_with()`.
    pub default_execution_options: ExecutionOptions,

    /// Number of compiled expressions the engine keeps, keyed by tree fingerprint.
    /// Zero disables caching.
    ///
    /// Default: 10000
    pub cache_capacity: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            default_compilation_options: CompilationOptions::default(),
            default_execution_options: ExecutionOptions::default(),
            cache_capacity: 10_000,
        }
    }
}
