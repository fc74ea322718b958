//! Public API for the Stellar expression core.
//!
//! Compilation and execution are separate steps:
//!
//! 1. **Compile**: an [`Engine`] turns a parse tree into an [`Expression`]
//!    once and caches it by tree fingerprint.
//! 2. **Execute**: the expression runs against an [`ExpressionState`] built
//!    per record, holding the variables, functions and [`Context`].
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use stellar_core::api::{Context, Engine, ExpressionState};
//! use stellar_core::parser::TreeBuilder;
//! use stellar_core::resolver::{FunctionRegistry, MapVariableResolver};
//! use stellar_core::values::Token;
//!
//! let arena = Bump::new();
//! let b = TreeBuilder::new(&arena);
//! let engine = Engine::default();
//! let expr = engine
//!     .compile(b.call(None, "LENGTH", &[b.variable("name")]))
//!     .unwrap();
//!
//! let context = Context::new();
//! let functions = FunctionRegistry::with_stdlib();
//! let variables = MapVariableResolver::new().with("name", "stellar");
//! let state = ExpressionState::new(&context, &variables, &functions);
//!
//! assert_eq!(expr.execute(&state).unwrap(), Token::int(7));
//! ```

pub mod cache;
pub mod context;
pub mod engine;
pub mod error;
pub mod expression;
pub mod options;
pub mod state;

pub use cache::ExpressionCache;
pub use context::{Capability, Context, GlobalConfig};
pub use engine::Engine;
pub use error::Error;
pub use expression::Expression;
pub use options::{CompilationOptions, EngineOptions, ExecutionOptions};
pub use state::ExpressionState;
