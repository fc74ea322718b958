//! Stellar - An expression evaluation core for streaming records
//!
//! # Overview
//!
//! Stellar evaluates small expressions over individual records flowing
//! through a pipeline: enrichment rules, threat triage, field validation.
//! An external parser turns the text into a tree; this crate compiles the
//! tree once into a stack program and executes it any number of times, each
//! run against one record's variables.
//!
//! # Quick Start
//!
//! ```
//! use stellar::{Bump, Context, Engine, ExpressionState, FunctionRegistry, MapVariableResolver,
//!     Token, TreeBuilder};
//!
//! // The parser allocates trees in an arena
//! let arena = Bump::new();
//! let b = TreeBuilder::new(&arena);
//! let tree = b.comparison(">", b.call(None, "LENGTH", &[b.variable("domain")]), b.int("10"));
//!
//! // Compile once
//! let engine = Engine::default();
//! let expr = engine.compile(tree).unwrap();
//!
//! // Execute per record
//! let context = Context::new();
//! let functions = FunctionRegistry::with_stdlib();
//! let record = MapVariableResolver::new().with("domain", "very-long-domain.example");
//! let state = ExpressionState::new(&context, &record, &functions);
//! assert_eq!(expr.execute(&state).unwrap(), Token::boolean(true));
//! ```
//!
//! # Custom Functions
//!
//! Implement [`StellarFunction`] and register it with a constructor:
//!
//! ```
//! use stellar::{Context, FunctionError, FunctionInfo, FunctionRegistry, StellarFunction, Value};
//!
//! struct Double;
//!
//! impl StellarFunction for Double {
//!     fn apply(&self, args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
//!         FunctionError::check_arity(args, 1, 1)?;
//!         match &args[0] {
//!             Value::Int(v) => Ok(Value::Int(v.wrapping_mul(2))),
//!             other => Err(FunctionError::argument_kind(0, "an Integer", other)),
//!         }
//!     }
//! }
//!
//! let mut builder = FunctionRegistry::builder();
//! builder.register(FunctionInfo::new("DOUBLE", "Doubles an Integer"), || Double);
//! let functions = builder.build();
//! ```

mod error_renderer;

pub use error_renderer::{render_error, render_error_to, render_error_to_string,
    render_error_to_string_no_color};

// Re-export public API from stellar_core
pub use stellar_core::api::{
    Capability, CompilationOptions, Context, Engine, EngineOptions, Error, ExecutionOptions,
    Expression, ExpressionCache, ExpressionState, GlobalConfig,
};

// Re-export the tree the parser hands over
pub use bumpalo::Bump;
pub use stellar_core::parser::{self, ArithmeticOp, LogicalOp, Node, NodeKind, TreeBuilder};

// Re-export values and resolvers
pub use stellar_core::resolver::{
    self, FunctionError, FunctionInfo, FunctionName, FunctionRegistry, FunctionResolver,
    MapVariableResolver, StellarFunction, VariableResolver,
};
pub use stellar_core::stdlib;
pub use stellar_core::values::{self, Kind, OpaqueValue, Token, Value};

// Re-export errors
pub use stellar_core::compiler::CompileError;
pub use stellar_core::evaluator::{EvalError, LiteralError};
