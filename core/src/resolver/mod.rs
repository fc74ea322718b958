//! Runtime lookup of variables and functions.
//!
//! Compiled programs never capture bindings; every variable load and every
//! function call goes through the resolvers of the current execution.

mod functions;
mod registry;
mod variables;

pub use functions::{
    EmptyFunctionResolver, FunctionError, FunctionName, FunctionResolver, StellarFunction,
};
pub use registry::{FunctionInfo, FunctionRegistry, FunctionRegistryBuilder};
pub use variables::{EmptyVariableResolver, MapVariableResolver, VariableResolver};
