//! Stack program compiler for Stellar expressions.
//!
//! This module transforms a parse tree into a flat list of VM instructions.
//!
//! ## Design
//!
//! - Single post-order walk, emitting an instruction as each node is exited
//! - Literal tokens are evaluated at compile time; operators, variable loads
//!   and function calls are deferred to the VM
//! - Tracks stack depth precisely to record `max_stack_size`
//! - Bounds the nesting depth so deep trees fail cleanly

mod error;
mod stack_compiler;


pub use error::CompileError;
pub use stack_compiler::StackCompiler;
