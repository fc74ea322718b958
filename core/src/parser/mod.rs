//! Parse-tree contract between the grammar front end and the compiler.
//!
//! Turning source text into a tree is the job of an external parser. This
//! module only defines the closed set of node kinds the compiler understands,
//! the operator tags attached to them, and a builder for allocating trees in a
//! `bumpalo` arena.

mod builder;
mod parse_tree;
mod syntax;

pub use builder::TreeBuilder;
pub use parse_tree::{LiteralKind, Node, NodeKind};
pub use syntax::{ArithmeticOp, ComparisonOp, LogicalOp};
