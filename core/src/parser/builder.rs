//! Arena-backed construction of parse trees.
//!
//! The grammar front end lives outside this crate; it builds trees with
//! `TreeBuilder` so that every node and every span of source text lives in the
//! same `Bump`. Tests use it the same way.
//!
//! ```ignore
//! let arena = Bump::new();
//! let b = TreeBuilder::new(&arena);
//! let tree = b.comparison("<", b.variable("x"), b.long("10L"));
//! assert_eq!(tree.text, "x < 10L");
//! ```

use crate::parser::{ArithmeticOp, LogicalOp, Node, NodeKind};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use bumpalo::Bump;

#[derive(Clone, Copy)]
pub struct TreeBuilder<'a> {
    arena: &'a Bump,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self { arena }
    }

    pub fn arena(&self) -> &'a Bump {
        self.arena
    }

    fn intern(&self, s: &str) -> &'a str {
        self.arena.alloc_str(s)
    }

    /// Text of `left op right`, with binary children wrapped in parentheses so
    /// that differently grouped trees never share source text.
    fn binary_text(left: &Node<'_>, op: impl core::fmt::Display, right: &Node<'_>) -> String {
        format!("{} {} {}", grouped(left), op, grouped(right))
    }

    /// Allocate a node with explicit source text.
    pub fn node(&self, kind: NodeKind<'a>, text: &str) -> &'a Node<'a> {
        let text = self.intern(text);
        self.arena.alloc(Node { kind, text })
    }

    pub fn int(&self, text: &str) -> &'a Node<'a> {
        self.node(NodeKind::IntLiteral, text)
    }

    pub fn long(&self, text: &str) -> &'a Node<'a> {
        self.node(NodeKind::LongLiteral, text)
    }

    pub fn float(&self, text: &str) -> &'a Node<'a> {
        self.node(NodeKind::FloatLiteral, text)
    }

    pub fn double(&self, text: &str) -> &'a Node<'a> {
        self.node(NodeKind::DoubleLiteral, text)
    }

    pub fn string(&self, value: &str) -> &'a Node<'a> {
        let value = self.intern(value);
        let text = format!("'{}'", value);
        self.node(NodeKind::StringLiteral(value), &text)
    }

    pub fn boolean(&self, value: bool) -> &'a Node<'a> {
        self.node(NodeKind::BooleanLiteral(value), if value { "true" } else { "false" })
    }

    pub fn null(&self) -> &'a Node<'a> {
        self.node(NodeKind::NullLiteral, "null")
    }

    pub fn arithmetic(
        &self,
        op: ArithmeticOp,
        left: &'a Node<'a>,
        right: &'a Node<'a>,
    ) -> &'a Node<'a> {
        let text = Self::binary_text(left, op, right);
        self.node(NodeKind::Arithmetic { op, left, right }, &text)
    }

    pub fn add(&self, left: &'a Node<'a>, right: &'a Node<'a>) -> &'a Node<'a> {
        self.arithmetic(ArithmeticOp::Add, left, right)
    }

    pub fn sub(&self, left: &'a Node<'a>, right: &'a Node<'a>) -> &'a Node<'a> {
        self.arithmetic(ArithmeticOp::Sub, left, right)
    }

    pub fn mul(&self, left: &'a Node<'a>, right: &'a Node<'a>) -> &'a Node<'a> {
        self.arithmetic(ArithmeticOp::Mul, left, right)
    }

    pub fn div(&self, left: &'a Node<'a>, right: &'a Node<'a>) -> &'a Node<'a> {
        self.arithmetic(ArithmeticOp::Div, left, right)
    }

    pub fn comparison(&self, op: &str, left: &'a Node<'a>, right: &'a Node<'a>) -> &'a Node<'a> {
        let op = self.intern(op);
        let text = Self::binary_text(left, op, right);
        self.node(NodeKind::Comparison { op, left, right }, &text)
    }

    pub fn logical(&self, op: LogicalOp, left: &'a Node<'a>, right: &'a Node<'a>) -> &'a Node<'a> {
        let text = Self::binary_text(left, op, right);
        self.node(NodeKind::Logical { op, left, right }, &text)
    }

    pub fn not(&self, operand: &'a Node<'a>) -> &'a Node<'a> {
        let text = format!("not({})", operand.text);
        self.node(NodeKind::Not(operand), &text)
    }

    pub fn variable(&self, name: &str) -> &'a Node<'a> {
        let name = self.intern(name);
        self.node(NodeKind::Variable(name), name)
    }

    pub fn call(
        &self,
        namespace: Option<&str>,
        name: &str,
        args: &[&'a Node<'a>],
    ) -> &'a Node<'a> {
        let namespace = namespace.map(|ns| self.intern(ns));
        let name = self.intern(name);
        let args = self.arena.alloc_slice_copy(args);
        let joined: Vec<&str> = args.iter().map(|arg| arg.text).collect();
        let text = match namespace {
            Some(ns) => format!("{}_{}({})", ns, name, joined.join(", ")),
            None => format!("{}({})", name, joined.join(", ")),
        };
        self.node(
            NodeKind::FunctionCall {
                namespace,
                name,
                args,
            },
            &text,
        )
    }

    pub fn list(&self, items: &[&'a Node<'a>]) -> &'a Node<'a> {
        let items = self.arena.alloc_slice_copy(items);
        let joined: Vec<&str> = items.iter().map(|item| item.text).collect();
        let text = format!("[{}]", joined.join(", "));
        self.node(NodeKind::List(items), &text)
    }

    pub fn map(&self, entries: &[(&'a Node<'a>, &'a Node<'a>)]) -> &'a Node<'a> {
        let entries = self.arena.alloc_slice_copy(entries);
        let joined: Vec<String> = entries
            .iter()
            .map(|(key, value)| format!("{} : {}", key.text, value.text))
            .collect();
        let text = format!("{{{}}}", joined.join(", "));
        self.node(NodeKind::Map(entries), &text)
    }

    pub fn unrecognized(&self, rule: &str, text: &str) -> &'a Node<'a> {
        let rule = self.intern(rule);
        self.node(
            NodeKind::Unrecognized {
                rule,
                children: &[],
            },
            text,
        )
    }
}

fn grouped(node: &Node<'_>) -> String {
    match node.kind {
        NodeKind::Arithmetic { .. } | NodeKind::Comparison { .. } | NodeKind::Logical { .. } => {
            format!("({})", node.text)
        }
        _ => String::from(node.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_assembled_from_children() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let tree = b.comparison("<", b.variable("x"), b.add(b.long("10L"), b.int("2")));
        assert_eq!(tree.text, "x < (10L + 2)");
    }

    #[test]
    fn test_grouping_is_visible_in_text() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let left_first = b.sub(b.sub(b.int("1"), b.int("2")), b.int("3"));
        let right_first = b.sub(b.int("1"), b.sub(b.int("2"), b.int("3")));
        assert_eq!(left_first.text, "(1 - 2) - 3");
        assert_eq!(right_first.text, "1 - (2 - 3)");

        let both = b.logical(
            LogicalOp::And,
            b.not(b.boolean(true)),
            b.comparison("==", b.variable("a"), b.null()),
        );
        assert_eq!(both.text, "not(true) and (a == null)");
    }

    #[test]
    fn test_fingerprint_follows_structure() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let tree = || b.call(None, "LENGTH", &[b.add(b.variable("x"), b.long("1L"))]);

        assert_eq!(tree().fingerprint(), tree().fingerprint());
        assert_ne!(b.int("1000").fingerprint(), b.double("1000").fingerprint());
        assert_ne!(b.string("a").fingerprint(), b.variable("a").fingerprint());
        assert_ne!(
            b.list(&[b.list(&[]), b.list(&[])]).fingerprint(),
            b.list(&[b.list(&[b.list(&[])])]).fingerprint()
        );
    }

    #[test]
    fn test_function_call_text() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let call = b.call(Some("MAP"), "GET", &[b.string("k"), b.variable("m")]);
        assert_eq!(call.text, "MAP_GET('k', m)");
        assert_eq!(call.kind.name(), "FunctionCall");
    }
}
