use crate::parser::{ArithmeticOp, LogicalOp};
use core::fmt;
use xxhash_rust::xxh64::Xxh64;

/// A node of the parse tree handed to the compiler.
///
/// Nodes live in a `bumpalo::Bump` owned by whoever parsed the source. The
/// compiler only borrows them; the program it produces owns all its data, so
/// the arena may be dropped as soon as compilation returns.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'a> {
    pub kind: NodeKind<'a>,
    /// Source text spanned by this node.
    pub text: &'a str,
}

impl Node<'_> {
    /// Structural hash of the whole tree.
    ///
    /// Every node contributes, in post-order, its kind, its operator or
    /// literal payload and its source text. Trees that differ only in grouping
    /// or in literal kind therefore hash apart even when their root text is the
    /// same.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh64::new(0);
        self.feed(&mut hasher);
        hasher.digest()
    }

    fn feed(&self, hasher: &mut Xxh64) {
        match &self.kind {
            NodeKind::Arithmetic { op, left, right } => {
                left.feed(hasher);
                right.feed(hasher);
                feed_str(hasher, op.symbol());
            }
            NodeKind::Comparison { op, left, right } => {
                left.feed(hasher);
                right.feed(hasher);
                feed_str(hasher, op);
            }
            NodeKind::Logical { op, left, right } => {
                left.feed(hasher);
                right.feed(hasher);
                feed_str(hasher, op.symbol());
            }
            NodeKind::Not(operand) => operand.feed(hasher),
            NodeKind::StringLiteral(value) | NodeKind::Variable(value) => feed_str(hasher, value),
            NodeKind::BooleanLiteral(value) => hasher.update(&[u8::from(*value)]),
            NodeKind::FunctionCall {
                namespace,
                name,
                args,
            } => {
                for arg in args.iter() {
                    arg.feed(hasher);
                }
                feed_len(hasher, args.len());
                feed_str(hasher, namespace.unwrap_or_default());
                feed_str(hasher, name);
            }
            NodeKind::List(items) => {
                for item in items.iter() {
                    item.feed(hasher);
                }
                feed_len(hasher, items.len());
            }
            NodeKind::Map(entries) => {
                for (key, value) in entries.iter() {
                    key.feed(hasher);
                    value.feed(hasher);
                }
                feed_len(hasher, entries.len());
            }
            NodeKind::Unrecognized { children, .. } => {
                for child in children.iter() {
                    child.feed(hasher);
                }
                feed_len(hasher, children.len());
            }
            NodeKind::IntLiteral
            | NodeKind::LongLiteral
            | NodeKind::FloatLiteral
            | NodeKind::DoubleLiteral
            | NodeKind::NullLiteral => {}
        }
        feed_str(hasher, self.kind.name());
        feed_str(hasher, self.text);
    }
}

fn feed_len(hasher: &mut Xxh64, len: usize) {
    hasher.update(&(len as u64).to_le_bytes());
}

/// Length-prefixed, so adjacent strings cannot run into each other.
fn feed_str(hasher: &mut Xxh64, s: &str) {
    feed_len(hasher, s.len());
    hasher.update(s.as_bytes());
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind<'a> {
    IntLiteral,
    LongLiteral,
    FloatLiteral,
    DoubleLiteral,
    /// Unquoted, unescaped string contents.
    StringLiteral(&'a str),
    BooleanLiteral(bool),
    NullLiteral,
    Arithmetic {
        op: ArithmeticOp,
        left: &'a Node<'a>,
        right: &'a Node<'a>,
    },
    Comparison {
        /// Raw operator token; resolved by the compiler, validated at run time.
        op: &'a str,
        left: &'a Node<'a>,
        right: &'a Node<'a>,
    },
    Logical {
        op: LogicalOp,
        left: &'a Node<'a>,
        right: &'a Node<'a>,
    },
    Not(&'a Node<'a>),
    Variable(&'a str),
    FunctionCall {
        namespace: Option<&'a str>,
        name: &'a str,
        args: &'a [&'a Node<'a>],
    },
    List(&'a [&'a Node<'a>]),
    Map(&'a [(&'a Node<'a>, &'a Node<'a>)]),
    /// A grammar rule the core has no compilation for.
    Unrecognized {
        rule: &'a str,
        children: &'a [&'a Node<'a>],
    },
}

/// The four numeric literal kinds, used as keys of the literal lookup table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Long,
    Float,
    Double,
}

impl<'a> NodeKind<'a> {
    /// Grammar-level name of the node kind, used in error messages.
    pub fn name(&self) -> &'a str {
        match self {
            NodeKind::IntLiteral => "IntLiteral",
            NodeKind::LongLiteral => "LongLiteral",
            NodeKind::FloatLiteral => "FloatLiteral",
            NodeKind::DoubleLiteral => "DoubleLiteral",
            NodeKind::StringLiteral(_) => "StringLiteral",
            NodeKind::BooleanLiteral(_) => "BooleanLiteral",
            NodeKind::NullLiteral => "NullLiteral",
            NodeKind::Arithmetic { .. } => "Arithmetic",
            NodeKind::Comparison { .. } => "Comparison",
            NodeKind::Logical { .. } => "Logical",
            NodeKind::Not(_) => "Not",
            NodeKind::Variable(_) => "Variable",
            NodeKind::FunctionCall { .. } => "FunctionCall",
            NodeKind::List(_) => "List",
            NodeKind::Map(_) => "Map",
            NodeKind::Unrecognized { rule, .. } => *rule,
        }
    }

    /// The numeric literal kind of this node, if it is one.
    pub fn literal_kind(&self) -> Option<LiteralKind> {
        match self {
            NodeKind::IntLiteral => Some(LiteralKind::Int),
            NodeKind::LongLiteral => Some(LiteralKind::Long),
            NodeKind::FloatLiteral => Some(LiteralKind::Float),
            NodeKind::DoubleLiteral => Some(LiteralKind::Double),
            _ => None,
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::Int => f.write_str("IntLiteral"),
            LiteralKind::Long => f.write_str("LongLiteral"),
            LiteralKind::Float => f.write_str("FloatLiteral"),
            LiteralKind::Double => f.write_str("DoubleLiteral"),
        }
    }
}
