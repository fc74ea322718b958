//! Number literal evaluators.
//!
//! Each numeric literal kind has its own evaluator. The compiler picks one
//! through a lookup table keyed by the node's literal kind, so handing a node
//! to the wrong evaluator is a dispatch bug and is reported as
//! [`LiteralError::UnsupportedLiteral`].

use crate::Box;
use crate::evaluator::LiteralError;
use crate::parser::{LiteralKind, Node};
use crate::values::Token;
use core::str::FromStr;
use hashbrown::HashMap;
use once_cell::sync::Lazy;

/// Parses one kind of number literal into a token.
pub trait NumberEvaluator: Send + Sync {
    fn evaluate(&self, node: &Node<'_>) -> Result<Token, LiteralError>;
}

pub type LiteralTable = HashMap<LiteralKind, Box<dyn NumberEvaluator>>;

/// The default table, one evaluator per literal kind.
pub static NUMBER_LITERALS: Lazy<LiteralTable> = Lazy::new(|| {
    let mut table: LiteralTable = HashMap::new();
    table.insert(LiteralKind::Int, Box::new(IntLiteralEvaluator));
    table.insert(LiteralKind::Long, Box::new(LongLiteralEvaluator));
    table.insert(LiteralKind::Float, Box::new(FloatLiteralEvaluator));
    table.insert(LiteralKind::Double, Box::new(DoubleLiteralEvaluator));
    table
});

/// Evaluate a number literal node with the default table.
pub fn evaluate_literal(node: &Node<'_>) -> Result<Token, LiteralError> {
    evaluate_with(node, &NUMBER_LITERALS)
}

/// Evaluate a number literal node with a caller-supplied table.
pub fn evaluate_with(node: &Node<'_>, table: &LiteralTable) -> Result<Token, LiteralError> {
    let evaluator = node
        .kind
        .literal_kind()
        .and_then(|kind| table.get(&kind))
        .ok_or_else(|| unsupported(node))?;
    evaluator.evaluate(node)
}

fn unsupported(node: &Node<'_>) -> LiteralError {
    LiteralError::UnsupportedLiteral {
        kind: node.kind.name().into(),
    }
}

/// Drop one trailing type suffix (`l`, `f`, `d`, either case).
fn strip_suffix(text: &str) -> &str {
    let text = text.trim();
    match text.as_bytes().last() {
        Some(b'l' | b'L' | b'f' | b'F' | b'd' | b'D') => &text[..text.len() - 1],
        _ => text,
    }
}

fn parse<T: FromStr>(node: &Node<'_>, expected: LiteralKind) -> Result<T, LiteralError> {
    if node.kind.literal_kind() != Some(expected) {
        return Err(unsupported(node));
    }
    strip_suffix(node.text)
        .parse::<T>()
        .map_err(|_| LiteralError::InvalidLiteral {
            kind: expected,
            text: node.text.into(),
        })
}

pub struct IntLiteralEvaluator;

impl NumberEvaluator for IntLiteralEvaluator {
    fn evaluate(&self, node: &Node<'_>) -> Result<Token, LiteralError> {
        parse::<i32>(node, LiteralKind::Int).map(Token::int)
    }
}

pub struct LongLiteralEvaluator;

impl NumberEvaluator for LongLiteralEvaluator {
    fn evaluate(&self, node: &Node<'_>) -> Result<Token, LiteralError> {
        parse::<i64>(node, LiteralKind::Long).map(Token::long)
    }
}

pub struct FloatLiteralEvaluator;

impl NumberEvaluator for FloatLiteralEvaluator {
    fn evaluate(&self, node: &Node<'_>) -> Result<Token, LiteralError> {
        parse::<f32>(node, LiteralKind::Float).map(Token::float)
    }
}

pub struct DoubleLiteralEvaluator;

impl NumberEvaluator for DoubleLiteralEvaluator {
    fn evaluate(&self, node: &Node<'_>) -> Result<Token, LiteralError> {
        parse::<f64>(node, LiteralKind::Double).map(Token::double)
    }
}
