//! Stellar VM instructions.
//!
//! A program is a flat list of instructions replayed in order against an
//! operand stack of tokens. Every instruction pops [`Instruction::arity`]
//! tokens and pushes exactly one.
//!
//! # Stack Discipline
//!
//! Stack effect notation: `[..., operand1, operand2] -> [..., result]`.
//! The most recently pushed token is always the last operand.

use crate::evaluator::ComparisonContext;
use crate::parser::{ArithmeticOp, LogicalOp};
use crate::resolver::FunctionName;
use crate::values::Token;
use core::fmt;
use ecow::EcoString;

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `[...] -> [..., token]`
    Push(Token),

    /// `[..., left, right] -> [..., left op right]`
    Arithmetic(ArithmeticOp),

    /// `[..., left, right] -> [..., bool]`, through the comparison dispatcher.
    Compare(ComparisonContext),

    /// `[..., left, right] -> [..., bool]`
    Logical(LogicalOp),

    /// `[..., operand] -> [..., bool]`
    Not,

    /// `[...] -> [..., value]`, looked up in the variable resolver.
    LoadVariable(EcoString),

    /// `[..., arg1, ..., argN] -> [..., result]`, looked up in the function
    /// resolver at run time.
    Call { function: FunctionName, arity: usize },

    /// `[..., item1, ..., itemN] -> [..., list]`
    MakeList(usize),

    /// `[..., key1, value1, ..., keyN, valueN] -> [..., map]`
    MakeMap(usize),
}

impl Instruction {
    /// Number of tokens the instruction pops.
    pub fn arity(&self) -> usize {
        match self {
            Instruction::Push(_) | Instruction::LoadVariable(_) => 0,
            Instruction::Not => 1,
            Instruction::Arithmetic(_) | Instruction::Compare(_) | Instruction::Logical(_) => 2,
            Instruction::Call { arity, .. } => *arity,
            Instruction::MakeList(len) => *len,
            Instruction::MakeMap(pairs) => pairs * 2,
        }
    }
}

/// Assembly-like rendering used by the program listing.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push(token) => write!(f, "PUSH {} ({})", token, token.kind()),
            Instruction::Arithmetic(op) => write!(f, "ARITH {}", op),
            Instruction::Compare(context) => match context.operator {
                Some(op) => write!(f, "COMPARE {}", op),
                None => write!(f, "COMPARE ? ; {}", context.expression),
            },
            Instruction::Logical(op) => write!(f, "LOGICAL {}", op),
            Instruction::Not => f.write_str("NOT"),
            Instruction::LoadVariable(name) => write!(f, "LOAD {}", name),
            Instruction::Call { function, arity } => write!(f, "CALL {}/{}", function, arity),
            Instruction::MakeList(len) => write!(f, "LIST {}", len),
            Instruction::MakeMap(pairs) => write!(f, "MAP {}", pairs),
        }
    }
}
