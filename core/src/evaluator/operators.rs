//! Arithmetic and logical operator implementations.

use crate::evaluator::EvalError;
use crate::parser::{ArithmeticOp, LogicalOp};
use crate::values::{Promoted, Token, Value};
use core::ops::{Add, Div, Mul, Rem, Sub};

/// Integer arithmetic for `i32` and `i64`.
///
/// Wraps on overflow, truncates division toward zero, and keeps the sign of
/// the dividend for remainders. Division by zero is an error.
macro_rules! eval_binary_int {
    ($op:expr, $left:expr, $right:expr) => {{
        let (left, right) = ($left, $right);
        match $op {
            ArithmeticOp::Add => left.wrapping_add(right),
            ArithmeticOp::Sub => left.wrapping_sub(right),
            ArithmeticOp::Mul => left.wrapping_mul(right),
            ArithmeticOp::Div | ArithmeticOp::Mod if right == 0 => {
                return Err(EvalError::DivisionByZero);
            }
            // wrapping_* covers MIN / -1
            ArithmeticOp::Div => left.wrapping_div(right),
            ArithmeticOp::Mod => left.wrapping_rem(right),
        }
    }};
}

/// Apply an arithmetic operator to two numeric tokens.
///
/// Both operands are promoted to the higher of their kinds and the result
/// carries that kind. Null or non-numeric operands are rejected.
pub fn eval_arithmetic(op: ArithmeticOp, left: &Token, right: &Token) -> Result<Token, EvalError> {
    let promoted = Promoted::of(left, right).ok_or(EvalError::UnsupportedOperand {
        operator: op.symbol(),
        left: left.kind(),
        right: right.kind(),
    })?;
    let token = match promoted {
        Promoted::Integer(l, r) => Token::int(eval_binary_int!(op, l, r)),
        Promoted::Long(l, r) => Token::long(eval_binary_int!(op, l, r)),
        Promoted::Float(l, r) => Token::float(eval_binary_float(op, l, r)),
        Promoted::Double(l, r) => Token::double(eval_binary_float(op, l, r)),
    };
    Ok(token)
}

/// Floating arithmetic. Follows IEEE 754 (produces inf/nan rather than failing).
fn eval_binary_float<T>(op: ArithmeticOp, left: T, right: T) -> T
where
    T: Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Div<Output = T> + Rem<Output = T>,
{
    match op {
        ArithmeticOp::Add => left + right,
        ArithmeticOp::Sub => left - right,
        ArithmeticOp::Mul => left * right,
        ArithmeticOp::Div => left / right,
        ArithmeticOp::Mod => left % right,
    }
}

fn as_condition(token: &Token) -> Option<bool> {
    match token.value() {
        Value::Bool(b) => Some(*b),
        Value::Null => Some(false),
        _ => None,
    }
}

/// `and` / `or` over booleans. Null counts as false.
pub fn eval_logical(op: LogicalOp, left: &Token, right: &Token) -> Result<Token, EvalError> {
    let unsupported = || EvalError::UnsupportedOperand {
        operator: op.symbol(),
        left: left.kind(),
        right: right.kind(),
    };
    let l = as_condition(left).ok_or_else(unsupported)?;
    let r = as_condition(right).ok_or_else(unsupported)?;
    Ok(Token::boolean(match op {
        LogicalOp::And => l && r,
        LogicalOp::Or => l || r,
    }))
}

/// Boolean negation. Null counts as false, so `not(null)` is true.
pub fn eval_not(operand: &Token) -> Result<Token, EvalError> {
    as_condition(operand)
        .map(|b| Token::boolean(!b))
        .ok_or(EvalError::UnsupportedUnaryOperand {
            operator: "not",
            operand: operand.kind(),
        })
}
