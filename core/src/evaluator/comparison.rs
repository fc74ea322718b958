//! Equality and ordering of tokens.
//!
//! The two operator families follow different null policies. Equality treats
//! two nulls as equal and a single null as unequal. Ordering answers `false`
//! whenever a null is involved. The [`ComparisonDispatcher`] only routes an
//! operator to the right family; it never coerces.

use crate::evaluator::EvalError;
use crate::parser::ComparisonOp;
use crate::values::{Promoted, Token, Value};
use core::cmp::Ordering;
use ecow::EcoString;

/// The operator of a comparison together with the expression it came from.
///
/// `operator` is `None` when the grammar produced an operator token that is
/// not one of the six relational operators; evaluating such a context fails
/// with [`EvalError::UnsupportedOperation`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonContext {
    pub operator: Option<ComparisonOp>,
    pub expression: EcoString,
}

impl ComparisonContext {
    pub fn new(operator: ComparisonOp, expression: impl Into<EcoString>) -> Self {
        Self {
            operator: Some(operator),
            expression: expression.into(),
        }
    }

    /// Build a context from a raw operator token.
    pub fn from_token(token: &str, expression: impl Into<EcoString>) -> Self {
        Self {
            operator: ComparisonOp::from_token(token),
            expression: expression.into(),
        }
    }

    fn unsupported(&self) -> EvalError {
        EvalError::UnsupportedOperation {
            expression: self.expression.clone(),
        }
    }
}

/// Evaluates one family of comparison operators.
pub trait ComparisonEvaluator {
    fn evaluate(
        &self,
        left: &Token,
        right: &Token,
        context: &ComparisonContext,
    ) -> Result<bool, EvalError>;
}

/// `==` and `!=`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EqualityEvaluator;

impl EqualityEvaluator {
    fn equals(left: &Token, right: &Token) -> bool {
        match (left.is_null(), right.is_null()) {
            (true, true) => true,
            (true, false) | (false, true) => false,
            (false, false) => match Promoted::of(left, right) {
                Some(Promoted::Integer(l, r)) => l == r,
                Some(Promoted::Long(l, r)) => l == r,
                Some(Promoted::Float(l, r)) => l == r,
                Some(Promoted::Double(l, r)) => l == r,
                // Unlike kinds never compare equal; `Value` equality is per kind.
                None => left.value() == right.value(),
            },
        }
    }
}

impl ComparisonEvaluator for EqualityEvaluator {
    fn evaluate(
        &self,
        left: &Token,
        right: &Token,
        context: &ComparisonContext,
    ) -> Result<bool, EvalError> {
        match context.operator {
            Some(ComparisonOp::Eq) => Ok(Self::equals(left, right)),
            Some(ComparisonOp::Neq) => Ok(!Self::equals(left, right)),
            _ => Err(context.unsupported()),
        }
    }
}

/// `<`, `<=`, `>` and `>=`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderingEvaluator;

fn ordered<T: PartialOrd>(op: ComparisonOp, left: T, right: T) -> bool {
    match op {
        ComparisonOp::Lt => left < right,
        ComparisonOp::Lte => left <= right,
        ComparisonOp::Gt => left > right,
        ComparisonOp::Gte => left >= right,
        ComparisonOp::Eq => left == right,
        ComparisonOp::Neq => left != right,
    }
}

impl ComparisonEvaluator for OrderingEvaluator {
    fn evaluate(
        &self,
        left: &Token,
        right: &Token,
        context: &ComparisonContext,
    ) -> Result<bool, EvalError> {
        let op = match context.operator {
            Some(op) if !op.is_equality() => op,
            _ => return Err(context.unsupported()),
        };
        if left.is_null() || right.is_null() {
            return Ok(false);
        }
        if let Some(promoted) = Promoted::of(left, right) {
            // IEEE comparisons: every ordering against NaN is false.
            return Ok(match promoted {
                Promoted::Integer(l, r) => ordered(op, l, r),
                Promoted::Long(l, r) => ordered(op, l, r),
                Promoted::Float(l, r) => ordered(op, l, r),
                Promoted::Double(l, r) => ordered(op, l, r),
            });
        }
        let ordering: Ordering = match (left.value(), right.value()) {
            (Value::Str(l), Value::Str(r)) => l.as_str().cmp(r.as_str()),
            (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
            _ => {
                return Err(EvalError::UnsupportedComparison {
                    left: left.kind(),
                    right: right.kind(),
                    operator: op,
                    expression: context.expression.clone(),
                });
            }
        };
        Ok(ordered(op, ordering, Ordering::Equal))
    }
}

/// Routes a comparison to the evaluator of its operator family.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComparisonDispatcher {
    equality: EqualityEvaluator,
    ordering: OrderingEvaluator,
}

impl ComparisonDispatcher {
    pub const fn new() -> Self {
        Self {
            equality: EqualityEvaluator,
            ordering: OrderingEvaluator,
        }
    }

    pub fn evaluate(
        &self,
        left: &Token,
        right: &Token,
        context: &ComparisonContext,
    ) -> Result<Token, EvalError> {
        let evaluator: &dyn ComparisonEvaluator = match context.operator {
            Some(op) if op.is_equality() => &self.equality,
            Some(_) => &self.ordering,
            None => return Err(context.unsupported()),
        };
        evaluator.evaluate(left, right, context).map(Token::boolean)
    }
}
