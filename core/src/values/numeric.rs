use crate::values::{NumericKind, Token};

/// Two numeric operands converted to their common promoted kind.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Promoted {
    Integer(i32, i32),
    Long(i64, i64),
    Float(f32, f32),
    Double(f64, f64),
}

impl Promoted {
    /// Promote both tokens to the higher of their declared kinds.
    ///
    /// Returns `None` when either token is not declared numeric or holds null.
    pub fn of(left: &Token, right: &Token) -> Option<Promoted> {
        let target = left.numeric_kind()?.promote(right.numeric_kind()?);
        let (l, r) = (left.value(), right.value());
        let promoted = match target {
            NumericKind::Integer => Promoted::Integer(l.to_i32()?, r.to_i32()?),
            NumericKind::Long => Promoted::Long(l.to_i64()?, r.to_i64()?),
            NumericKind::Float => Promoted::Float(l.to_f32()?, r.to_f32()?),
            NumericKind::Double => Promoted::Double(l.to_f64()?, r.to_f64()?),
        };
        Some(promoted)
    }

    pub fn kind(&self) -> NumericKind {
        match self {
            Promoted::Integer(..) => NumericKind::Integer,
            Promoted::Long(..) => NumericKind::Long,
            Promoted::Float(..) => NumericKind::Float,
            Promoted::Double(..) => NumericKind::Double,
        }
    }
}
