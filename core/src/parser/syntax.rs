// Operator tags shared by the parse tree and the compiled program.

use core::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithmeticOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
            ArithmeticOp::Mod => "%",
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Relational operators recognized by the comparison dispatcher.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl ComparisonOp {
    /// Resolve a raw operator token. Returns `None` for anything that is not
    /// one of the six relational operators.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "==" => Some(ComparisonOp::Eq),
            "!=" => Some(ComparisonOp::Neq),
            "<" => Some(ComparisonOp::Lt),
            "<=" => Some(ComparisonOp::Lte),
            ">" => Some(ComparisonOp::Gt),
            ">=" => Some(ComparisonOp::Gte),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "==",
            ComparisonOp::Neq => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Lte => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Gte => ">=",
        }
    }

    /// `true` for `==` and `!=`.
    pub fn is_equality(self) -> bool {
        matches!(self, ComparisonOp::Eq | ComparisonOp::Neq)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_tokens() {
        assert_eq!(ComparisonOp::from_token("=="), Some(ComparisonOp::Eq));
        assert_eq!(ComparisonOp::from_token(" <= "), Some(ComparisonOp::Lte));
        assert_eq!(ComparisonOp::from_token("=<"), None);
        assert_eq!(ComparisonOp::from_token(""), None);
    }

    #[test]
    fn test_equality_family() {
        assert!(ComparisonOp::Eq.is_equality());
        assert!(ComparisonOp::Neq.is_equality());
        assert!(!ComparisonOp::Gte.is_equality());
    }
}
