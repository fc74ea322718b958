use crate::values::Value;
use core::fmt;
use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

/// Declared kind of a token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    String,
    List,
    Map,
    /// Opaque values, and the catch-all kind for values declared untyped.
    Object,
}

/// The numeric kinds, ordered by promotion: Integer < Long < Float < Double.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericKind {
    Integer,
    Long,
    Float,
    Double,
}

impl Kind {
    pub fn numeric(self) -> Option<NumericKind> {
        match self {
            Kind::Integer => Some(NumericKind::Integer),
            Kind::Long => Some(NumericKind::Long),
            Kind::Float => Some(NumericKind::Float),
            Kind::Double => Some(NumericKind::Double),
            _ => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        self.numeric().is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "Null",
            Kind::Integer => "Integer",
            Kind::Long => "Long",
            Kind::Float => "Float",
            Kind::Double => "Double",
            Kind::Boolean => "Boolean",
            Kind::String => "String",
            Kind::List => "List",
            Kind::Map => "Map",
            Kind::Object => "Object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl NumericKind {
    /// The kind both operands of a binary operation are promoted to.
    pub fn promote(self, other: NumericKind) -> NumericKind {
        self.max(other)
    }

    pub fn kind(self) -> Kind {
        match self {
            NumericKind::Integer => Kind::Integer,
            NumericKind::Long => Kind::Long,
            NumericKind::Float => Kind::Float,
            NumericKind::Double => Kind::Double,
        }
    }
}

/// A declared kind that disagrees with the value's runtime kind.
#[derive(Error, Debug, Diagnostic)]
#[error("value of kind {actual} cannot be declared as {declared}")]
#[diagnostic(code(stellar::values::kind_mismatch))]
pub struct KindMismatch {
    pub declared: Kind,
    pub actual: Kind,
}

/// The unit of exchange on the operand stack.
///
/// A token is immutable. Its kind is fixed at construction and is what the
/// evaluators promote and compare on; the value is never re-inspected to
/// decide how to treat it. A numeric value always carries its own kind, while
/// a null may carry any declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    value: Value,
    kind: Kind,
}

impl Token {
    pub fn new(value: Value) -> Self {
        let kind = value.kind();
        Self { value, kind }
    }

    pub fn null() -> Self {
        Self::new(Value::Null)
    }

    /// A null declared as `kind`, e.g. an absent Long field.
    pub fn typed_null(kind: Kind) -> Self {
        Self {
            value: Value::Null,
            kind,
        }
    }

    /// Pair a value with an explicitly declared kind.
    ///
    /// Nulls accept any kind. Numeric values must be declared as their own
    /// kind. Other values accept their own kind or `Object`.
    pub fn try_declared(value: Value, kind: Kind) -> Result<Self, KindMismatch> {
        let actual = value.kind();
        let agrees = match actual {
            Kind::Null => true,
            _ if actual.is_numeric() || kind.is_numeric() => actual == kind,
            _ => actual == kind || kind == Kind::Object,
        };
        if agrees {
            Ok(Self { value, kind })
        } else {
            Err(KindMismatch {
                declared: kind,
                actual,
            })
        }
    }

    pub fn int(v: i32) -> Self {
        Self::new(Value::Int(v))
    }

    pub fn long(v: i64) -> Self {
        Self::new(Value::Long(v))
    }

    pub fn float(v: f32) -> Self {
        Self::new(Value::Float(v))
    }

    pub fn double(v: f64) -> Self {
        Self::new(Value::Double(v))
    }

    pub fn boolean(v: bool) -> Self {
        Self::new(Value::Bool(v))
    }

    pub fn string(v: impl Into<EcoString>) -> Self {
        Self::new(Value::Str(v.into()))
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn numeric_kind(&self) -> Option<NumericKind> {
        self.kind.numeric()
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }
}

impl From<Value> for Token {
    fn from(value: Value) -> Self {
        Token::new(value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
