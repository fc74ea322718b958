use crate::values::{Kind, OpaqueValue};
use crate::{String, Vec};
use alloc::sync::Arc;
use core::fmt;
use ecow::{EcoString, EcoVec};

/// A runtime value.
///
/// Every variant is cheap to clone: strings and collections share their
/// buffers through `ecow`, opaque values through `Arc`.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Str(EcoString),
    List(EcoVec<Value>),
    /// Entries in insertion order. Keys are unique.
    Map(EcoVec<(Value, Value)>),
    Opaque(Arc<dyn OpaqueValue>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Int(_) => Kind::Integer,
            Value::Long(_) => Kind::Long,
            Value::Float(_) => Kind::Float,
            Value::Double(_) => Kind::Double,
            Value::Bool(_) => Kind::Boolean,
            Value::Str(_) => Kind::String,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
            Value::Opaque(_) => Kind::Object,
        }
    }

    pub fn opaque<T: OpaqueValue>(value: T) -> Self {
        Value::Opaque(Arc::new(value))
    }

    /// Build a map value. Later entries replace earlier ones with an equal key.
    pub fn map_from<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let mut map: EcoVec<(Value, Value)> = EcoVec::new();
        for (key, value) in entries {
            match map.iter().position(|(k, _)| *k == key) {
                Some(index) => map.make_mut()[index].1 = value,
                None => map.push((key, value)),
            }
        }
        Value::Map(map)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&dyn OpaqueValue> {
        match self {
            Value::Opaque(value) => Some(value.as_ref()),
            _ => None,
        }
    }

    /// Look up `key` in a map value.
    pub fn map_get(&self, key: &Value) -> Option<&Value> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Widen any numeric value to `i32`, truncating like a JVM cast.
    pub(crate) fn to_i32(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Long(v) => Some(*v as i32),
            Value::Float(v) => Some(*v as i32),
            Value::Double(v) => Some(*v as i32),
            _ => None,
        }
    }

    pub(crate) fn to_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(i64::from(*v)),
            Value::Long(v) => Some(*v),
            Value::Float(v) => Some(*v as i64),
            Value::Double(v) => Some(*v as i64),
            _ => None,
        }
    }

    pub(crate) fn to_f32(&self) -> Option<f32> {
        match self {
            Value::Int(v) => Some(*v as f32),
            Value::Long(v) => Some(*v as f32),
            Value::Float(v) => Some(*v),
            Value::Double(v) => Some(*v as f32),
            _ => None,
        }
    }

    pub(crate) fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(f64::from(*v)),
            Value::Long(v) => Some(*v as f64),
            Value::Float(v) => Some(f64::from(*v)),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }
}

/// Same-kind structural equality. Numbers of different kinds are never equal
/// here; cross-kind numeric equality is the comparison evaluator's job.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, value)| other.map_get(key) == Some(value))
            }
            (Value::Opaque(a), Value::Opaque(b)) => Arc::ptr_eq(a, b) || a.equals(b.as_ref()),
            _ => false,
        }
    }
}

/// Java's floating point text: plain decimal for magnitudes in
/// `[1e-3, 1e7)`, otherwise `d.dddE±n` with at least one fractional digit.
fn write_java_float<T>(f: &mut fmt::Formatter<'_>, value: T) -> fmt::Result
where
    T: Copy + Into<f64> + fmt::Debug + fmt::LowerExp,
{
    let wide: f64 = value.into();
    if wide.is_nan() {
        return f.write_str("NaN");
    }
    if wide.is_infinite() {
        return f.write_str(if wide > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let magnitude = wide.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        // `{:?}` keeps the fractional part: 1.0 rather than 1.
        return write!(f, "{:?}", value);
    }
    let scientific = crate::format!("{:e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    if mantissa.contains('.') {
        write!(f, "{}E{}", mantissa, exponent)
    } else {
        write!(f, "{}.0E{}", mantissa, exponent)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write_java_float(f, *v),
            Value::Double(v) => write_java_float(f, *v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                f.write_str("}")
            }
            Value::Opaque(value) => f.write_str(value.type_name()),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(EcoString::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(EcoString::from(v))
    }
}

impl From<EcoString> for Value {
    fn from(v: EcoString) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items.into_iter().collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
