mod numeric;
mod opaque;
mod token;
mod value;

pub use numeric::Promoted;
pub use opaque::OpaqueValue;
pub use token::{Kind, KindMismatch, NumericKind, Token};
pub use value::Value;
