use core::any::Any;
use core::fmt;

/// A structured value the core carries without understanding it.
///
/// Functions hand opaque values back and forth (a Bloom filter built by one
/// call and consumed by the next). Arithmetic rejects them, ordering rejects
/// them, and equality defers to [`OpaqueValue::equals`].
pub trait OpaqueValue: Any + fmt::Debug + Send + Sync {
    /// Short name shown in error messages.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn equals(&self, other: &dyn OpaqueValue) -> bool {
        let _ = other;
        false
    }
}

impl dyn OpaqueValue {
    pub fn downcast_ref<T: OpaqueValue>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
