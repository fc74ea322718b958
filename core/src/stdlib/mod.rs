//! Stellar Standard Library
//!
//! Functions every deployment expects to find, grouped by concern:
//! - Data structures: IS_EMPTY, LENGTH, LIST_ADD, MAP_EXISTS, MAP_GET
//! - Validation: IS_INTEGER, IS_EMAIL, IS_DOMAIN, IS_URL, IS_IP
//! - Analytics: SHANNON_ENTROPY
//! - Bloom filters: BLOOM_INIT, BLOOM_ADD, BLOOM_EXISTS, BLOOM_MERGE
//!
//! Most functions are stateless Rust `fn`s wrapped in a [`NativeFunction`]
//! and registered with their metadata in a [`FunctionRegistryBuilder`].

use crate::api::Context;
use crate::resolver::{FunctionError, FunctionInfo, FunctionRegistryBuilder, StellarFunction};
use crate::values::Value;
use core::fmt;

pub mod analytics;
pub mod bloom;
pub mod data_structures;
pub mod validation;

#[cfg(test)]
mod stdlib_test;

pub use bloom::BloomFilter;

/// Signature of a stateless standard function.
pub type NativeFn = fn(&[Value], &Context) -> Result<Value, FunctionError>;

/// Adapts a plain Rust `fn` to [`StellarFunction`].
#[derive(Clone, Copy)]
pub struct NativeFunction {
    func: NativeFn,
}

impl NativeFunction {
    pub const fn new(func: NativeFn) -> Self {
        Self { func }
    }
}

impl StellarFunction for NativeFunction {
    fn apply(&self, args: &[Value], context: &Context) -> Result<Value, FunctionError> {
        (self.func)(args, context)
    }

    fn is_initialized(&self) -> bool {
        true
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NativeFunction")
    }
}

/// Register a stateless function.
pub(crate) fn register_native(
    builder: &mut FunctionRegistryBuilder,
    info: FunctionInfo,
    func: NativeFn,
) {
    builder.register(info, move || NativeFunction::new(func));
}

/// Register every standard function.
///
/// # Example
///
/// ```
/// use stellar_core::resolver::{FunctionName, FunctionRegistry};
/// use stellar_core::stdlib::register_stdlib;
///
/// let mut builder = FunctionRegistry::builder();
/// register_stdlib(&mut builder);
/// let registry = builder.build();
/// assert!(registry.info(&FunctionName::from("BLOOM_ADD")).is_some());
/// ```
pub fn register_stdlib(builder: &mut FunctionRegistryBuilder) {
    data_structures::register(builder);
    validation::register(builder);
    analytics::register(builder);
    bloom::register(builder);
}
