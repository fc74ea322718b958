//! Ambient capabilities handed to functions.

use crate::Vec;
use crate::values::Value;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;
use ecow::EcoString;
use hashbrown::HashMap;

/// Key of a capability stored in a [`Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Global configuration values, a [`GlobalConfig`].
    GlobalConfig,
    /// Configuration of the Stellar runtime itself.
    StellarConfig,
    Named(&'static str),
}

/// Configuration map stored under [`Capability::GlobalConfig`].
pub type GlobalConfig = HashMap<EcoString, Value>;

/// An opaque bag of capabilities.
///
/// The core passes it through untouched. Only functions that explicitly ask
/// for a capability ever look inside.
#[derive(Clone, Default)]
pub struct Context {
    capabilities: HashMap<Capability, Arc<dyn Any + Send + Sync>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a capability, builder style.
    pub fn with<T: Any + Send + Sync>(mut self, capability: Capability, value: T) -> Self {
        self.insert(capability, value);
        self
    }

    pub fn insert<T: Any + Send + Sync>(&mut self, capability: Capability, value: T) {
        self.capabilities.insert(capability, Arc::new(value));
    }

    /// The capability stored under `capability`, if it has type `T`.
    pub fn get<T: Any + Send + Sync>(&self, capability: Capability) -> Option<&T> {
        self.capabilities.get(&capability)?.downcast_ref::<T>()
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.capabilities.contains_key(&capability)
    }

    pub fn global_config(&self) -> Option<&GlobalConfig> {
        self.get::<GlobalConfig>(Capability::GlobalConfig)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&Capability> = self.capabilities.keys().collect();
        f.debug_struct("Context").field("capabilities", &keys).finish()
    }
}
