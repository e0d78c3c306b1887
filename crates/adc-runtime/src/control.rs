//! Provider control surface
//!
//! [`ProviderControl`] is the trait every generated wrapper implements: two
//! fixed accessors whose return values were baked in as literals at
//! generation time. [`ProviderClass`] is the class handle the registry maps
//! provider names to; it carries the same baked metadata plus a constructor
//! for the wrapper type, so callers never touch attribute data at run time.

use std::fmt;

/// Fixed accessor surface of a generated provider wrapper
pub trait ProviderControl: Send + Sync {
    /// Provider name the wrapper was generated for
    fn provider_name(&self) -> &'static str;

    /// Whether the provider integrates as a bundled SDK
    fn is_sdk(&self) -> bool;
}

/// Class handle for one generated wrapper type
///
/// The runtime analog of looking a class up by name: a copyable handle with
/// the wrapper's identity and a plain function pointer that constructs it.
/// Handles are baked into the generated registry table as constants.
#[derive(Clone, Copy)]
pub struct ProviderClass {
    /// Full path of the wrapper type inside the generated package
    pub type_name: &'static str,
    /// Provider name, duplicated from the wrapper for handle-level access
    pub provider_name: &'static str,
    /// SDK flag, duplicated from the wrapper for handle-level access
    pub is_sdk: bool,
    /// Constructor for the wrapper type
    pub construct: fn() -> Box<dyn ProviderControl>,
}

impl ProviderClass {
    /// Construct an instance of the wrapper type
    pub fn instantiate(&self) -> Box<dyn ProviderControl> {
        (self.construct)()
    }
}

impl fmt::Debug for ProviderClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderClass")
            .field("type_name", &self.type_name)
            .field("provider_name", &self.provider_name)
            .field("is_sdk", &self.is_sdk)
            .finish()
    }
}

/// One row of the generated registry table
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    /// Provider name, the lookup key
    pub name: &'static str,
    /// Class handle for the provider's wrapper
    pub class: ProviderClass,
}
