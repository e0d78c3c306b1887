//! Registry loading capability
//!
//! [`RegistrySource`] is the seam between the resolver and whatever holds
//! the generated registry. The production implementation is
//! [`StaticTableSource`], which reads the compile-time-generated lookup
//! table through its fixed accessor function; tests substitute failing or
//! counting sources.

use std::collections::HashMap;

use adc_domain::Result;

use crate::control::{ProviderClass, RegistryEntry};

/// Capability to load the provider name → class mapping
///
/// `load_mapping` is called at most once per successful resolver
/// initialization; a failed call may be retried on a later lookup. The
/// returned mapping is a closed snapshot, not a live view.
pub trait RegistrySource: Send + Sync {
    /// Load the complete mapping from the registry
    fn load_mapping(&self) -> Result<HashMap<String, ProviderClass>>;
}

/// Registry source backed by the generated static table
///
/// Holds the fixed accessor function the registry module exports, so the
/// table stays reachable (and therefore linked) even when the host crate
/// references nothing else in the generated package.
#[derive(Clone, Copy)]
pub struct StaticTableSource {
    table: fn() -> &'static [RegistryEntry],
}

impl StaticTableSource {
    /// Wrap a generated table accessor, conventionally
    /// `adc_gen::registry::ad_controls`
    pub fn new(table: fn() -> &'static [RegistryEntry]) -> Self {
        Self { table }
    }
}

impl RegistrySource for StaticTableSource {
    fn load_mapping(&self) -> Result<HashMap<String, ProviderClass>> {
        let mut entries = HashMap::new();
        for entry in (self.table)() {
            // First entry wins, matching the generator's collision policy.
            entries
                .entry(entry.name.to_string())
                .or_insert(entry.class);
        }
        Ok(entries)
    }
}
