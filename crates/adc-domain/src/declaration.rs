//! Provider declarations and collision results
//!
//! A [`Declaration`] is one source type found carrying the
//! `#[ad_provider(...)]` attribute. Declarations are created at the start of
//! a generation pass, read-only for its duration, and discarded when the
//! pass completes; nothing persists across passes, so generation is
//! idempotent for the same discovered set.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constants::WRAPPER_SUFFIX;
use crate::error::{Error, Result};

/// One attributed provider type discovered in a generation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Unique provider name within the pass (attribute field `name`)
    pub provider_name: String,
    /// Whether the provider integrates as a bundled SDK (attribute field
    /// `sdk`, default true; API-only providers set it to false)
    pub is_sdk: bool,
    /// Module path of the original type relative to its crate root,
    /// e.g. `providers::admob`
    pub package_name: String,
    /// Identifier of the original type, e.g. `AdMob`
    pub simple_name: String,
}

impl Declaration {
    /// Create a declaration, validating the attribute fields
    ///
    /// The provider name must be non-empty: an empty key could never be
    /// resolved and would silently vanish from the registry.
    pub fn new(
        provider_name: impl Into<String>,
        is_sdk: bool,
        package_name: impl Into<String>,
        simple_name: impl Into<String>,
    ) -> Result<Self> {
        let provider_name = provider_name.into();
        let simple_name = simple_name.into();
        if provider_name.trim().is_empty() {
            return Err(Error::invalid_declaration(format!(
                "provider name on `{simple_name}` must not be empty"
            )));
        }
        if simple_name.is_empty() {
            return Err(Error::invalid_declaration(
                "declaration has no type name".to_string(),
            ));
        }
        Ok(Self {
            provider_name,
            is_sdk,
            package_name: package_name.into(),
            simple_name,
        })
    }

    /// Derived wrapper type name: the simple name with the fixed suffix
    pub fn wrapper_name(&self) -> String {
        format!("{}{}", self.simple_name, WRAPPER_SUFFIX)
    }

    /// Full module path of the original type inside the host crate
    ///
    /// Empty package names (crate-root declarations) yield `crate::<Name>`.
    pub fn qualified_name(&self) -> String {
        if self.package_name.is_empty() {
            format!("crate::{}", self.simple_name)
        } else {
            format!("crate::{}::{}", self.package_name, self.simple_name)
        }
    }
}

/// Output of collision detection over one pass's declarations
///
/// `accepted` holds the first-seen declaration per provider name; the map is
/// ordered so downstream synthesis iterates deterministically. If
/// `duplicates` is non-empty the pass must abort without emitting artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    /// Provider name → first-seen declaration
    pub accepted: BTreeMap<String, Declaration>,
    /// Provider names that appeared more than once
    pub duplicates: BTreeSet<String>,
}

impl GenerationResult {
    /// Whether the pass may proceed to synthesis
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
    }
}
