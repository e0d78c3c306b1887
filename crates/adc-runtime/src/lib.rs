//! Runtime layer for ad-control
//!
//! Consumes the registry module the generator emits and serves provider
//! lookups by name. The two sides share no objects at build time; they meet
//! only at the fixed symbols in `adc_domain::constants`.
//!
//! ## Resolution flow
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                     Provider Resolution Flow                   │
//! ├────────────────────────────────────────────────────────────────┤
//! │                                                                │
//! │  1. Generator emits:   adc_gen::registry::ad_controls()        │
//! │                        → &'static [RegistryEntry]              │
//! │                               ↓                                │
//! │  2. Source wraps it:   StaticTableSource::load_mapping()       │
//! │                               ↓                                │
//! │  3. Resolver caches:   ControlResolver (loads once, lazily)    │
//! │                               ↓                                │
//! │  4. Caller resolves:   resolve("AdMob") → ProviderClass        │
//! │                                                                │
//! └────────────────────────────────────────────────────────────────┘
//! ```

pub mod control;
pub mod resolver;
pub mod source;

pub use control::{ProviderClass, ProviderControl, RegistryEntry};
pub use resolver::ControlResolver;
pub use source::{RegistrySource, StaticTableSource};
