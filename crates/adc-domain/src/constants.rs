//! Fixed naming conventions for generated code
//!
//! The generator and the runtime resolver never exchange objects directly;
//! they meet only at the fixed package and symbol names defined here. Both
//! sides must agree on these constants, so they live in the domain crate.

/// Root generated package. Everything the generator emits lives below it,
/// isolated from hand-written provider packages.
pub const GEN_PACKAGE: &str = "adc_gen";

/// Generated package holding one wrapper module per accepted provider
pub const WRAPPER_PACKAGE: &str = "adc_gen.wrappers";

/// Generated package holding the single registry module
pub const REGISTRY_PACKAGE: &str = "adc_gen.registry";

/// Suffix appended to a declaration's simple name to derive its wrapper name
pub const WRAPPER_SUFFIX: &str = "Imp";

/// Name of the static provider table inside the registry module
pub const REGISTRY_TABLE: &str = "AD_CONTROLS";

/// Fixed accessor symbol the runtime loads the provider table through
pub const REGISTRY_ACCESSOR: &str = "ad_controls";

/// Header line stamped on every generated file
pub const GENERATED_HEADER: &str = "Generated by adc. Do not edit.";
