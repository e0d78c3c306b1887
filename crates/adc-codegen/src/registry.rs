//! Registry synthesis
//!
//! Produces the single registry module for a pass: a static table mapping
//! every accepted provider name to its wrapper's class handle, the fixed
//! accessor function the runtime loads the table through, and a process-wide
//! resolver bound to the table. Entries are emitted in sorted name order so
//! regeneration is reproducible; the runtime treats the table as an
//! unordered mapping.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use heck::ToSnakeCase;

use adc_domain::constants::{
    GENERATED_HEADER, GEN_PACKAGE, REGISTRY_ACCESSOR, REGISTRY_PACKAGE, REGISTRY_TABLE,
};
use adc_domain::{Declaration, SourceArtifact};

/// Synthesize the registry module over the accepted declarations
pub fn synthesize(accepted: &BTreeMap<String, Declaration>) -> SourceArtifact {
    let mut constructors = String::new();
    let mut entries = String::new();

    for declaration in accepted.values() {
        let wrapper = declaration.wrapper_name();
        let constructor = format!("new_{}", wrapper.to_snake_case());
        let name_literal = format!("{:?}", declaration.provider_name);
        let is_sdk = declaration.is_sdk;

        let _ = write!(
            constructors,
            "\nfn {constructor}() -> Box<dyn ProviderControl> {{\n    Box::new(wrappers::{wrapper}::default())\n}}\n"
        );
        let _ = write!(
            entries,
            "    RegistryEntry {{\n        name: {name_literal},\n        class: ProviderClass {{\n            type_name: \"adc_gen::wrappers::{wrapper}\",\n            provider_name: {name_literal},\n            is_sdk: {is_sdk},\n            construct: {constructor},\n        }},\n    }},\n"
        );
    }

    let table = if accepted.is_empty() {
        format!("pub static {REGISTRY_TABLE}: &[RegistryEntry] = &[];\n")
    } else {
        format!("pub static {REGISTRY_TABLE}: &[RegistryEntry] = &[\n{entries}];\n")
    };

    let source = format!(
        r#"//! {GENERATED_HEADER}
//!
//! Static provider registry: one entry per accepted declaration, built
//! exactly once at process load.

use std::sync::OnceLock;

use adc_runtime::{{
    ControlResolver, ProviderClass, ProviderControl, RegistryEntry, StaticTableSource,
}};

use super::wrappers;
{constructors}
/// Provider name → wrapper class table.
{table}
/// Fixed accessor the runtime resolver loads the table through.
pub fn {REGISTRY_ACCESSOR}() -> &'static [RegistryEntry] {{
    {REGISTRY_TABLE}
}}

/// Process-wide resolver bound to this registry.
pub fn resolver() -> &'static ControlResolver {{
    static RESOLVER: OnceLock<ControlResolver> = OnceLock::new();
    RESOLVER.get_or_init(|| ControlResolver::new(StaticTableSource::new({REGISTRY_ACCESSOR})))
}}
"#
    );

    SourceArtifact::new(REGISTRY_PACKAGE, "mod", "AdControls", source)
}

/// Synthesize the root index of the generated package
///
/// Constant content: the root module only wires the two fixed sub-packages
/// together and shields the host from dead-code warnings when it references
/// the registry through the resolver alone.
pub fn synthesize_root_index() -> SourceArtifact {
    let source = format!(
        r#"//! {GENERATED_HEADER}
//!
//! Generated provider package. Regenerated wholesale on every pass.
#![allow(dead_code)]

pub mod registry;
pub mod wrappers;
"#
    );

    SourceArtifact::new(GEN_PACKAGE, "mod", "", source)
}
