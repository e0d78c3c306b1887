//! Wrapper synthesis
//!
//! For each accepted declaration, synthesizes the generated wrapper module:
//! a type embedding the original provider by value, derefing to it, and
//! exposing the two fixed accessors with the attribute values baked in as
//! literals. Nothing is re-read at run time.
//!
//! Synthesis is a pure function of the declaration: identical input yields
//! byte-identical source, which keeps regeneration a true no-op when
//! nothing changed.

use std::collections::BTreeMap;

use heck::ToSnakeCase;

use adc_domain::constants::{GENERATED_HEADER, WRAPPER_PACKAGE};
use adc_domain::{Declaration, SourceArtifact};

/// File stem of a wrapper module inside the wrappers package
pub fn module_name(declaration: &Declaration) -> String {
    declaration.wrapper_name().to_snake_case()
}

/// Synthesize the wrapper module for one accepted declaration
pub fn synthesize(declaration: &Declaration) -> SourceArtifact {
    let wrapper = declaration.wrapper_name();
    let original = declaration.qualified_name();
    let name_literal = format!("{:?}", declaration.provider_name);
    let is_sdk = declaration.is_sdk;
    let simple = &declaration.simple_name;

    let source = format!(
        r#"//! {GENERATED_HEADER}
//!
//! Control wrapper for `{original}`.

use adc_runtime::ProviderControl;

/// Generated control wrapper for the `{simple}` provider.
#[derive(Default)]
pub struct {wrapper} {{
    inner: {original},
}}

impl {wrapper} {{
    /// Provider name baked in at generation time.
    pub fn provider_name(&self) -> &'static str {{
        {name_literal}
    }}

    /// SDK flag baked in at generation time.
    pub fn is_sdk(&self) -> bool {{
        {is_sdk}
    }}
}}

impl ProviderControl for {wrapper} {{
    fn provider_name(&self) -> &'static str {{
        {name_literal}
    }}

    fn is_sdk(&self) -> bool {{
        {is_sdk}
    }}
}}

impl std::ops::Deref for {wrapper} {{
    type Target = {original};

    fn deref(&self) -> &Self::Target {{
        &self.inner
    }}
}}

impl std::ops::DerefMut for {wrapper} {{
    fn deref_mut(&mut self) -> &mut Self::Target {{
        &mut self.inner
    }}
}}
"#
    );

    SourceArtifact::new(WRAPPER_PACKAGE, module_name(declaration), wrapper, source)
}

/// Synthesize the wrappers package index
///
/// Declares one module per wrapper and re-exports every wrapper type so the
/// registry module can reference them through the package root.
pub fn synthesize_index(accepted: &BTreeMap<String, Declaration>) -> SourceArtifact {
    let mut mods = String::new();
    let mut uses = String::new();
    for declaration in accepted.values() {
        let module = module_name(declaration);
        let wrapper = declaration.wrapper_name();
        mods.push_str(&format!("pub mod {module};\n"));
        uses.push_str(&format!("pub use {module}::{wrapper};\n"));
    }

    let source = if accepted.is_empty() {
        format!("//! {GENERATED_HEADER}\n")
    } else {
        format!("//! {GENERATED_HEADER}\n\n{mods}\n{uses}")
    };

    SourceArtifact::new(WRAPPER_PACKAGE, "mod", "", source)
}
