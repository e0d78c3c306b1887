//! Generated source artifacts
//!
//! A [`SourceArtifact`] is one generated file: wrapper module, registry
//! module, or a module index wiring the generated tree together. Artifacts
//! are owned by the generation pass, written once, and overwritten wholesale
//! on the next pass.

/// One generated source file, ready for emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    /// Dotted generated package, e.g. `adc_gen.wrappers`
    pub package: String,
    /// File stem (without extension) inside the package directory
    pub file_stem: String,
    /// Primary type the artifact defines, for diagnostics; module indexes
    /// define no type and leave this empty
    pub type_name: String,
    /// Complete source text
    pub source: String,
}

impl SourceArtifact {
    /// Create an artifact
    pub fn new(
        package: impl Into<String>,
        file_stem: impl Into<String>,
        type_name: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            file_stem: file_stem.into(),
            type_name: type_name.into(),
            source: source.into(),
        }
    }

    /// Relative path of the emitted file below the output root
    pub fn relative_path(&self) -> String {
        let dir = self.package.replace('.', "/");
        format!("{dir}/{}.rs", self.file_stem)
    }
}
