//! Declaration discovery
//!
//! [`DeclarationDiscovery`] is the seam to the host build pipeline: each
//! generation pass asks it for a fresh, full snapshot of every type
//! currently carrying the `#[ad_provider(...)]` attribute, never an
//! incremental diff. The default [`SourceScanner`] walks the configured
//! source roots, parses each Rust file, and collects attributed structs.
//!
//! Attributed items that are not structs cannot act as providers and are
//! skipped with a warning. Unreadable or unparseable files are build
//! errors: silently skipping one could silently drop a provider from the
//! registry.

use std::fs;
use std::path::{Path, PathBuf};

use syn::visit::{self, Visit};
use tracing::{debug, warn};
use walkdir::WalkDir;

use adc_domain::{Declaration, Error, Result};

/// Name of the marker attribute on provider types
const PROVIDER_ATTRIBUTE: &str = "ad_provider";

/// Capability to enumerate the attributed declarations of one pass
pub trait DeclarationDiscovery {
    /// Return the full snapshot for this round, in discovery order
    fn discover(&self) -> Result<Vec<Declaration>>;
}

/// Filesystem scanner over one or more source roots
#[derive(Debug, Clone)]
pub struct SourceScanner {
    source_roots: Vec<PathBuf>,
}

impl SourceScanner {
    /// Create a scanner over the given source roots
    pub fn new<I, P>(source_roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            source_roots: source_roots.into_iter().map(Into::into).collect(),
        }
    }

    fn scan_file(&self, root: &Path, path: &Path) -> Result<Vec<Declaration>> {
        let text = fs::read_to_string(path).map_err(|e| Error::scan(path, e.to_string()))?;
        let file = syn::parse_file(&text).map_err(|e| Error::scan(path, e.to_string()))?;

        let mut visitor = DeclVisitor {
            path,
            module_path: module_path_of(root, path),
            found: Vec::new(),
            failure: None,
        };
        visitor.visit_file(&file);

        match visitor.failure {
            Some(error) => Err(error),
            None => Ok(visitor.found),
        }
    }
}

impl DeclarationDiscovery for SourceScanner {
    fn discover(&self) -> Result<Vec<Declaration>> {
        let mut declarations = Vec::new();

        for root in &self.source_roots {
            if !root.is_dir() {
                return Err(Error::config(format!(
                    "source root {} is not a directory",
                    root.display()
                )));
            }

            // Sorted traversal keeps discovery order stable across passes.
            for entry in WalkDir::new(root).sort_by_file_name() {
                let entry = entry.map_err(|e| Error::scan(root, e.to_string()))?;
                let path = entry.path();
                if entry.file_type().is_file()
                    && path.extension().is_some_and(|ext| ext == "rs")
                {
                    declarations.extend(self.scan_file(root, path)?);
                }
            }
        }

        debug!(declarations = declarations.len(), "discovery snapshot complete");
        Ok(declarations)
    }
}

/// Module path of a file's top-level items, relative to the source root
fn module_path_of(root: &Path, path: &Path) -> Vec<String> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut segments: Vec<String> = relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();

    if let Some(stem) = relative.file_stem().map(|s| s.to_string_lossy()) {
        // `mod.rs`, `lib.rs`, and `main.rs` speak for the enclosing module.
        if stem != "mod" && stem != "lib" && stem != "main" {
            segments.push(stem.into_owned());
        }
    }
    segments
}

/// Parsed fields of one `#[ad_provider(...)]` attribute
struct AttributeFields {
    name: String,
    sdk: bool,
}

fn provider_attribute(attrs: &[syn::Attribute]) -> Option<&syn::Attribute> {
    attrs.iter().find(|attr| {
        attr.path()
            .segments
            .last()
            .is_some_and(|segment| segment.ident == PROVIDER_ATTRIBUTE)
    })
}

fn parse_provider_attribute(attr: &syn::Attribute) -> syn::Result<AttributeFields> {
    let mut name: Option<String> = None;
    let mut sdk = true;

    match &attr.meta {
        syn::Meta::List(_) => {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: syn::LitStr = meta.value()?.parse()?;
                    name = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("sdk") {
                    let value: syn::LitBool = meta.value()?.parse()?;
                    sdk = value.value();
                    Ok(())
                } else {
                    Err(meta.error("unsupported ad_provider key; expected `name` or `sdk`"))
                }
            })?;
        }
        other => {
            return Err(syn::Error::new_spanned(
                other,
                "ad_provider requires arguments: #[ad_provider(name = \"...\")]",
            ));
        }
    }

    match name {
        Some(name) => Ok(AttributeFields { name, sdk }),
        None => Err(syn::Error::new_spanned(
            attr,
            "ad_provider requires a `name`",
        )),
    }
}

/// Syntax visitor collecting attributed structs under their module path
struct DeclVisitor<'a> {
    path: &'a Path,
    module_path: Vec<String>,
    found: Vec<Declaration>,
    failure: Option<Error>,
}

impl DeclVisitor<'_> {
    fn package_name(&self) -> String {
        self.module_path.join("::")
    }

    fn record(&mut self, ident: &syn::Ident, attr: &syn::Attribute) {
        let fields = match parse_provider_attribute(attr) {
            Ok(fields) => fields,
            Err(error) => {
                self.fail(Error::invalid_declaration(format!(
                    "`{ident}` in {}: {error}",
                    self.path.display()
                )));
                return;
            }
        };

        match Declaration::new(fields.name, fields.sdk, self.package_name(), ident.to_string()) {
            Ok(declaration) => {
                debug!(
                    provider = %declaration.provider_name,
                    package = %declaration.package_name,
                    "declaration discovered"
                );
                self.found.push(declaration);
            }
            Err(error) => self.fail(error),
        }
    }

    fn skip(&mut self, kind: &str, ident: &syn::Ident) {
        warn!(
            kind,
            item = %ident,
            file = %self.path.display(),
            "ad_provider on a non-struct item; not representable as a provider"
        );
    }

    fn fail(&mut self, error: Error) {
        // The first failure in a file decides the pass outcome.
        self.failure.get_or_insert(error);
    }
}

impl<'ast> Visit<'ast> for DeclVisitor<'_> {
    fn visit_item_struct(&mut self, item: &'ast syn::ItemStruct) {
        if let Some(attr) = provider_attribute(&item.attrs) {
            self.record(&item.ident, attr);
        }
    }

    fn visit_item_mod(&mut self, item: &'ast syn::ItemMod) {
        self.module_path.push(item.ident.to_string());
        visit::visit_item_mod(self, item);
        self.module_path.pop();
    }

    fn visit_item_enum(&mut self, item: &'ast syn::ItemEnum) {
        if provider_attribute(&item.attrs).is_some() {
            self.skip("enum", &item.ident);
        }
    }

    fn visit_item_trait(&mut self, item: &'ast syn::ItemTrait) {
        if provider_attribute(&item.attrs).is_some() {
            self.skip("trait", &item.ident);
        }
    }

    fn visit_item_fn(&mut self, item: &'ast syn::ItemFn) {
        if provider_attribute(&item.attrs).is_some() {
            self.skip("fn", &item.sig.ident);
        }
    }
}
