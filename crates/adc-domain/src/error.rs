//! Error handling types

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ad-control
///
/// Generation-time variants are build-fatal: the pass that produced them is
/// considered failed and no partial output may be treated as valid.
/// [`Error::RegistryLoad`] is the one runtime variant and is recovered
/// locally by the resolver (lookups degrade to "not found").
#[derive(Error, Debug)]
pub enum Error {
    /// Two or more declarations share a provider name within one pass
    #[error("duplicate provider names: {}", names.join(", "))]
    DuplicateProviderNames {
        /// Every provider name that appeared more than once, sorted
        names: Vec<String>,
    },

    /// Two or more declarations derive the same wrapper type name
    #[error("conflicting wrapper names: {}", names.join(", "))]
    WrapperNameClash {
        /// Every derived wrapper name claimed by more than one declaration
        names: Vec<String>,
    },

    /// A declaration carries invalid attribute fields
    #[error("invalid provider declaration: {message}")]
    InvalidDeclaration {
        /// Description of the invalid field
        message: String,
    },

    /// A source file could not be read or parsed during discovery
    #[error("failed to scan {path}: {message}")]
    Scan {
        /// The file that failed to scan
        path: PathBuf,
        /// Description of the scan failure
        message: String,
    },

    /// A generated source file could not be persisted
    #[error("failed to write generated artifact {path}: {source}")]
    ArtifactWrite {
        /// The destination that could not be written
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The runtime resolver could not load the generated registry
    #[error("registry load failed: {message}")]
    RegistryLoad {
        /// Description of the load failure
        message: String,
    },

    /// Configuration-related error
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

// Generation error creation methods
impl Error {
    /// Create a duplicate-provider-names error from the collected set
    pub fn duplicate_provider_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::DuplicateProviderNames {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a wrapper-name-clash error from the collected set
    pub fn wrapper_name_clash<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::WrapperNameClash {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an invalid-declaration error
    pub fn invalid_declaration<S: Into<String>>(message: S) -> Self {
        Self::InvalidDeclaration {
            message: message.into(),
        }
    }

    /// Create a scan error
    pub fn scan<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Scan {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an artifact-write error
    pub fn artifact_write<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::ArtifactWrite {
            path: path.into(),
            source,
        }
    }
}

// Runtime and configuration error creation methods
impl Error {
    /// Create a registry-load error
    pub fn registry_load<S: Into<String>>(message: S) -> Self {
        Self::RegistryLoad {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
