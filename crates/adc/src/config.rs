//! Generator configuration
//!
//! Configuration sources are merged in this order (later sources override
//! earlier): defaults → TOML configuration file → `ADC_`-prefixed
//! environment variables. CLI flags override the loaded configuration in
//! `lib.rs` after the merge.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use adc_domain::{Error, Result};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "adc.toml";

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "ADC";

/// Settings for one generation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Source roots scanned for provider declarations
    pub source_roots: Vec<PathBuf>,
    /// Directory the generated `adc_gen` package is written below
    pub out_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source_roots: vec![PathBuf::from("src")],
            out_dir: PathBuf::from("src"),
        }
    }
}

/// Configuration loader service
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Configuration file path, when given explicitly
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration from all sources
    pub fn load(&self) -> Result<GeneratorConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(GeneratorConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                info!(path = %config_path.display(), "configuration loaded");
                figment = figment.merge(Toml::file(config_path));
            } else {
                warn!(path = %config_path.display(), "configuration file not found");
            }
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            info!(path = DEFAULT_CONFIG_FILE, "configuration loaded");
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }

        figment = figment.merge(Env::prefixed(&format!("{CONFIG_ENV_PREFIX}_")));

        let config: GeneratorConfig = figment
            .extract()
            .map_err(|e| Error::config(format!("failed to extract configuration: {e}")))?;

        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &GeneratorConfig) -> Result<()> {
    if config.source_roots.is_empty() {
        return Err(Error::config("at least one source root is required"));
    }
    if config.out_dir.as_os_str().is_empty() {
        return Err(Error::config("out_dir must not be empty"));
    }
    Ok(())
}
