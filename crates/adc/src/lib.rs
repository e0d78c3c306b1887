//! Ad provider registry generator - CLI facade
//!
//! Wires configuration, logging, and the generation pipeline behind the
//! `adc` command:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `adc generate` | Run one generation pass and write the `adc_gen` package |
//! | `adc list` | Print discovered provider declarations without generating |

pub mod config;
pub mod logging;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::info;

use adc_codegen::{
    DeclarationDiscovery, FsEmitter, GenerationPass, SourceScanner, collision,
};
use adc_domain::Error;

use crate::config::{ConfigLoader, GeneratorConfig};

/// Command line interface for the ad-control generator
#[derive(Parser, Debug)]
#[command(name = "adc")]
#[command(about = "Ad provider registry generator")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (default: ./adc.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Generator subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one generation pass
    Generate {
        /// Source roots to scan (overrides configuration)
        #[arg(long = "source-root")]
        source_roots: Vec<PathBuf>,

        /// Directory to write the generated package below (overrides
        /// configuration)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// List discovered provider declarations without generating
    List {
        /// Source roots to scan (overrides configuration)
        #[arg(long = "source-root")]
        source_roots: Vec<PathBuf>,

        /// Emit the accepted declarations as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Generate {
            source_roots,
            out_dir,
        } => generate(load(cli.config, source_roots, out_dir)?),
        Command::List { source_roots, json } => list(load(cli.config, source_roots, None)?, json),
    }
}

fn load(
    config_path: Option<PathBuf>,
    source_roots: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
) -> anyhow::Result<GeneratorConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = config_path {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load().context("failed to load configuration")?;

    if !source_roots.is_empty() {
        config.source_roots = source_roots;
    }
    if let Some(out_dir) = out_dir {
        config.out_dir = out_dir;
    }
    Ok(config)
}

fn generate(config: GeneratorConfig) -> anyhow::Result<()> {
    let pass = GenerationPass::new(
        SourceScanner::new(config.source_roots),
        FsEmitter::new(config.out_dir),
    );
    let summary = pass.run().context("generation pass failed")?;

    if summary.is_noop() {
        info!("no provider declarations found; nothing generated");
    } else {
        info!(
            providers = summary.providers,
            artifacts = summary.written.len(),
            "registry generated"
        );
    }
    Ok(())
}

fn list(config: GeneratorConfig, json: bool) -> anyhow::Result<()> {
    let scanner = SourceScanner::new(config.source_roots);
    let declarations = scanner.discover().context("discovery failed")?;
    let result = collision::detect(&declarations);

    if json {
        let accepted: Vec<_> = result.accepted.values().collect();
        println!("{}", serde_json::to_string_pretty(&accepted)?);
    } else {
        for (name, declaration) in &result.accepted {
            println!(
                "{name}\tsdk={}\t{}",
                declaration.is_sdk,
                declaration.qualified_name()
            );
        }
    }

    if result.is_clean() {
        Ok(())
    } else {
        // The listing stays useful, but duplicated names are still a
        // build error.
        Err(Error::duplicate_provider_names(result.duplicates).into())
    }
}
