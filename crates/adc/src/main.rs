//! ad-control generator - entry point
//!
//! Binary entry point for the `adc` CLI. Lives in the facade crate next to
//! the library so integration tests can drive the same `run` path the
//! binary uses.

use clap::Parser;

use adc::{Cli, logging, run};

fn main() -> anyhow::Result<()> {
    logging::init();
    run(Cli::parse())
}
