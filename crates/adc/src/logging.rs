//! Structured logging with tracing
//!
//! The binary installs one process-wide subscriber; library crates only
//! emit events. Verbosity comes from the `ADC_LOG` environment variable
//! (`EnvFilter` syntax), defaulting to `info`.

use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter
pub const LOG_ENV: &str = "ADC_LOG";

/// Initialize logging for the CLI process
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
