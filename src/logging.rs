//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. `RUST_LOG` environment variable
//! 2. `--verbose` (debug for this crate)
//! 3. `[logging].filter` from configuration
//!
//! Logs always go to stderr so they never mix with captured program output.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Filter used by `--verbose`
const VERBOSE_FILTER: &str = "execp=debug";

/// Initialise the global logging subscriber.
///
/// Call once at startup.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = build_filter(config, verbose)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))
}

fn build_filter(config: &LoggingConfig, verbose: bool) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directive = if verbose { VERBOSE_FILTER } else { config.filter.as_str() };
    EnvFilter::try_new(directive).with_context(|| format!("Invalid log filter '{}'", directive))
}
