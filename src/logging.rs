//! Logging module using tracing-subscriber
//!
//! Log output goes to stderr so that the delegated CLI keeps stdout to itself.

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Default filter when RUST_LOG is not set
const DEFAULT_FILTER: &str = "warn";

/// Initialize the logging system
pub fn init_logging() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to init logger: {}", e))?;

    log::debug!("Logging initialized");

    Ok(())
}
