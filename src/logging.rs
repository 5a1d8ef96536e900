//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise the filter from [`LoggingConfig`]
//! applies. Output goes to stderr.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{FrontError, Result};

/// Build the effective filter: `RUST_LOG` if set and valid, else `config.filter`.
///
/// # Errors
///
/// Returns [`FrontError::Logging`] if the configured directive cannot be parsed.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.filter)
        .map_err(|e| FrontError::Logging(format!("invalid filter `{}`: {e}", config.filter)))
}

/// Install the global fmt subscriber.
///
/// # Errors
///
/// Returns [`FrontError::Logging`] if the filter is invalid or a global
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| FrontError::Logging(e.to_string()))
}
