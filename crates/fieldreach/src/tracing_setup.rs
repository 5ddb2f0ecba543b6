//! Structured logging setup.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the embedding application, which can call [`init`] for the default one.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::errors::ConfigError;

/// Span names as constants for programmatic use.
pub mod names {
    pub const WALK: &str = "fieldreach.walk";
}

/// Build the `EnvFilter` described by `config`.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
    let directives = config.effective_filter();
    EnvFilter::try_new(directives).map_err(|e| ConfigError::ValidationFailed {
        field: "logging.filter".to_string(),
        message: e.to_string(),
    })
}

/// Install a global fmt subscriber filtered per `config`.
///
/// Returns `Ok(false)` when a global subscriber was already installed.
pub fn init(config: &LoggingConfig) -> Result<bool, ConfigError> {
    let filter = env_filter(config)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.effective_with_target())
        .try_init()
        .is_ok();
    Ok(installed)
}
