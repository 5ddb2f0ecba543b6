//! Logging configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOG_FILTER: &str = "fieldreach=info";

/// Configuration for the `tracing` subscriber installed by
/// [`tracing_setup::init`](crate::tracing_setup::init).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives. Default: `fieldreach=info`.
    pub filter: Option<String>,
    /// Include event targets in output. Default: true.
    pub with_target: Option<bool>,
}

impl LoggingConfig {
    pub fn effective_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn effective_with_target(&self) -> bool {
        self.with_target.unwrap_or(true)
    }
}
