//! Top-level fieldreach configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{LoggingConfig, WalkConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "fieldreach.toml";

pub const ENV_MAX_DEPTH: &str = "FIELDREACH_MAX_DEPTH";
pub const ENV_MAX_OBJECTS: &str = "FIELDREACH_MAX_OBJECTS";
pub const ENV_LOG: &str = "FIELDREACH_LOG";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`FIELDREACH_*`)
/// 3. Project config (`fieldreach.toml` in project root)
/// 4. User config (`~/.fieldreach/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ReachConfig {
    pub walk: WalkConfig,
    pub logging: LoggingConfig,
}

/// Caller-supplied values that override every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_depth: Option<u32>,
    pub max_objects: Option<u32>,
    pub log_filter: Option<String>,
}

impl ReachConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        // Unreadable user config falls back to defaults.
                        tracing::warn!(error = %e, "ignoring user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &ReachConfig) -> Result<(), ConfigError> {
        if let Some(filter) = &config.logging.filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "logging.filter".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        crate::tracing_setup::env_filter(&config.logging)?;
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    fn user_config_path() -> Option<PathBuf> {
        Some(home_dir()?.join(".fieldreach").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut ReachConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ReachConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut ReachConfig, other: &ReachConfig) {
        if other.walk.max_depth.is_some() {
            base.walk.max_depth = other.walk.max_depth;
        }
        if other.walk.max_objects.is_some() {
            base.walk.max_objects = other.walk.max_objects;
        }
        if other.logging.filter.is_some() {
            base.logging.filter = other.logging.filter.clone();
        }
        if other.logging.with_target.is_some() {
            base.logging.with_target = other.logging.with_target;
        }
    }

    /// Apply environment variable overrides. Unparseable values are ignored.
    fn apply_env_overrides(config: &mut ReachConfig) {
        if let Ok(val) = std::env::var(ENV_MAX_DEPTH) {
            if let Ok(v) = val.parse::<u32>() {
                config.walk.max_depth = Some(v);
            }
        }
        if let Ok(val) = std::env::var(ENV_MAX_OBJECTS) {
            if let Ok(v) = val.parse::<u32>() {
                config.walk.max_objects = Some(v);
            }
        }
        if let Ok(val) = std::env::var(ENV_LOG) {
            config.logging.filter = Some(val);
        }
    }

    fn apply_overrides(config: &mut ReachConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.max_depth {
            config.walk.max_depth = Some(v);
        }
        if let Some(v) = overrides.max_objects {
            config.walk.max_objects = Some(v);
        }
        if let Some(ref v) = overrides.log_filter {
            config.logging.filter = Some(v.clone());
        }
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
