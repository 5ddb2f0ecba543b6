//! Configuration system for fieldreach.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod logging_config;
pub mod reach_config;
pub mod walk_config;

pub use logging_config::LoggingConfig;
pub use reach_config::{ConfigOverrides, ReachConfig};
pub use walk_config::WalkConfig;
