//! Stable error codes shared by every fieldreach error type.

/// Maps an error to a stable, machine-readable code.
pub trait ReachErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const INTROSPECTION_ERROR: &str = "INTROSPECTION_ERROR";
pub const WALK_ERROR: &str = "WALK_ERROR";
pub const ACCESS_ERROR: &str = "ACCESS_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
