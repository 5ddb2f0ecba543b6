//! Error handling for fieldreach.
//! One error enum per subsystem, `thiserror` only.

pub mod access_error;
pub mod config_error;
pub mod error_code;
pub mod introspection_error;
pub mod walk_error;

pub use access_error::AccessError;
pub use config_error::ConfigError;
pub use error_code::ReachErrorCode;
pub use introspection_error::IntrospectionError;
pub use walk_error::WalkError;
