//! Introspection errors.

use super::error_code::{self, ReachErrorCode};
use crate::introspect::ObjectId;

/// Errors raised by an [`Introspector`](crate::introspect::Introspector)
/// while enumerating the fields of an object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntrospectionError {
    #[error("object {object} no longer exists")]
    Dangling { object: ObjectId },

    #[error("access to the fields of object {object} was denied: {reason}")]
    AccessDenied { object: ObjectId, reason: String },

    #[error("introspection unsupported: {reason}")]
    Unsupported { reason: String },
}

impl ReachErrorCode for IntrospectionError {
    fn error_code(&self) -> &'static str {
        error_code::INTROSPECTION_ERROR
    }
}
