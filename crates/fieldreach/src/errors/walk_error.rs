//! Reachability walk errors.

use super::error_code::{self, ReachErrorCode};
use super::IntrospectionError;
use crate::introspect::ObjectId;

/// Errors that abort a reachability walk. No partial result accompanies them.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("failed to read fields of {object} at depth {depth} (path: {path}): {source}")]
    Introspection {
        object: ObjectId,
        /// Rendered [`FieldPath`](crate::path::FieldPath) of the failing object.
        path: String,
        depth: u32,
        #[source]
        source: IntrospectionError,
    },
}

impl WalkError {
    /// The underlying introspection failure.
    pub fn introspection_error(&self) -> &IntrospectionError {
        match self {
            Self::Introspection { source, .. } => source,
        }
    }
}

impl ReachErrorCode for WalkError {
    fn error_code(&self) -> &'static str {
        error_code::WALK_ERROR
    }
}
