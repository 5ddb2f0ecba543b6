//! Field accessor errors.

use super::error_code::{self, ReachErrorCode};
use crate::heap::HeapId;

/// Errors raised by the path-based field accessors of the
/// [`Heap`](crate::heap::Heap).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("class {class} has no field named `{field}`")]
    NoSuchField { class: String, field: String },

    #[error("class {class} has no static field named `{field}`")]
    NoSuchStatic { class: String, field: String },

    #[error("`{segment}` is not a valid array index")]
    InvalidIndex { segment: String },

    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("cannot follow `{segment}`: the value is null")]
    NullTraversal { segment: String },

    #[error("cannot follow `{segment}`: the value is a primitive")]
    NotAReference { segment: String },

    #[error("field `{field}` cannot hold that value")]
    TypeMismatch { field: String },

    #[error("an unknown path cannot be resolved")]
    UnknownPath,

    #[error("a write needs at least one path segment")]
    EmptyPath,

    #[error("object {0} no longer exists")]
    Dangling(HeapId),
}

impl ReachErrorCode for AccessError {
    fn error_code(&self) -> &'static str {
        error_code::ACCESS_ERROR
    }
}
