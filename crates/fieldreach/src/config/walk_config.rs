//! Walk configuration.

use serde::{Deserialize, Serialize};

use crate::reachability::WalkLimits;

/// Default number of field steps followed from the root.
pub const DEFAULT_MAX_DEPTH: u32 = 16;
/// Default object limit; `0` is unbounded.
pub const DEFAULT_MAX_OBJECTS: u32 = 0;

/// Bounds applied to reachability walks.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WalkConfig {
    /// Maximum traversal depth. Default: 16.
    pub max_depth: Option<u32>,
    /// Maximum number of objects, root included. `0` disables the limit. Default: 0.
    pub max_objects: Option<u32>,
}

impl WalkConfig {
    pub fn effective_max_depth(&self) -> u32 {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    pub fn effective_max_objects(&self) -> u32 {
        self.max_objects.unwrap_or(DEFAULT_MAX_OBJECTS)
    }

    pub fn limits(&self) -> WalkLimits {
        WalkLimits::new(self.effective_max_depth(), self.effective_max_objects())
    }
}
