//! fieldreach: bounded object reachability over field graphs
//!
//! This crate provides:
//! - Path: immutable field paths with length ordering and an "unknown" sentinel
//! - Introspect: the `Introspector` seam and identity handles
//! - Reachability: breadth-first walker and per-class reduction
//! - Heap: an arena object model implementing `Introspector`, with path accessors
//! - Config: layered TOML/env configuration
//! - Tracing setup: `tracing-subscriber` initialisation

pub mod config;
pub mod errors;
pub mod heap;
pub mod introspect;
pub mod path;
pub mod reachability;
pub mod tracing_setup;

// Re-exports for convenience
pub use config::{ConfigOverrides, LoggingConfig, ReachConfig, WalkConfig};
pub use errors::{AccessError, ConfigError, IntrospectionError, ReachErrorCode, WalkError};
pub use heap::{ClassDef, ClassId, FieldKind, Heap, HeapId, HeapType, PrimitiveKind, Value};
pub use introspect::{Fields, Introspector, ObjectId};
pub use path::FieldPath;
pub use reachability::{
    explore, reduce_by_class, ClassPaths, ReachabilityWalker, ReachableObject, ReachableObjects,
    WalkLimits,
};
