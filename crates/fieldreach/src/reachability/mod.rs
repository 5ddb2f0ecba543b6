//! Reachability Analysis Module
//!
//! Answers: "Which objects can this root reach, and by what shortest field path?"
//! Uses bounded BFS over the fields reported by an
//! [`Introspector`](crate::introspect::Introspector), with identity-keyed
//! deduplication.

mod reducer;
mod types;
mod walker;

pub use reducer::reduce_by_class;
pub use types::*;
pub use walker::{explore, ReachabilityWalker};
