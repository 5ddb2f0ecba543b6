//! Class reduction: shortest path per class.

use std::hash::Hash;

use super::types::{ClassPaths, ReachableObjects};

/// Reduce per-object paths to the shortest path per class.
///
/// Ties keep the entry seen first in discovery order. An unknown path only
/// survives when every object of its class has one.
pub fn reduce_by_class<O, C>(reachable: &ReachableObjects<O, C>) -> ClassPaths<C>
where
    C: Clone + Eq + Hash,
{
    let mut classes = ClassPaths::new();
    for entry in reachable {
        classes.offer(&entry.class, &entry.path);
    }
    classes
}
