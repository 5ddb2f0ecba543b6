//! Reachability types

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::introspect::ObjectId;
use crate::path::FieldPath;

/// Bounds for one walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkLimits {
    /// Number of field steps to follow from the root. `0` yields the root alone.
    pub max_depth: u32,
    /// Stop as soon as this many objects (root included) are known.
    /// `0` means unbounded.
    pub max_objects: u32,
}

impl WalkLimits {
    pub fn new(max_depth: u32, max_objects: u32) -> Self {
        Self {
            max_depth,
            max_objects,
        }
    }

    /// Depth-bounded walk with no object limit.
    pub fn depth(max_depth: u32) -> Self {
        Self::new(max_depth, 0)
    }

    /// True when `count` objects exhaust the object budget.
    pub(crate) fn is_full(&self, count: usize) -> bool {
        self.max_objects > 0 && count >= self.max_objects as usize
    }
}

/// One discovered object.
#[derive(Debug, Clone)]
pub struct ReachableObject<O, C> {
    pub id: ObjectId,
    pub object: O,
    pub class: C,
    /// Shortest path from the root; fixed at first discovery.
    pub path: FieldPath,
}

/// Identity-keyed map from discovered objects to their shortest path.
///
/// Entries keep discovery (breadth-first) order.
#[derive(Debug, Clone)]
pub struct ReachableObjects<O, C> {
    index: FxHashMap<ObjectId, usize>,
    entries: Vec<ReachableObject<O, C>>,
    depth_reached: u32,
    truncated: bool,
}

impl<O, C> ReachableObjects<O, C> {
    pub(crate) fn with_root(id: ObjectId, object: O, class: C) -> Self {
        let mut reachable = Self {
            index: FxHashMap::default(),
            entries: Vec::new(),
            depth_reached: 0,
            truncated: false,
        };
        reachable.insert(id, object, class, FieldPath::empty());
        reachable
    }

    /// Records a new object. Returns its entry index.
    ///
    /// Callers check [`contains`](Self::contains) first; an identity is never
    /// inserted twice.
    pub(crate) fn insert(&mut self, id: ObjectId, object: O, class: C, path: FieldPath) -> usize {
        debug_assert!(!self.index.contains_key(&id), "object {id} inserted twice");
        let slot = self.entries.len();
        self.index.insert(id, slot);
        self.entries.push(ReachableObject {
            id,
            object,
            class,
            path,
        });
        slot
    }

    pub(crate) fn entry(&self, slot: usize) -> &ReachableObject<O, C> {
        &self.entries[slot]
    }

    pub(crate) fn note_depth(&mut self, depth: u32) {
        self.depth_reached = self.depth_reached.max(depth);
    }

    pub(crate) fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&ReachableObject<O, C>> {
        self.index.get(&id).map(|&slot| &self.entries[slot])
    }

    pub fn path_of(&self, id: ObjectId) -> Option<&FieldPath> {
        self.get(id).map(|entry| &entry.path)
    }

    /// The root entry. Always present.
    pub fn root(&self) -> &ReachableObject<O, C> {
        &self.entries[0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in discovery order, root first.
    pub fn iter(&self) -> std::slice::Iter<'_, ReachableObject<O, C>> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    /// Deepest level at which an object was discovered.
    pub fn depth_reached(&self) -> u32 {
        self.depth_reached
    }

    /// Whether the object limit stopped the walk.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn into_entries(self) -> Vec<ReachableObject<O, C>> {
        self.entries
    }
}

impl<'a, O, C> IntoIterator for &'a ReachableObjects<O, C> {
    type Item = &'a ReachableObject<O, C>;
    type IntoIter = std::slice::Iter<'a, ReachableObject<O, C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Shortest path per class, in order of first appearance.
#[derive(Debug, Clone)]
pub struct ClassPaths<C> {
    index: FxHashMap<C, usize>,
    entries: Vec<(C, FieldPath)>,
}

impl<C: Eq + std::hash::Hash + Clone> ClassPaths<C> {
    pub(crate) fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            entries: Vec::new(),
        }
    }

    /// Keeps `path` for `class` if it is strictly shorter than the current one.
    pub(crate) fn offer(&mut self, class: &C, path: &FieldPath) {
        match self.index.get(class) {
            Some(&slot) => {
                let current = &mut self.entries[slot].1;
                *current = FieldPath::shortest(current.clone(), path.clone());
            }
            None => {
                self.index.insert(class.clone(), self.entries.len());
                self.entries.push((class.clone(), path.clone()));
            }
        }
    }

    pub fn get(&self, class: &C) -> Option<&FieldPath> {
        self.index.get(class).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&C, &FieldPath)> {
        self.entries.iter().map(|(class, path)| (class, path))
    }

    pub fn into_map(self) -> FxHashMap<C, FieldPath> {
        self.entries.into_iter().collect()
    }
}
