//! Reachability Walker - bounded breadth-first traversal
//!
//! Expands the graph one depth level at a time. An object is recorded the
//! first time its identity is seen; breadth-first order guarantees that first
//! sighting is at minimal depth, so recorded paths are never revisited.

use tracing::{debug, info, trace, warn};

use crate::errors::WalkError;
use crate::introspect::{Introspector, ObjectId};
use crate::tracing_setup::names;

use super::types::{ReachableObjects, WalkLimits};

/// Breadth-first walker over the object graph exposed by an introspector.
pub struct ReachabilityWalker<'a, I: Introspector> {
    introspector: &'a I,
    null_sentinel: Option<ObjectId>,
}

impl<'a, I: Introspector> ReachabilityWalker<'a, I> {
    /// Create a walker. The introspector's null sentinel is resolved here,
    /// once, and compared by identity during every walk.
    pub fn new(introspector: &'a I) -> Self {
        Self {
            introspector,
            null_sentinel: introspector.null_sentinel(),
        }
    }

    /// List every object reachable from `root` within the given limits,
    /// each with the shortest field path that reaches it.
    ///
    /// Fails only when the introspector fails; the walk is then abandoned.
    pub fn explore(
        &self,
        root: I::Object,
        limits: WalkLimits,
    ) -> Result<ReachableObjects<I::Object, I::Class>, WalkError> {
        let span = tracing::info_span!(
            names::WALK,
            max_depth = limits.max_depth,
            max_objects = limits.max_objects
        );
        let _guard = span.enter();

        let root_id = self.introspector.identity(&root);
        let root_class = self.introspector.class_of(&root);
        let mut reachable = ReachableObjects::with_root(root_id, root, root_class);

        if limits.is_full(reachable.len()) {
            reachable.mark_truncated();
            warn!(objects = 1, "object limit reached at the root");
            return Ok(reachable);
        }

        // Frontier entries are slots into `reachable`.
        let mut frontier: Vec<usize> = vec![0];

        for depth in 0..limits.max_depth {
            if frontier.is_empty() {
                break;
            }
            debug!(depth, frontier = frontier.len(), "expanding frontier");

            let mut next_frontier: Vec<usize> = Vec::new();

            for &slot in &frontier {
                let (object, path) = {
                    let entry = reachable.entry(slot);
                    (entry.object.clone(), entry.path.clone())
                };

                let fields = self.introspector.fields(&object).map_err(|source| {
                    WalkError::Introspection {
                        object: reachable.entry(slot).id,
                        path: path.to_string(),
                        depth,
                        source,
                    }
                })?;

                for (name, value) in fields {
                    let id = self.introspector.identity(&value);
                    if self.null_sentinel == Some(id) {
                        trace!(field = %name, "skipping introspector null sentinel");
                        continue;
                    }
                    if reachable.contains(id) {
                        continue;
                    }

                    let class = self.introspector.class_of(&value);
                    let child = reachable.insert(id, value, class, path.append(name));
                    reachable.note_depth(depth + 1);
                    next_frontier.push(child);

                    if limits.is_full(reachable.len()) {
                        reachable.mark_truncated();
                        warn!(
                            objects = reachable.len(),
                            depth = depth + 1,
                            "object limit reached, stopping walk"
                        );
                        return Ok(reachable);
                    }
                }
            }

            frontier = next_frontier;
        }

        info!(
            objects = reachable.len(),
            depth_reached = reachable.depth_reached(),
            "reachability walk complete"
        );
        Ok(reachable)
    }
}

/// One-shot form of [`ReachabilityWalker::explore`].
///
/// `max_objects == 0` means no object limit.
pub fn explore<I: Introspector>(
    introspector: &I,
    root: I::Object,
    max_depth: u32,
    max_objects: u32,
) -> Result<ReachableObjects<I::Object, I::Class>, WalkError> {
    ReachabilityWalker::new(introspector).explore(root, WalkLimits::new(max_depth, max_objects))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::IntrospectionError;
    use crate::introspect::Fields;
    use crate::path::FieldPath;
    use rustc_hash::FxHashMap;

    /// Adjacency-list graph: node `n` has the listed `(field, target)` edges.
    #[derive(Default)]
    struct TableGraph {
        edges: FxHashMap<u64, Vec<(String, u64)>>,
        broken: Option<u64>,
        sentinel: Option<u64>,
    }

    impl TableGraph {
        fn edge(mut self, from: u64, field: &str, to: u64) -> Self {
            self.edges
                .entry(from)
                .or_default()
                .push((field.to_string(), to));
            self
        }
    }

    impl Introspector for TableGraph {
        type Object = u64;
        type Class = &'static str;

        fn identity(&self, object: &u64) -> ObjectId {
            ObjectId::from_raw(*object)
        }

        fn class_of(&self, object: &u64) -> &'static str {
            if object % 2 == 0 { "Even" } else { "Odd" }
        }

        fn fields(&self, object: &u64) -> Result<Fields<u64>, IntrospectionError> {
            if self.broken == Some(*object) {
                return Err(IntrospectionError::AccessDenied {
                    object: ObjectId::from_raw(*object),
                    reason: "sealed".to_string(),
                });
            }
            Ok(self.edges.get(object).cloned().unwrap_or_default())
        }

        fn null_sentinel(&self) -> Option<ObjectId> {
            self.sentinel.map(ObjectId::from_raw)
        }
    }

    fn path(segments: &[&str]) -> FieldPath {
        segments.iter().copied().collect()
    }

    #[test]
    fn test_depth_zero_returns_root_only() {
        let graph = TableGraph::default().edge(1, "a", 2);
        let result = explore(&graph, 1, 0, 0).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.path_of(ObjectId::from_raw(1)),
            Some(&FieldPath::empty())
        );
        assert!(!result.is_truncated());
    }

    #[test]
    fn test_shared_child_recorded_once() {
        let graph = TableGraph::default().edge(1, "a", 2).edge(1, "b", 2);
        let result = explore(&graph, 1, 5, 0).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.path_of(ObjectId::from_raw(2)), Some(&path(&["a"])));
    }

    #[test]
    fn test_cycle_terminates() {
        let graph = TableGraph::default().edge(1, "next", 2).edge(2, "prev", 1);
        let result = explore(&graph, 1, 100, 0).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.depth_reached(), 1);
    }

    #[test]
    fn test_object_limit_stops_mid_level() {
        let graph = TableGraph::default()
            .edge(1, "a", 2)
            .edge(1, "b", 3)
            .edge(1, "c", 4);
        let result = explore(&graph, 1, 3, 3).unwrap();
        assert_eq!(result.len(), 3);
        assert!(result.is_truncated());
        assert!(!result.contains(ObjectId::from_raw(4)));
    }

    #[test]
    fn test_object_limit_of_one_keeps_root_only() {
        let graph = TableGraph::default().edge(1, "a", 2);
        let result = explore(&graph, 1, 3, 1).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.is_truncated());
    }

    #[test]
    fn test_sentinel_is_skipped_and_not_expanded() {
        let graph = TableGraph {
            sentinel: Some(9),
            ..TableGraph::default()
        }
        .edge(1, "key", 9)
        .edge(9, "behind", 10);
        let result = explore(&graph, 1, 4, 0).unwrap();
        assert_eq!(result.len(), 1);
        assert!(!result.contains(ObjectId::from_raw(9)));
        assert!(!result.contains(ObjectId::from_raw(10)));
    }

    #[test]
    fn test_introspection_failure_propagates() {
        let graph = TableGraph {
            broken: Some(2),
            ..TableGraph::default()
        }
        .edge(1, "child", 2)
        .edge(2, "grandchild", 3);

        let err = explore(&graph, 1, 4, 0).unwrap_err();
        match &err {
            WalkError::Introspection { object, path, depth, .. } => {
                assert_eq!(*object, ObjectId::from_raw(2));
                assert_eq!(path, "child");
                assert_eq!(*depth, 1);
            }
        }
        assert!(matches!(
            err.introspection_error(),
            IntrospectionError::AccessDenied { .. }
        ));
    }

    #[test]
    fn test_failure_beyond_depth_is_never_reached() {
        let graph = TableGraph {
            broken: Some(2),
            ..TableGraph::default()
        }
        .edge(1, "child", 2);
        let result = explore(&graph, 1, 1, 0).unwrap();
        assert_eq!(result.len(), 2);
    }
}
