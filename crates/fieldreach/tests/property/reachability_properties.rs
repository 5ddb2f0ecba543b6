use std::collections::VecDeque;

use fieldreach::{
    explore, reduce_by_class, ClassDef, ClassId, FieldPath, Heap, HeapId, Introspector, Value,
};
use proptest::prelude::*;

const FIELDS: [&str; 3] = ["f0", "f1", "f2"];

/// A heap of `n` nodes with three reference fields each, wired by `edges`
/// of `(from, field, to)`. A later edge on the same field overwrites.
fn build_heap(n: usize, edges: &[(usize, usize, usize)]) -> (Heap, Vec<HeapId>) {
    let mut heap = Heap::new();
    let node = heap.define_class(
        ClassDef::new("Node")
            .reference("f0")
            .reference("f1")
            .reference("f2"),
    );
    let nodes: Vec<HeapId> = (0..n).map(|_| heap.alloc_instance(node)).collect();
    for &(from, field, to) in edges {
        heap.set(nodes[from % n], FIELDS[field % 3], nodes[to % n])
            .unwrap();
    }
    (heap, nodes)
}

/// Plain BFS over the final field values: distance of each node from node 0.
fn distances(heap: &Heap, nodes: &[HeapId]) -> Vec<Option<u32>> {
    let mut dist = vec![None; nodes.len()];
    dist[0] = Some(0);
    let mut queue = VecDeque::from([0usize]);
    while let Some(i) = queue.pop_front() {
        let d = dist[i].unwrap();
        for field in FIELDS {
            if let Value::Ref(target) = heap.read_field(nodes[i], field).unwrap() {
                let j = nodes.iter().position(|&n| n == target).unwrap();
                if dist[j].is_none() {
                    dist[j] = Some(d + 1);
                    queue.push_back(j);
                }
            }
        }
    }
    dist
}

fn graph() -> impl Strategy<Value = (usize, Vec<(usize, usize, usize)>)> {
    (1usize..16).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0usize..3, 0..n), 0..40);
        (Just(n), edges)
    })
}

proptest! {
    #[test]
    fn paths_are_shortest((n, edges) in graph()) {
        let (heap, nodes) = build_heap(n, &edges);
        let dist = distances(&heap, &nodes);
        let result = explore(&heap, nodes[0], n as u32, 0).unwrap();

        for (i, node) in nodes.iter().enumerate() {
            let path = result.path_of(heap.identity(node));
            match dist[i] {
                Some(d) => prop_assert_eq!(path.map(FieldPath::len), Some(d as usize)),
                None => prop_assert!(path.is_none()),
            }
        }
        prop_assert!(!result.is_truncated());
    }

    #[test]
    fn depth_bound_is_respected((n, edges) in graph(), max_depth in 0u32..6) {
        let (heap, nodes) = build_heap(n, &edges);
        let dist = distances(&heap, &nodes);
        let result = explore(&heap, nodes[0], max_depth, 0).unwrap();

        let expected = dist
            .iter()
            .filter(|d| matches!(d, Some(d) if *d <= max_depth))
            .count();
        prop_assert_eq!(result.len(), expected);
        prop_assert!(result.depth_reached() <= max_depth);
        for entry in &result {
            prop_assert!(entry.path.len() <= max_depth as usize);
        }
    }

    #[test]
    fn object_bound_is_respected((n, edges) in graph(), max_objects in 1u32..20) {
        let (heap, nodes) = build_heap(n, &edges);
        let reachable = distances(&heap, &nodes)
            .iter()
            .filter(|d| d.is_some())
            .count();
        let result = explore(&heap, nodes[0], n as u32, max_objects).unwrap();

        prop_assert_eq!(result.len(), reachable.min(max_objects as usize));
        if reachable > max_objects as usize {
            prop_assert!(result.is_truncated());
        }
    }

    #[test]
    fn root_first_with_empty_path((n, edges) in graph(), max_depth in 0u32..6) {
        let (heap, nodes) = build_heap(n, &edges);
        let result = explore(&heap, nodes[0], max_depth, 0).unwrap();

        prop_assert_eq!(result.root().object, nodes[0]);
        prop_assert_eq!(&result.root().path, &FieldPath::empty());
        prop_assert_eq!(result.iter().filter(|e| e.path.is_empty()).count(), 1);
    }

    #[test]
    fn every_path_resolves((n, edges) in graph()) {
        let (heap, nodes) = build_heap(n, &edges);
        let result = explore(&heap, nodes[0], n as u32, 0).unwrap();

        for entry in &result {
            prop_assert_eq!(
                heap.resolve(nodes[0], &entry.path).unwrap(),
                Value::Ref(entry.object)
            );
        }
    }

    #[test]
    fn null_key_never_reported(
        (n, edges) in graph(),
        values in prop::collection::vec(0usize..16, 1..4),
    ) {
        let (mut heap, nodes) = build_heap(n, &edges);
        let holder = heap.define_class(
            ClassDef::new("Holder")
                .reference("node")
                .reference("table"),
        );
        let root = heap.alloc_instance(holder);
        let entries: Vec<(Option<HeapId>, HeapId)> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let key = if i == 0 { None } else { Some(nodes[v % n]) };
                (key, nodes[v % n])
            })
            .collect();
        let table = heap.alloc_identity_table(&entries);
        heap.set(root, "node", nodes[0]).unwrap();
        heap.set(root, "table", table).unwrap();

        let result = explore(&heap, root, n as u32 + 3, 0).unwrap();
        prop_assert!(!result.contains(heap.null_sentinel().unwrap()));
        prop_assert!(result.contains(heap.identity(&table)));
    }

    #[test]
    fn class_reduction_keeps_minimum((n, edges) in graph()) {
        let (heap, nodes) = build_heap(n, &edges);
        let result = explore(&heap, nodes[0], n as u32, 0).unwrap();
        let classes = reduce_by_class(&result);

        // Every node shares one class; the root's empty path is the minimum.
        prop_assert_eq!(classes.len(), 1);
        let class = heap.class_of(&nodes[0]);
        prop_assert_eq!(classes.get(&class), Some(&FieldPath::empty()));
        prop_assert_ne!(class, fieldreach::HeapType::Instance(ClassId::OBJECT));
    }
}
