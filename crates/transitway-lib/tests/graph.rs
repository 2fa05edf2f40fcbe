mod common;

use common::{bus, walk};

use transitway_lib::{EdgeKind, Error, TransitGraph};

#[test]
fn endpoints_intern_once_across_records() {
    let graph = TransitGraph::from_records(&[
        walk("A", "B", 1.0),
        walk("B", "C", 2.0),
        walk("C", "A", 3.0),
    ])
    .expect("graph builds");

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);

    let a = graph.resolve("A").expect("A interned");
    assert_eq!(graph.node(a).name, "Alpha");
    assert_eq!(graph.neighbours(a).len(), 1);
}

#[test]
fn duplicate_edges_of_same_kind_are_suppressed() {
    let graph = TransitGraph::from_records(&[
        bus("A", "B", 1.0, 7),
        bus("A", "B", 9.0, 12),
        walk("A", "B", 1.5),
    ])
    .expect("graph builds");

    let a = graph.resolve("A").expect("A interned");
    let edges = graph.neighbours(a);

    // The second bus record duplicates (A, B, bus) and is dropped; the walk
    // link is a different kind and survives.
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0].kind, EdgeKind::Bus);
    assert_eq!(edges[0].distance, 1.0, "first record wins");
    assert_eq!(edges[1].kind, EdgeKind::Walk);
}

#[test]
fn reverse_direction_is_not_a_duplicate() {
    let graph = TransitGraph::from_records(&[walk("A", "B", 1.0), walk("B", "A", 1.0)])
        .expect("graph builds");

    let a = graph.resolve("A").expect("A interned");
    let b = graph.resolve("B").expect("B interned");
    assert_eq!(graph.neighbours(a).len(), 1);
    assert_eq!(graph.neighbours(b).len(), 1);
}

#[test]
fn negative_distance_is_a_fatal_construction_error() {
    let error = TransitGraph::from_records(&[walk("A", "B", -1.0)]).expect_err("must fail");
    assert!(matches!(error, Error::InvalidRecord { .. }));
    assert!(error.to_string().contains("invalid distance"));
}

#[test]
fn non_finite_distance_is_a_fatal_construction_error() {
    let error =
        TransitGraph::from_records(&[walk("A", "B", f64::NAN)]).expect_err("must fail");
    assert!(matches!(error, Error::InvalidRecord { .. }));
}

#[test]
fn unknown_stop_has_no_neighbours() {
    let graph = TransitGraph::from_records(&[walk("A", "B", 1.0)]).expect("graph builds");
    assert!(graph.neighbours(99).is_empty());
    assert_eq!(graph.resolve("Z"), None);
}

#[test]
fn edge_ordering_uses_distance_only() {
    let graph = TransitGraph::from_records(&[bus("A", "B", 5.0, 7), walk("A", "C", 2.0)])
        .expect("graph builds");
    let a = graph.resolve("A").expect("A interned");
    let edges = graph.neighbours(a);
    assert!(edges[1] < edges[0], "2.0 km edge orders below 5.0 km edge");
}

#[test]
fn first_record_fixes_node_fields() {
    let mut renamed = walk("A", "B", 1.0);
    renamed.source_name = "Alpha Gate".to_string();

    let graph =
        TransitGraph::from_records(&[renamed, walk("A", "C", 1.0)]).expect("graph builds");
    let a = graph.resolve("A").expect("A interned");
    assert_eq!(graph.node(a).name, "Alpha Gate");
}
