//! Smoke tests for paintpath-graph.
//!
//! Fast, deterministic checks of the basic graph contract. Randomized
//! coverage lives in property_tests.rs.

use super::{cpu, network, sample_graph};
use crate::{GraphError, NodeId, ResourceGraph, ResourceType};

#[test]
fn test_dependency_dependent_symmetry() {
    let graph = sample_graph();

    for node in graph.nodes() {
        for dependent in graph.dependent_ids(&node.id) {
            assert!(
                graph.dependency_ids(dependent).any(|id| *id == node.id),
                "{dependent} should list {} as a dependency",
                node.id
            );
        }
    }
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn test_root_has_no_dependencies() {
    let graph = sample_graph();
    assert_eq!(graph.root_id(), &NodeId::new("doc"));
    assert!(graph.dependencies(graph.root_id()).is_empty());
}

#[test]
fn test_traverse_covers_all_reachable_nodes_once() {
    let graph = sample_graph();
    let mut visited = Vec::new();
    graph.traverse(&"doc".into(), |node| visited.push(node.id.clone()));

    visited.sort();
    assert_eq!(visited.len(), 5);
    visited.dedup();
    assert_eq!(visited.len(), 5);
}

#[test]
fn test_traverse_from_inner_node() {
    let graph = sample_graph();
    let ids = graph.reachable_ids(&"css".into());

    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&NodeId::new("css")));
    assert!(ids.contains(&NodeId::new("font")));
}

#[test]
fn test_traverse_unknown_start_visits_nothing() {
    let graph = sample_graph();
    let mut count = 0;
    graph.traverse(&"missing".into(), |_| count += 1);
    assert_eq!(count, 0);
}

#[test]
fn test_traverse_diamond_visits_shared_dependent_once() {
    let graph = ResourceGraph::from_parts(
        network("doc", "https://example.com/", ResourceType::Document, 1),
        [
            network("a", "https://example.com/a.css", ResourceType::Stylesheet, 1),
            network("b", "https://example.com/b.css", ResourceType::Stylesheet, 1),
            cpu("layout", 0, 1),
        ],
        [
            ("doc".into(), "a".into()),
            ("doc".into(), "b".into()),
            ("a".into(), "layout".into()),
            ("b".into(), "layout".into()),
        ],
    )
    .unwrap();

    let mut layout_visits = 0;
    graph.traverse(graph.root_id(), |node| {
        if node.id.as_str() == "layout" {
            layout_visits += 1;
        }
    });
    assert_eq!(layout_visits, 1);
}

#[test]
fn test_add_dependent_attaches_to_root() {
    let mut graph = sample_graph();
    let id = graph.add_dependent(cpu("merged", 500, 1_000)).unwrap();

    assert_eq!(id, NodeId::new("merged"));
    let dependencies: Vec<_> = graph.dependency_ids(&id).cloned().collect();
    assert_eq!(dependencies, vec![NodeId::new("doc")]);
    assert!(graph.dependent_ids(graph.root_id()).any(|dep| *dep == id));
}

#[test]
fn test_duplicate_node_rejected() {
    let mut graph = sample_graph();
    let err = graph
        .add_node(cpu("eval", 0, 1))
        .expect_err("duplicate id must be rejected");
    assert!(matches!(err, GraphError::DuplicateNode(id) if id.as_str() == "eval"));
}

#[test]
fn test_edges_require_known_nodes() {
    let mut graph = sample_graph();
    let err = graph
        .add_dependency(&"ghost".into(), &"doc".into())
        .expect_err("unknown dependent");
    assert!(matches!(err, GraphError::UnknownNode(_)));
}

#[test]
fn test_root_cannot_gain_dependency() {
    let mut graph = sample_graph();
    let err = graph
        .add_dependency(&"doc".into(), &"css".into())
        .expect_err("root must stay a source");
    assert!(matches!(err, GraphError::RootDependency(_)));

    let err = graph
        .add_dependency(&"css".into(), &"css".into())
        .expect_err("self edge");
    assert!(matches!(err, GraphError::SelfDependency(_)));
}

#[test]
fn test_snapshot_round_trip_preserves_structure() {
    let graph = sample_graph();
    let json = graph.to_json().unwrap();
    let restored = ResourceGraph::from_json(&json).unwrap();

    assert_eq!(restored.to_snapshot(), graph.to_snapshot());
}

#[test]
fn test_snapshot_with_missing_root_is_rejected() {
    let mut snapshot = sample_graph().to_snapshot();
    snapshot.root = NodeId::new("nowhere");

    let err = ResourceGraph::from_snapshot(snapshot).expect_err("root must exist");
    assert!(matches!(err, GraphError::MissingRoot(_)));
}

#[test]
fn test_snapshot_with_dangling_edge_is_rejected() {
    let mut snapshot = sample_graph().to_snapshot();
    snapshot.edges.push(crate::EdgeSnapshot {
        dependency: "css".into(),
        dependent: "gone".into(),
    });

    let err = ResourceGraph::from_snapshot(snapshot).expect_err("dangling edge");
    assert!(matches!(err, GraphError::UnknownNode(id) if id.as_str() == "gone"));
}
