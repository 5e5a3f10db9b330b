mod property_tests;

use std::collections::BTreeSet;

use paintpath_graph::{CpuEvent, NetworkRecord, Node, ResourceGraph, ResourceType};

use crate::test_utils::TestSimulator;

pub(crate) const DOC_URL: &str = "https://example.com/";
pub(crate) const CSS_URL: &str = "https://example.com/app.css";
pub(crate) const JS_URL: &str = "https://example.com/app.js";

pub(crate) fn network(id: &str, url: &str, resource_type: ResourceType, bytes: u64) -> Node {
    Node::network(
        id,
        NetworkRecord::new(url, resource_type).with_transfer_size(bytes),
    )
}

pub(crate) fn cpu(id: &str, timestamp: u64, duration: u64) -> Node {
    Node::cpu(id, CpuEvent::new(timestamp, duration))
}

/// 100 ms round trip, 200 bytes per ms. A 10 kB document finishes at 150 ms.
pub(crate) fn simulator() -> TestSimulator {
    TestSimulator::new(100.0, 200.0)
}

/// document -> app.css
pub(crate) fn page_with_stylesheet(css_bytes: u64) -> ResourceGraph {
    ResourceGraph::from_parts(
        network("doc", DOC_URL, ResourceType::Document, 10_000),
        [network("css", CSS_URL, ResourceType::Stylesheet, css_bytes)],
        [("doc".into(), "css".into())],
    )
    .expect("stylesheet page is valid")
}

/// document -> app.js -> eval (50 ms of script evaluation)
pub(crate) fn page_with_script() -> ResourceGraph {
    ResourceGraph::from_parts(
        network("doc", DOC_URL, ResourceType::Document, 10_000),
        [
            network("js", JS_URL, ResourceType::Script, 20_000),
            cpu("eval", 2_000_000, 50_000),
        ],
        [("doc".into(), "js".into()), ("js".into(), "eval".into())],
    )
    .expect("script page is valid")
}

/// Edges as (dependency, dependent) id pairs, independent of insertion order.
pub(crate) fn edge_set(graph: &ResourceGraph) -> BTreeSet<(String, String)> {
    graph
        .nodes()
        .flat_map(|node| {
            graph
                .dependent_ids(&node.id)
                .map(|dependent| (node.id.to_string(), dependent.to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}
