mod smoke_tests;

use crate::{CpuEvent, NetworkRecord, Node, ResourceGraph, ResourceType};

pub(crate) fn network(id: &str, url: &str, resource_type: ResourceType, bytes: u64) -> Node {
    Node::network(
        id,
        NetworkRecord::new(url, resource_type).with_transfer_size(bytes),
    )
}

pub(crate) fn cpu(id: &str, timestamp: u64, duration: u64) -> Node {
    Node::cpu(id, CpuEvent::new(timestamp, duration))
}

/// document -> {a.css, b.js}; a.css -> font; b.js -> eval task
pub(crate) fn sample_graph() -> ResourceGraph {
    ResourceGraph::from_parts(
        network("doc", "https://example.com/", ResourceType::Document, 10_000),
        [
            network("css", "https://example.com/a.css", ResourceType::Stylesheet, 20_000),
            network("js", "https://example.com/b.js", ResourceType::Script, 5_000),
            network("font", "https://example.com/f.woff2", ResourceType::Font, 30_000),
            cpu("eval", 1_000, 40_000),
        ],
        [
            ("doc".into(), "css".into()),
            ("doc".into(), "js".into()),
            ("css".into(), "font".into()),
            ("js".into(), "eval".into()),
        ],
    )
    .expect("sample graph is valid")
}
