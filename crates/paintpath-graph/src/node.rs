use serde::{Deserialize, Serialize};

use super::NodeId;

/// A task in the page-load schedule: either a network fetch or a block of
/// main-thread CPU work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
}

/// Payload of a node, tagged by node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeKind {
    Network(NetworkRecord),
    Cpu(CpuEvent),
}

/// Discriminant-only view of [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Network,
    Cpu,
}

impl Node {
    pub fn network(id: impl Into<NodeId>, record: NetworkRecord) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Network(record),
        }
    }

    pub fn cpu(id: impl Into<NodeId>, event: CpuEvent) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Cpu(event),
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Network(_) => NodeType::Network,
            NodeKind::Cpu(_) => NodeType::Cpu,
        }
    }

    pub fn as_network(&self) -> Option<&NetworkRecord> {
        match &self.kind {
            NodeKind::Network(record) => Some(record),
            NodeKind::Cpu(_) => None,
        }
    }

    pub fn as_cpu(&self) -> Option<&CpuEvent> {
        match &self.kind {
            NodeKind::Cpu(event) => Some(event),
            NodeKind::Network(_) => None,
        }
    }

    /// URL of the fetched resource, for network nodes.
    pub fn url(&self) -> Option<&str> {
        self.as_network().map(|record| record.url.as_str())
    }

    /// True for network nodes whose resource is a stylesheet.
    pub fn is_stylesheet(&self) -> bool {
        self.as_network()
            .is_some_and(|record| record.resource_type == ResourceType::Stylesheet)
    }
}

/// Network request backing a [`NodeKind::Network`] node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRecord {
    pub url: String,
    /// Bytes transferred over the wire, headers included.
    pub transfer_size: u64,
    pub resource_type: ResourceType,
}

impl NetworkRecord {
    pub fn new(url: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            url: url.into(),
            transfer_size: 0,
            resource_type,
        }
    }

    pub fn with_transfer_size(mut self, transfer_size: u64) -> Self {
        self.transfer_size = transfer_size;
        self
    }
}

/// Resource category as reported by the network log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Document,
    Stylesheet,
    Script,
    Image,
    Font,
    Media,
    Xhr,
    Fetch,
    #[serde(other)]
    Other,
}

/// Main-thread task backing a [`NodeKind::Cpu`] node.
///
/// `timestamp` and `duration` are trace microseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuEvent {
    pub pid: u32,
    pub tid: u32,
    pub timestamp: u64,
    pub duration: u64,
    #[serde(default)]
    pub child_events: Vec<TraceEvent>,
}

impl CpuEvent {
    /// Create a top-level task on the main renderer thread.
    pub fn new(timestamp: u64, duration: u64) -> Self {
        Self {
            pid: 1,
            tid: 1,
            timestamp,
            duration,
            child_events: Vec::new(),
        }
    }

    pub fn with_child_events(mut self, child_events: Vec<TraceEvent>) -> Self {
        self.child_events = child_events;
        self
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration as f64 / 1000.0
    }
}

/// A trace event nested under a CPU task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub name: String,
    pub ts: u64,
    #[serde(default)]
    pub dur: u64,
}
