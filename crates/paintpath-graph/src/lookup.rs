//! URL-keyed lookup of network nodes.

use rustc_hash::FxHashMap as HashMap;

use super::{Node, NodeId};

/// Maps a request URL to the network node that fetched it.
///
/// Built once from a node collection. When several nodes share a URL the last
/// one enumerated wins; CPU nodes are never indexed.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    by_url: HashMap<String, NodeId>,
}

impl NodeIndex {
    pub fn from_nodes<'a, I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let mut by_url = HashMap::default();
        for node in nodes {
            if let Some(url) = node.url() {
                by_url.insert(url.to_string(), node.id.clone());
            }
        }
        Self { by_url }
    }

    /// Node that fetched `url`, if the network log tracked it.
    pub fn get(&self, url: &str) -> Option<&NodeId> {
        self.by_url.get(url)
    }

    pub fn len(&self) -> usize {
        self.by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }
}
