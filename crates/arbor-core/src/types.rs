//! Input table row types for the knowledge graph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// External node identifier: an integer or a string key.
///
/// The original-id space is opaque to the retrieval pipeline; ids only
/// need to be hashable and stable. Integer ids are kept distinct from
/// string ids, so `1` and `"1"` are different nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    /// Integer identifier.
    Int(i64),
    /// String identifier.
    Text(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(n) => write!(f, "{}", n),
            NodeId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Int(n)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Text(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId::Text(s)
    }
}

/// One row of the node table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Unique external identifier.
    pub node_id: NodeId,
    /// Free-text label/description used for embedding and rendering.
    pub node_attr: String,
}

impl NodeRecord {
    /// Create a new node record.
    pub fn new(node_id: impl Into<NodeId>, node_attr: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            node_attr: node_attr.into(),
        }
    }
}

/// One row of the edge table. Directed as given in the source data; the
/// solver works on the undirected projection, but direction and label are
/// preserved for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source node id.
    pub src: NodeId,
    /// Free-text relation label.
    pub edge_attr: String,
    /// Target node id.
    pub dst: NodeId,
}

impl EdgeRecord {
    /// Create a new edge record.
    pub fn new(
        src: impl Into<NodeId>,
        edge_attr: impl Into<String>,
        dst: impl Into<NodeId>,
    ) -> Self {
        Self {
            src: src.into(),
            edge_attr: edge_attr.into(),
            dst: dst.into(),
        }
    }
}
