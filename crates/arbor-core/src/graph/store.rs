//! Graph store: node/edge tables indexed into a numeric representation.
//!
//! Loading assigns every node a contiguous internal index in `[0, N)` and
//! precomputes two parallel edge views: the directed list in input order
//! (rendering identity) and the canonical undirected candidate list
//! (solver input). The store is a read-only snapshot after `load` and can
//! be shared across concurrent retrievals.

use std::collections::HashMap;

use crate::error::{ArborError, ArborResult, ErrorCode};
use crate::types::{EdgeRecord, NodeId, NodeRecord};

/// Immutable, indexed node/edge-attributed graph.
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
    id_to_index: HashMap<NodeId, usize>,
    /// Directed internal index pairs, order-preserving with the input.
    edge_pairs: Vec<(usize, usize)>,
    /// Canonical `(min, max)` pairs, deduplicated, sorted ascending.
    candidates: Vec<(usize, usize)>,
    candidate_of_pair: HashMap<(usize, usize), usize>,
}

impl GraphStore {
    /// Load node and edge tables into an indexed store.
    ///
    /// Fails with a schema violation if a node id appears twice or an
    /// edge references an id absent from the node table. A zero-node
    /// table is accepted; retrieval against it reports `EmptyGraph`.
    pub fn load(nodes: Vec<NodeRecord>, edges: Vec<EdgeRecord>) -> ArborResult<Self> {
        let mut id_to_index = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if id_to_index.insert(node.node_id.clone(), index).is_some() {
                return Err(ArborError::schema_with_code(
                    format!("duplicate node id '{}'", node.node_id),
                    ErrorCode::SchemaDuplicateNode,
                ));
            }
        }

        let mut edge_pairs = Vec::with_capacity(edges.len());
        for (row, edge) in edges.iter().enumerate() {
            let src = *id_to_index.get(&edge.src).ok_or_else(|| {
                ArborError::schema_with_code(
                    format!("edge row {} references unknown node id '{}'", row, edge.src),
                    ErrorCode::SchemaUnknownNode,
                )
            })?;
            let dst = *id_to_index.get(&edge.dst).ok_or_else(|| {
                ArborError::schema_with_code(
                    format!("edge row {} references unknown node id '{}'", row, edge.dst),
                    ErrorCode::SchemaUnknownNode,
                )
            })?;
            edge_pairs.push((src, dst));
        }

        // Canonical undirected candidates: (min, max), deduped, sorted.
        // Self-loops carry no connectivity and are excluded.
        let mut candidates: Vec<(usize, usize)> = edge_pairs
            .iter()
            .filter(|(u, v)| u != v)
            .map(|&(u, v)| (u.min(v), u.max(v)))
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        let candidate_of_pair = candidates
            .iter()
            .enumerate()
            .map(|(i, &pair)| (pair, i))
            .collect();

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            candidates = candidates.len(),
            "graph store loaded"
        );

        Ok(Self {
            nodes,
            edges,
            id_to_index,
            edge_pairs,
            candidates,
            candidate_of_pair,
        })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node records in index order.
    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    /// All edge records in input order.
    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    /// Directed internal index pairs, order-preserving with the input.
    pub fn edge_index_pairs(&self) -> &[(usize, usize)] {
        &self.edge_pairs
    }

    /// Free text of the node at `index`.
    pub fn node_text(&self, index: usize) -> Option<&str> {
        self.nodes.get(index).map(|n| n.node_attr.as_str())
    }

    /// Free-text relation label of the edge at `row`.
    pub fn edge_text(&self, row: usize) -> Option<&str> {
        self.edges.get(row).map(|e| e.edge_attr.as_str())
    }

    /// Internal index of an external id.
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    /// External id of an internal index.
    pub fn external_id_of(&self, index: usize) -> Option<&NodeId> {
        self.nodes.get(index).map(|n| &n.node_id)
    }

    /// Canonical undirected edge candidates, sorted ascending by pair.
    pub fn undirected_candidates(&self) -> &[(usize, usize)] {
        &self.candidates
    }

    /// Candidate index of the canonical pair covering `(u, v)`, if any.
    pub fn candidate_index_of(&self, u: usize, v: usize) -> Option<usize> {
        self.candidate_of_pair.get(&(u.min(v), u.max(v))).copied()
    }

    /// Node texts in index order, for batch embedding.
    pub fn node_texts(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.node_attr.clone()).collect()
    }

    /// Edge relation texts in input order, for batch embedding.
    pub fn edge_texts(&self) -> Vec<String> {
        self.edges.iter().map(|e| e.edge_attr.clone()).collect()
    }
}
