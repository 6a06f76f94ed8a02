//! Projection of solver output back to external ids and text.
//!
//! Selection happens on the undirected projection; assembly walks the
//! original directed edge table so direction, labels, and parallel edges
//! survive into the rendered context.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ArborError, ArborResult};
use crate::graph::GraphStore;
use crate::types::NodeId;

/// A node of the assembled subgraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubgraphNode {
    /// Internal index.
    pub index: usize,
    /// External id.
    pub id: NodeId,
    /// Node text.
    pub text: String,
}

/// A directed edge of the assembled subgraph, as given in the source
/// data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubgraphEdge {
    /// Row in the original edge table.
    pub row: usize,
    /// Internal index of the source node.
    pub src_index: usize,
    /// Internal index of the target node.
    pub dst_index: usize,
    /// Relation label.
    pub relation: String,
}

/// The assembled subgraph: nodes in ascending index order, edges in
/// original input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subgraph {
    /// Selected nodes (selection ∪ forced seeds ∪ selected-edge
    /// endpoints), ascending by internal index.
    pub nodes: Vec<SubgraphNode>,
    /// Every original directed edge whose canonical pair was selected.
    pub edges: Vec<SubgraphEdge>,
}

impl Subgraph {
    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of rendered directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Assemble the subgraph for the given solver selection.
///
/// `selected_nodes` and `selected_candidates` come from the solver;
/// `forced_seeds` are the top-k terminal indices, always included even
/// when the solver judged connecting them too costly. Out-of-range
/// indices are reported as an inconsistent solver result.
pub fn assemble(
    store: &GraphStore,
    selected_nodes: &[usize],
    selected_candidates: &[usize],
    forced_seeds: &[usize],
) -> ArborResult<Subgraph> {
    let node_count = store.node_count();
    let candidates = store.undirected_candidates();

    let mut selected_pairs = HashSet::with_capacity(selected_candidates.len());
    for &candidate in selected_candidates {
        let &pair = candidates.get(candidate).ok_or_else(|| {
            ArborError::solver_inconsistent(format!(
                "selected edge candidate {} out of range ({} candidates)",
                candidate,
                candidates.len()
            ))
        })?;
        selected_pairs.insert(pair);
    }

    let mut node_set = HashSet::with_capacity(selected_nodes.len() + forced_seeds.len());
    for &index in selected_nodes.iter().chain(forced_seeds) {
        if index >= node_count {
            return Err(ArborError::solver_inconsistent(format!(
                "selected node index {} out of range ({} nodes)",
                index, node_count
            )));
        }
        node_set.insert(index);
    }

    let mut edges = Vec::new();
    for (row, &(src_index, dst_index)) in store.edge_index_pairs().iter().enumerate() {
        let pair = (src_index.min(dst_index), src_index.max(dst_index));
        if selected_pairs.contains(&pair) {
            node_set.insert(src_index);
            node_set.insert(dst_index);
            edges.push(SubgraphEdge {
                row,
                src_index,
                dst_index,
                relation: store.edge_text(row).unwrap_or_default().to_string(),
            });
        }
    }

    let mut indices: Vec<usize> = node_set.into_iter().collect();
    indices.sort_unstable();

    let nodes = indices
        .into_iter()
        .map(|index| SubgraphNode {
            index,
            id: store.external_id_of(index).cloned().expect("index validated"),
            text: store.node_text(index).unwrap_or_default().to_string(),
        })
        .collect();

    Ok(Subgraph { nodes, edges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EdgeRecord, NodeRecord};

    fn store() -> GraphStore {
        GraphStore::load(
            vec![
                NodeRecord::new(1, "Acme Corp"),
                NodeRecord::new(2, "Grant Program X"),
                NodeRecord::new(3, "Deep-Sea Mining"),
            ],
            vec![
                EdgeRecord::new(1, "funds", 2),
                EdgeRecord::new(2, "targets", 3),
                EdgeRecord::new(2, "administered by", 1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_assemble_orders_nodes_and_edges() {
        let store = store();
        // Candidates sorted ascending: (0,1) -> 0, (1,2) -> 1.
        let sub = assemble(&store, &[2, 0, 1], &[1, 0], &[]).unwrap();
        let indices: Vec<usize> = sub.nodes.iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        let rows: Vec<usize> = sub.edges.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![0, 1, 2]);
    }

    #[test]
    fn test_parallel_edges_both_rendered() {
        let store = store();
        let sub = assemble(&store, &[0, 1], &[0], &[]).unwrap();
        // Candidate (0,1) covers rows 0 and 2 with distinct labels.
        let relations: Vec<&str> = sub.edges.iter().map(|e| e.relation.as_str()).collect();
        assert_eq!(relations, vec!["funds", "administered by"]);
        // Direction as given in the source data.
        assert_eq!(sub.edges[1].src_index, 1);
        assert_eq!(sub.edges[1].dst_index, 0);
    }

    #[test]
    fn test_forced_seeds_included() {
        let store = store();
        let sub = assemble(&store, &[], &[], &[2]).unwrap();
        assert_eq!(sub.node_count(), 1);
        assert_eq!(sub.nodes[0].text, "Deep-Sea Mining");
        assert_eq!(sub.edge_count(), 0);
    }

    #[test]
    fn test_out_of_range_node_is_inconsistent() {
        let store = store();
        assert!(assemble(&store, &[7], &[], &[]).is_err());
    }

    #[test]
    fn test_out_of_range_candidate_is_inconsistent() {
        let store = store();
        assert!(assemble(&store, &[], &[9], &[]).is_err());
    }
}
