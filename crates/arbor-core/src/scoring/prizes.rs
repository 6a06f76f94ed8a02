//! Prize and cost assignment for the Steiner-tree solve.
//!
//! Node prizes decay linearly by rank within the top-k set, modulated by
//! absolute similarity strength. Edge costs are either a uniform constant
//! or derived from the query-relevance of the relation text.

use serde::{Deserialize, Serialize};

use crate::graph::GraphStore;
use crate::scoring::ScoredNode;

/// How candidate edge costs are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EdgeCostMode {
    /// Every candidate costs `edge_cost`. The baseline behavior.
    #[default]
    Uniform,
    /// Candidate cost shrinks with the query-similarity of its relation
    /// text: `edge_cost * (1 - max(0, sim))`.
    Relevance,
}

/// Assign prizes to the ranked top-k nodes.
///
/// With `k` ranked nodes, the node at 1-based `rank` receives
/// `(k - rank + 1) * base_prize * (0.5 + 0.5 * max(0, similarity))`;
/// every other node receives zero. Prizes are always non-negative.
pub fn make_prizes(node_count: usize, ranked: &[ScoredNode], base_prize: f64) -> Vec<f64> {
    let mut prizes = vec![0.0; node_count];
    let k = ranked.len();
    for (i, scored) in ranked.iter().enumerate() {
        let rank = i + 1;
        let strength = 0.5 + 0.5 * f64::from(scored.score).max(0.0);
        prizes[scored.index] = (k - rank + 1) as f64 * base_prize * strength;
    }
    prizes
}

/// Uniform cost per undirected candidate.
pub fn uniform_costs(num_candidates: usize, edge_cost: f64) -> Vec<f64> {
    vec![edge_cost; num_candidates]
}

/// Relevance-derived cost per undirected candidate.
///
/// `edge_sims` holds the query-similarity of each directed edge's
/// relation text, in input edge order. A candidate covering several
/// parallel directed edges takes the best of their similarities; the
/// cost is clamped non-negative so the solver contract holds.
pub fn relevance_costs(store: &GraphStore, edge_sims: &[f32], edge_cost: f64) -> Vec<f64> {
    let candidates = store.undirected_candidates();
    let mut best_sim = vec![0.0_f64; candidates.len()];

    for (row, &(u, v)) in store.edge_index_pairs().iter().enumerate() {
        if let Some(candidate) = store.candidate_index_of(u, v) {
            let sim = edge_sims
                .get(row)
                .map(|&s| f64::from(s).max(0.0))
                .unwrap_or(0.0);
            if sim > best_sim[candidate] {
                best_sim[candidate] = sim;
            }
        }
    }

    best_sim
        .into_iter()
        .map(|sim| (edge_cost * (1.0 - sim)).max(0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EdgeRecord, NodeRecord};

    #[test]
    fn test_make_prizes_rank_decay() {
        let ranked = vec![
            ScoredNode { index: 2, score: 1.0 },
            ScoredNode { index: 0, score: 0.5 },
        ];
        let prizes = make_prizes(4, &ranked, 1.0);
        // rank 1 of k=2: 2 * 1.0 * (0.5 + 0.5*1.0) = 2.0
        assert!((prizes[2] - 2.0).abs() < 1e-9);
        // rank 2 of k=2: 1 * 1.0 * (0.5 + 0.5*0.5) = 0.75
        assert!((prizes[0] - 0.75).abs() < 1e-9);
        assert_eq!(prizes[1], 0.0);
        assert_eq!(prizes[3], 0.0);
    }

    #[test]
    fn test_make_prizes_negative_similarity_clamped() {
        let ranked = vec![ScoredNode { index: 0, score: -0.9 }];
        let prizes = make_prizes(1, &ranked, 2.0);
        // max(0, -0.9) = 0, so strength factor bottoms out at 0.5.
        assert!((prizes[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_costs() {
        assert_eq!(uniform_costs(3, 1.5), vec![1.5, 1.5, 1.5]);
    }

    #[test]
    fn test_relevance_costs_take_best_parallel_sim() {
        let store = GraphStore::load(
            vec![NodeRecord::new(1, "a"), NodeRecord::new(2, "b")],
            vec![
                EdgeRecord::new(1, "weak", 2),
                EdgeRecord::new(2, "strong", 1),
            ],
        )
        .unwrap();
        let costs = relevance_costs(&store, &[0.2, 0.8], 1.0);
        assert_eq!(costs.len(), 1);
        assert!((costs[0] - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_relevance_costs_never_negative() {
        let store = GraphStore::load(
            vec![NodeRecord::new(1, "a"), NodeRecord::new(2, "b")],
            vec![EdgeRecord::new(1, "rel", 2)],
        )
        .unwrap();
        let costs = relevance_costs(&store, &[1.0], 1.0);
        assert_eq!(costs, vec![0.0]);
    }
}
