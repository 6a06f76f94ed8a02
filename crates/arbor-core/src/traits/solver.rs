//! Prize-collecting Steiner tree solver boundary.
//!
//! The combinatorial search is a pluggable capability: the pipeline
//! prepares prizes/costs over the canonical undirected candidate list,
//! hands them to a [`SteinerSolver`], and interprets the returned index
//! sets. Different approximation algorithms can be substituted without
//! touching the rest of the pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{ArborError, ArborResult};

/// Pruning strategy applied by the solver after tree construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PruningStrategy {
    /// Keep the full constructed tree.
    None,
    /// Iteratively strip zero-prize leaves.
    Simple,
    /// Goemans-Williamson moat pruning: a subtree survives when its
    /// prize could cover its half of the connecting edge's moat. Laxer
    /// than strong pruning, favoring a single connected result.
    #[default]
    Gw,
    /// Strong pruning: drop any subtree whose collected prize does not
    /// pay for the full cost of its connecting edge.
    Strong,
}

impl PruningStrategy {
    /// Get the string identifier used in configuration and APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PruningStrategy::None => "none",
            PruningStrategy::Simple => "simple",
            PruningStrategy::Gw => "gw",
            PruningStrategy::Strong => "strong",
        }
    }
}

/// Input to a prize-collecting Steiner tree solve.
///
/// Edges are canonical undirected pairs of 0-based node indices,
/// deduplicated by endpoint pair. `prizes` has one non-negative entry per
/// node; `costs` has one non-negative entry per edge.
#[derive(Debug, Clone)]
pub struct SteinerInput {
    /// Undirected edge candidates as `(u, v)` index pairs.
    pub edges: Vec<(usize, usize)>,
    /// Non-negative prize per node; length is the node count.
    pub prizes: Vec<f64>,
    /// Non-negative cost per edge candidate.
    pub costs: Vec<f64>,
    /// Root node index, or `None` for an unrooted solve.
    pub root: Option<usize>,
    /// Number of connected components desired in the result (>= 1).
    pub num_clusters: usize,
    /// Pruning strategy.
    pub pruning: PruningStrategy,
}

impl SteinerInput {
    /// Create an unrooted single-cluster input with default pruning.
    pub fn new(edges: Vec<(usize, usize)>, prizes: Vec<f64>, costs: Vec<f64>) -> Self {
        Self {
            edges,
            prizes,
            costs,
            root: None,
            num_clusters: 1,
            pruning: PruningStrategy::default(),
        }
    }

    /// Number of nodes in the problem.
    pub fn node_count(&self) -> usize {
        self.prizes.len()
    }

    /// Validate the input against the solver contract.
    ///
    /// Checks index ranges, length agreement, non-negativity, and
    /// finiteness; returns `SolverInvalidInput` on the first violation.
    pub fn validate(&self) -> ArborResult<()> {
        let n = self.prizes.len();
        if self.costs.len() != self.edges.len() {
            return Err(ArborError::solver_input(format!(
                "cost vector length {} does not match edge count {}",
                self.costs.len(),
                self.edges.len()
            )));
        }
        if self.num_clusters < 1 {
            return Err(ArborError::solver_input("num_clusters must be >= 1"));
        }
        if let Some(root) = self.root {
            if root >= n {
                return Err(ArborError::solver_input(format!(
                    "root index {} out of range for {} nodes",
                    root, n
                )));
            }
        }
        for (i, &(u, v)) in self.edges.iter().enumerate() {
            if u >= n || v >= n {
                return Err(ArborError::solver_input(format!(
                    "edge {} endpoints ({}, {}) out of range for {} nodes",
                    i, u, v, n
                )));
            }
            if u == v {
                return Err(ArborError::solver_input(format!(
                    "edge {} is a self-loop on node {}",
                    i, u
                )));
            }
        }
        for (i, &p) in self.prizes.iter().enumerate() {
            if !p.is_finite() || p < 0.0 {
                return Err(ArborError::solver_input(format!(
                    "prize for node {} is {} (must be finite and non-negative)",
                    i, p
                )));
            }
        }
        for (i, &c) in self.costs.iter().enumerate() {
            if !c.is_finite() || c < 0.0 {
                return Err(ArborError::solver_input(format!(
                    "cost for edge {} is {} (must be finite and non-negative)",
                    i, c
                )));
            }
        }
        Ok(())
    }
}

/// Output of a prize-collecting Steiner tree solve: the selected node
/// indices and the selected candidate-edge indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SteinerSolution {
    /// Selected node indices.
    pub nodes: Vec<usize>,
    /// Selected indices into the input edge candidate list.
    pub edges: Vec<usize>,
}

/// Core solver trait - approximate PCST implementations plug in here.
///
/// The solve is pure CPU work and synchronous; callers serving concurrent
/// queries can wrap it in a blocking task if needed.
pub trait SteinerSolver: Send + Sync {
    /// Solve the prize-collecting Steiner tree problem.
    fn solve(&self, input: &SteinerInput) -> ArborResult<SteinerSolution>;

    /// Get the solver name for diagnostics.
    fn name(&self) -> &str;
}

/// Solver provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SolverProvider {
    /// Path-based Steiner approximation with Goemans-Williamson-style
    /// pruning.
    #[default]
    Gw,
}
