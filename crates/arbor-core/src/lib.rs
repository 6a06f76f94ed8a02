//! arbor-core - Core library for arbor.
//!
//! This crate provides the graph store, relevance scoring, prize/cost
//! model, and the retrieval pipeline that turns a knowledge graph plus a
//! natural-language question into a small, connected, prompt-ready
//! context block via prize-collecting Steiner tree extraction.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use arbor_core::{GraphStore, NodeRecord, EdgeRecord, Retriever, RetrievalParams};
//!
//! let store = Arc::new(GraphStore::load(nodes, edges)?);
//! let retriever = Retriever::new(store, embedder, solver);
//!
//! let context = retriever.retrieve("Who funds the mining grant?", &RetrievalParams::default()).await?;
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod retrieval;
pub mod scoring;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{ArborConfig, EmbedderProviderConfig, LlmProviderConfig, SolverProviderConfig};
pub use error::{ArborError, ArborResult, ErrorCode};
pub use graph::GraphStore;
pub use retrieval::{
    Answer, RetrievalParams, Retriever, Subgraph, SubgraphEdge, SubgraphNode,
};
pub use scoring::{EdgeCostMode, ScoredNode};
pub use traits::{
    Embedder, EmbedderConfig, EmbedderProvider, EmbeddingKind, GenerationOptions, Llm, LlmConfig,
    LlmProvider, PruningStrategy, SolverProvider, SteinerInput, SteinerSolution, SteinerSolver,
};
pub use types::{EdgeRecord, NodeId, NodeRecord};
