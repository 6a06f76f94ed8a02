//! Retrieval engine orchestrating the per-query pipeline.
//!
//! Embed -> score -> prize/cost -> solve -> assemble -> format, with the
//! embedding model, the Steiner-tree solver, and the optional
//! answer-generation LLM all constructor-injected capabilities. The
//! engine keeps per-store embedding caches; everything per-query lives
//! on the stack, so one engine serves concurrent queries.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{ArborError, ArborResult};
use crate::graph::GraphStore;
use crate::retrieval::{assemble, build_prompt, format_context, Subgraph};
use crate::scoring::{self, EdgeCostMode};
use crate::traits::{
    Embedder, EmbeddingKind, GenerationOptions, Llm, PruningStrategy, SteinerInput, SteinerSolver,
};
use crate::types::NodeId;

/// Tunable parameters for one retrieval call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalParams {
    /// Number of seed nodes scored as relevant.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Cost assigned to candidate edges; higher values bias the solver
    /// toward smaller trees.
    #[serde(default = "default_unit")]
    pub edge_cost: f64,
    /// Uniform scale on node prizes; higher values bias the solver
    /// toward including more of the top-k nodes.
    #[serde(default = "default_unit")]
    pub base_prize: f64,
    /// How candidate edge costs are assigned.
    #[serde(default)]
    pub cost_mode: EdgeCostMode,
    /// Solver pruning strategy.
    #[serde(default)]
    pub pruning: PruningStrategy,
    /// Number of connected components desired in the result.
    #[serde(default = "default_num_clusters")]
    pub num_clusters: usize,
    /// Optional root node the result must contain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<NodeId>,
}

fn default_top_k() -> usize {
    50
}

fn default_unit() -> f64 {
    1.0
}

fn default_num_clusters() -> usize {
    1
}

impl Default for RetrievalParams {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            edge_cost: default_unit(),
            base_prize: default_unit(),
            cost_mode: EdgeCostMode::default(),
            pruning: PruningStrategy::default(),
            num_clusters: default_num_clusters(),
            root: None,
        }
    }
}

impl RetrievalParams {
    fn validate(&self) -> ArborResult<()> {
        if !self.edge_cost.is_finite() || self.edge_cost < 0.0 {
            return Err(ArborError::validation(
                "edge_cost must be finite and non-negative",
            ));
        }
        if !self.base_prize.is_finite() || self.base_prize < 0.0 {
            return Err(ArborError::validation(
                "base_prize must be finite and non-negative",
            ));
        }
        if self.num_clusters < 1 {
            return Err(ArborError::validation("num_clusters must be >= 1"));
        }
        Ok(())
    }
}

/// A grounded answer with the context it was generated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The generated answer text.
    pub text: String,
    /// The formatted context block the model was shown.
    pub context: String,
}

/// The retrieval engine.
pub struct Retriever {
    store: Arc<GraphStore>,
    embedder: Arc<dyn Embedder>,
    solver: Arc<dyn SteinerSolver>,
    llm: Option<Arc<dyn Llm>>,
    node_embeddings: OnceCell<Arc<Vec<Vec<f32>>>>,
    edge_embeddings: OnceCell<Arc<Vec<Vec<f32>>>>,
}

impl Retriever {
    /// Create a retrieval engine over an immutable graph snapshot.
    pub fn new(
        store: Arc<GraphStore>,
        embedder: Arc<dyn Embedder>,
        solver: Arc<dyn SteinerSolver>,
    ) -> Self {
        Self {
            store,
            embedder,
            solver,
            llm: None,
            node_embeddings: OnceCell::new(),
            edge_embeddings: OnceCell::new(),
        }
    }

    /// Attach an answer-generation LLM.
    pub fn with_llm(mut self, llm: Arc<dyn Llm>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// The underlying graph snapshot.
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Whether an answer-generation LLM is attached.
    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    /// Retrieve the grounding context for a question as a formatted text
    /// block.
    pub async fn retrieve(&self, question: &str, params: &RetrievalParams) -> ArborResult<String> {
        let subgraph = self.retrieve_subgraph(question, params).await?;
        Ok(format_context(&subgraph))
    }

    /// Retrieve the grounding subgraph for a question in structured form.
    pub async fn retrieve_subgraph(
        &self,
        question: &str,
        params: &RetrievalParams,
    ) -> ArborResult<Subgraph> {
        params.validate()?;
        if self.store.is_empty() {
            return Err(ArborError::EmptyGraph);
        }

        let query = self.embed_query(question).await?;
        let node_embeddings = self.node_embeddings().await?;
        let ranked = scoring::top_k(node_embeddings, &query, params.top_k);
        debug!(
            top_k = params.top_k,
            ranked = ranked.len(),
            best = ranked.first().map(|s| s.score).unwrap_or(0.0),
            "scored seed nodes"
        );

        let candidates = self.store.undirected_candidates().to_vec();
        let costs = match params.cost_mode {
            EdgeCostMode::Uniform => scoring::uniform_costs(candidates.len(), params.edge_cost),
            EdgeCostMode::Relevance => {
                let edge_embeddings = self.edge_embeddings().await?;
                let sims: Vec<f32> = edge_embeddings
                    .iter()
                    .map(|row| scoring::dot(row, &query))
                    .collect();
                scoring::relevance_costs(&self.store, &sims, params.edge_cost)
            }
        };
        let prizes = scoring::make_prizes(self.store.node_count(), &ranked, params.base_prize);

        let root = match &params.root {
            Some(id) => Some(self.store.index_of(id).ok_or_else(|| {
                ArborError::validation(format!("root node id '{}' not in graph", id))
            })?),
            None => None,
        };

        let input = SteinerInput {
            edges: candidates,
            prizes,
            costs,
            root,
            num_clusters: params.num_clusters,
            pruning: params.pruning,
        };
        input.validate()?;

        let solution = self.solver.solve(&input)?;
        debug!(
            solver = self.solver.name(),
            nodes = solution.nodes.len(),
            edges = solution.edges.len(),
            "solver selected subgraph"
        );

        let seeds: Vec<usize> = ranked.iter().map(|s| s.index).collect();
        assemble(&self.store, &solution.nodes, &solution.edges, &seeds)
    }

    /// Answer a question grounded in the retrieved context.
    ///
    /// Requires an attached LLM; retrieval errors propagate unchanged
    /// rather than degrading to an ungrounded answer.
    pub async fn answer(
        &self,
        question: &str,
        params: &RetrievalParams,
        options: &GenerationOptions,
    ) -> ArborResult<Answer> {
        let llm = self.llm.as_ref().ok_or_else(|| {
            ArborError::Configuration("no LLM attached; build the retriever with_llm".to_string())
        })?;

        let context = self.retrieve(question, params).await?;
        let prompt = build_prompt(question, &context);
        let text = llm.generate(&prompt, options).await?;
        Ok(Answer { text, context })
    }

    /// Embed and normalize the query text.
    async fn embed_query(&self, question: &str) -> ArborResult<Vec<f32>> {
        let mut query = self
            .embedder
            .embed(question, Some(EmbeddingKind::Query))
            .await?;
        self.check_dimension(query.len())?;
        scoring::normalize(&mut query);
        Ok(query)
    }

    /// Node embeddings, computed once per engine since the store is a
    /// read-only snapshot.
    async fn node_embeddings(&self) -> ArborResult<&Vec<Vec<f32>>> {
        let cached = self
            .node_embeddings
            .get_or_try_init(|| async {
                let texts = self.store.node_texts();
                debug!(count = texts.len(), "embedding node texts");
                let embeddings = self
                    .embedder
                    .embed_batch(&texts, Some(EmbeddingKind::Document))
                    .await?;
                self.normalized_matrix(embeddings, texts.len()).map(Arc::new)
            })
            .await?;
        Ok(cached.as_ref())
    }

    /// Edge relation-text embeddings; only computed for relevance-derived
    /// costs.
    async fn edge_embeddings(&self) -> ArborResult<&Vec<Vec<f32>>> {
        let cached = self
            .edge_embeddings
            .get_or_try_init(|| async {
                let texts = self.store.edge_texts();
                debug!(count = texts.len(), "embedding edge texts");
                let embeddings = self
                    .embedder
                    .embed_batch(&texts, Some(EmbeddingKind::Document))
                    .await?;
                self.normalized_matrix(embeddings, texts.len()).map(Arc::new)
            })
            .await?;
        Ok(cached.as_ref())
    }

    fn normalized_matrix(
        &self,
        mut embeddings: Vec<Vec<f32>>,
        expected_rows: usize,
    ) -> ArborResult<Vec<Vec<f32>>> {
        if embeddings.len() != expected_rows {
            return Err(ArborError::embedding(format!(
                "embedder returned {} vectors for {} texts",
                embeddings.len(),
                expected_rows
            )));
        }
        for row in &mut embeddings {
            self.check_dimension(row.len())?;
            scoring::normalize(row);
        }
        Ok(embeddings)
    }

    fn check_dimension(&self, got: usize) -> ArborResult<()> {
        let expected = self.embedder.dimension();
        if got != expected {
            return Err(ArborError::dimension_mismatch(expected, got));
        }
        Ok(())
    }
}
