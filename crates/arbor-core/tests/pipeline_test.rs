//! End-to-end retrieval pipeline tests with a deterministic mock
//! embedder and the default solver.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use arbor_core::error::{ArborError, ArborResult, ErrorCode};
use arbor_core::retrieval::{RetrievalParams, Retriever};
use arbor_core::scoring::EdgeCostMode;
use arbor_core::traits::{Embedder, EmbeddingKind, GenerationOptions, Llm};
use arbor_core::types::{EdgeRecord, NodeRecord};
use arbor_core::GraphStore;
use arbor_solvers::GwSolver;

/// Embedder with a fixed text -> vector table. Unknown texts embed to
/// the zero vector.
struct MockEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dims: usize,
}

impl MockEmbedder {
    fn new(dims: usize, entries: &[(&str, &[f32])]) -> Arc<Self> {
        let vectors = entries
            .iter()
            .map(|(text, vector)| (text.to_string(), vector.to_vec()))
            .collect();
        Arc::new(Self { vectors, dims })
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str, _kind: Option<EmbeddingKind>) -> ArborResult<Vec<f32>> {
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.dims]))
    }

    fn dimension(&self) -> usize {
        self.dims
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

/// Embedder that always fails, for propagation tests.
struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str, _kind: Option<EmbeddingKind>) -> ArborResult<Vec<f32>> {
        Err(ArborError::embedding("mock embedder outage"))
    }

    fn dimension(&self) -> usize {
        3
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

/// LLM that echoes a canned answer.
struct MockLlm;

#[async_trait]
impl Llm for MockLlm {
    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> ArborResult<String> {
        Ok(format!("ANSWER[{} chars of prompt]", prompt.len()))
    }

    fn model_name(&self) -> &str {
        "mock-llm"
    }
}

fn acme_store() -> Arc<GraphStore> {
    Arc::new(
        GraphStore::load(
            vec![
                NodeRecord::new(1, "Acme Corp"),
                NodeRecord::new(2, "Grant Program X"),
                NodeRecord::new(3, "Deep-Sea Mining"),
            ],
            vec![
                EdgeRecord::new(1, "funds", 2),
                EdgeRecord::new(2, "targets", 3),
            ],
        )
        .unwrap(),
    )
}

fn acme_embedder() -> Arc<MockEmbedder> {
    MockEmbedder::new(
        3,
        &[
            ("Acme Corp", &[1.0, 0.0, 0.0]),
            ("Grant Program X", &[0.0, 1.0, 0.0]),
            ("Deep-Sea Mining", &[0.0, 0.0, 1.0]),
            ("funds", &[0.7, 0.7, 0.0]),
            ("targets", &[0.0, 0.0, 1.0]),
            ("Who funds the mining grant?", &[0.6, 0.8, 0.0]),
        ],
    )
}

fn acme_retriever() -> Retriever {
    Retriever::new(acme_store(), acme_embedder(), Arc::new(GwSolver::new()))
}

fn params(top_k: usize, edge_cost: f64) -> RetrievalParams {
    RetrievalParams {
        top_k,
        edge_cost,
        base_prize: 1.0,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_acme_scenario_renders_funding_edge() {
    let retriever = acme_retriever();
    let context = retriever
        .retrieve("Who funds the mining grant?", &params(2, 1.0))
        .await
        .unwrap();

    assert!(context.contains("Acme Corp"));
    assert!(context.contains("Grant Program X"));
    assert!(context.contains("(Acme Corp -- funds -- Grant Program X)"));
}

#[tokio::test]
async fn test_retrieve_is_idempotent() {
    let retriever = acme_retriever();
    let first = retriever
        .retrieve("Who funds the mining grant?", &params(2, 1.0))
        .await
        .unwrap();
    let second = retriever
        .retrieve("Who funds the mining grant?", &params(2, 1.0))
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_single_node_graph_renders_isolated_mention() {
    let store = Arc::new(
        GraphStore::load(vec![NodeRecord::new(1, "Lone Concept")], vec![]).unwrap(),
    );
    let embedder = MockEmbedder::new(
        3,
        &[
            ("Lone Concept", &[1.0, 0.0, 0.0]),
            ("anything?", &[1.0, 0.0, 0.0]),
        ],
    );
    let retriever = Retriever::new(store, embedder, Arc::new(GwSolver::new()));

    let context = retriever.retrieve("anything?", &params(1, 1.0)).await.unwrap();
    assert_eq!(context, "(Lone Concept)");
}

#[tokio::test]
async fn test_empty_graph_is_an_error() {
    let store = Arc::new(GraphStore::load(vec![], vec![]).unwrap());
    let embedder = MockEmbedder::new(3, &[]);
    let retriever = Retriever::new(store, embedder, Arc::new(GwSolver::new()));

    let err = retriever.retrieve("anything?", &params(1, 1.0)).await.unwrap_err();
    assert!(matches!(err, ArborError::EmptyGraph));
}

#[tokio::test]
async fn test_embedding_failure_propagates() {
    let retriever = Retriever::new(acme_store(), Arc::new(FailingEmbedder), Arc::new(GwSolver::new()));

    let err = retriever.retrieve("q", &params(2, 1.0)).await.unwrap_err();
    assert!(matches!(err, ArborError::Embedding { .. }));
}

#[tokio::test]
async fn test_wrong_dimension_is_an_embedding_failure() {
    // The table holds 3-dim vectors but the embedder claims 4.
    let embedder = Arc::new(MockEmbedder {
        vectors: HashMap::from([("Acme Corp".to_string(), vec![1.0, 0.0, 0.0])]),
        dims: 4,
    });
    let retriever = Retriever::new(acme_store(), embedder, Arc::new(GwSolver::new()));

    let err = retriever.retrieve("q", &params(2, 1.0)).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::EmbDimensionMismatch);
}

fn chain_store() -> Arc<GraphStore> {
    Arc::new(
        GraphStore::load(
            vec![
                NodeRecord::new("a", "Alpha"),
                NodeRecord::new("b", "Beta"),
                NodeRecord::new("c", "Gamma"),
                NodeRecord::new("d", "Delta"),
            ],
            vec![
                EdgeRecord::new("a", "next", "b"),
                EdgeRecord::new("b", "next", "c"),
                EdgeRecord::new("c", "next", "d"),
            ],
        )
        .unwrap(),
    )
}

fn chain_retriever() -> Retriever {
    let embedder = MockEmbedder::new(
        4,
        &[
            ("Alpha", &[1.0, 0.0, 0.0, 0.0]),
            ("Beta", &[0.0, 1.0, 0.0, 0.0]),
            ("Gamma", &[0.0, 0.0, 1.0, 0.0]),
            ("Delta", &[0.0, 0.0, 0.0, 1.0]),
            ("next", &[0.5, 0.5, 0.5, 0.5]),
            ("walk the chain", &[0.9, 0.8, 0.7, 0.6]),
        ],
    );
    Retriever::new(chain_store(), embedder, Arc::new(GwSolver::new()))
}

#[tokio::test]
async fn test_seed_count_is_monotone_in_top_k() {
    let retriever = chain_retriever();
    let mut previous = 0;
    for top_k in 1..=4 {
        let subgraph = retriever
            .retrieve_subgraph("walk the chain", &params(top_k, 0.1))
            .await
            .unwrap();
        assert!(subgraph.node_count() >= previous);
        assert!(subgraph.node_count() >= top_k.min(4));
        previous = subgraph.node_count();
    }
}

#[tokio::test]
async fn test_high_edge_cost_never_selects_more_edges() {
    let retriever = chain_retriever();
    let cheap = retriever
        .retrieve_subgraph("walk the chain", &params(4, 0.1))
        .await
        .unwrap();
    let dear = retriever
        .retrieve_subgraph("walk the chain", &params(4, 100.0))
        .await
        .unwrap();
    assert!(dear.edge_count() <= cheap.edge_count());
    // All four seeds still surface even when nothing is connectable.
    assert_eq!(dear.node_count(), 4);
}

#[tokio::test]
async fn test_subgraph_indices_stay_in_range() {
    let retriever = chain_retriever();
    let store = chain_store();
    let subgraph = retriever
        .retrieve_subgraph("walk the chain", &params(4, 0.1))
        .await
        .unwrap();

    for node in &subgraph.nodes {
        assert!(node.index < store.node_count());
    }
    for edge in &subgraph.edges {
        assert!(edge.row < store.edge_count());
        assert_eq!(
            store.edge_index_pairs()[edge.row],
            (edge.src_index, edge.dst_index)
        );
    }
}

#[tokio::test]
async fn test_parallel_labels_each_render() {
    let store = Arc::new(
        GraphStore::load(
            vec![
                NodeRecord::new(1, "Acme Corp"),
                NodeRecord::new(2, "Grant Program X"),
            ],
            vec![
                EdgeRecord::new(1, "funds", 2),
                EdgeRecord::new(2, "administered by", 1),
            ],
        )
        .unwrap(),
    );
    let embedder = MockEmbedder::new(
        2,
        &[
            ("Acme Corp", &[1.0, 0.0]),
            ("Grant Program X", &[0.0, 1.0]),
            ("funds", &[0.7, 0.7]),
            ("administered by", &[0.7, 0.7]),
            ("who runs the grant?", &[0.7, 0.7]),
        ],
    );
    let retriever = Retriever::new(store, embedder, Arc::new(GwSolver::new()));

    let context = retriever
        .retrieve("who runs the grant?", &params(2, 0.5))
        .await
        .unwrap();
    assert!(context.contains("(Acme Corp -- funds -- Grant Program X)"));
    assert!(context.contains("(Grant Program X -- administered by -- Acme Corp)"));
}

#[tokio::test]
async fn test_relevance_cost_mode_retrieves() {
    let retriever = acme_retriever();
    let mut p = params(2, 1.0);
    p.cost_mode = EdgeCostMode::Relevance;

    let context = retriever
        .retrieve("Who funds the mining grant?", &p)
        .await
        .unwrap();
    // The "funds" relation is highly query-relevant, so its candidate
    // gets cheaper and the funding edge must certainly survive.
    assert!(context.contains("(Acme Corp -- funds -- Grant Program X)"));
}

#[tokio::test]
async fn test_answer_requires_llm() {
    let retriever = acme_retriever();
    let err = retriever
        .answer(
            "Who funds the mining grant?",
            &params(2, 1.0),
            &GenerationOptions::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ArborError::Configuration(_)));
}

#[tokio::test]
async fn test_answer_with_llm_carries_context() {
    let retriever = acme_retriever().with_llm(Arc::new(MockLlm));
    let answer = retriever
        .answer(
            "Who funds the mining grant?",
            &params(2, 1.0),
            &GenerationOptions::default(),
        )
        .await
        .unwrap();
    assert!(answer.text.starts_with("ANSWER["));
    assert!(answer.context.contains("(Acme Corp -- funds -- Grant Program X)"));
}

#[tokio::test]
async fn test_unknown_root_is_a_validation_error() {
    let retriever = acme_retriever();
    let mut p = params(2, 1.0);
    p.root = Some("nonexistent".into());

    let err = retriever
        .retrieve("Who funds the mining grant?", &p)
        .await
        .unwrap_err();
    assert!(matches!(err, ArborError::Validation { .. }));
}
