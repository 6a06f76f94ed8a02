//! Provider wiring for the server.

use std::sync::Arc;

use arbor_core::config::ArborConfig;
use arbor_core::error::ArborResult;
use arbor_core::graph::GraphStore;
use arbor_core::retrieval::Retriever;
use arbor_embeddings::EmbedderFactory;
use arbor_llm::LlmFactory;
use arbor_solvers::SolverFactory;

/// Build a retriever over `store` from the configured providers.
pub fn create_retriever(config: &ArborConfig, store: Arc<GraphStore>) -> ArborResult<Retriever> {
    let embedder = EmbedderFactory::create(config.embedder.provider, config.embedder.config.clone())?;
    let solver = SolverFactory::create(config.solver.provider);

    let mut retriever = Retriever::new(store, embedder, solver);
    if let Some(llm_config) = &config.llm {
        let llm = LlmFactory::create(llm_config.provider, llm_config.config.clone())?;
        retriever = retriever.with_llm(llm);
    }
    Ok(retriever)
}
