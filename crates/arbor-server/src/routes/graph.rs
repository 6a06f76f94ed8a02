//! Graph loading endpoints.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use arbor_core::graph::GraphStore;
use arbor_core::types::{EdgeRecord, NodeRecord};

use crate::error::ApiResult;
use crate::factory::create_retriever;
use crate::state::AppState;

/// Request body for loading a graph.
#[derive(Debug, Deserialize)]
pub struct LoadGraphRequest {
    /// Node table rows.
    pub nodes: Vec<NodeRecord>,
    /// Edge table rows.
    pub edges: Vec<EdgeRecord>,
}

/// Response for loading a graph.
#[derive(Debug, Serialize)]
pub struct LoadGraphResponse {
    pub nodes: usize,
    pub edges: usize,
    pub candidates: usize,
}

/// Load a graph and build the retriever over it.
/// POST /graph
pub async fn load_graph(
    State(state): State<AppState>,
    Json(request): Json<LoadGraphRequest>,
) -> ApiResult<Json<LoadGraphResponse>> {
    let store = Arc::new(GraphStore::load(request.nodes, request.edges)?);
    let response = LoadGraphResponse {
        nodes: store.node_count(),
        edges: store.edge_count(),
        candidates: store.undirected_candidates().len(),
    };

    let config = state.inner.read().await.config.clone();
    let retriever = create_retriever(&config, store)?;
    state.set_retriever(Arc::new(retriever)).await;

    Ok(Json(response))
}

/// Response for resetting the loaded graph.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub reset: bool,
}

/// Drop the loaded graph.
/// POST /reset
pub async fn reset_graph(State(state): State<AppState>) -> ApiResult<Json<ResetResponse>> {
    state.reset().await;
    Ok(Json(ResetResponse { reset: true }))
}
