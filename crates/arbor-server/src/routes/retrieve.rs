//! Retrieval and answer endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use arbor_core::retrieval::{format_context, RetrievalParams, Subgraph};
use arbor_core::scoring::EdgeCostMode;
use arbor_core::traits::{GenerationOptions, PruningStrategy};
use arbor_core::types::NodeId;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for retrieving grounding context.
#[derive(Debug, Deserialize)]
pub struct RetrieveRequest {
    /// The natural-language question.
    pub question: String,
    /// Number of seed nodes scored as relevant.
    pub top_k: Option<usize>,
    /// Cost per candidate edge.
    pub edge_cost: Option<f64>,
    /// Uniform scale on node prizes.
    pub base_prize: Option<f64>,
    /// How candidate edge costs are assigned.
    pub cost_mode: Option<EdgeCostMode>,
    /// Solver pruning strategy.
    pub pruning: Option<PruningStrategy>,
    /// Number of connected components desired in the result.
    pub num_clusters: Option<usize>,
    /// Optional root node the result must contain.
    pub root: Option<NodeId>,
}

impl RetrieveRequest {
    /// Merge request overrides over the configured defaults.
    fn params(&self, defaults: RetrievalParams) -> RetrievalParams {
        RetrievalParams {
            top_k: self.top_k.unwrap_or(defaults.top_k),
            edge_cost: self.edge_cost.unwrap_or(defaults.edge_cost),
            base_prize: self.base_prize.unwrap_or(defaults.base_prize),
            cost_mode: self.cost_mode.unwrap_or(defaults.cost_mode),
            pruning: self.pruning.unwrap_or(defaults.pruning),
            num_clusters: self.num_clusters.unwrap_or(defaults.num_clusters),
            root: self.root.clone().or(defaults.root),
        }
    }
}

/// Response for retrieving grounding context.
#[derive(Debug, Serialize)]
pub struct RetrieveResponse {
    pub context: String,
    pub subgraph: Subgraph,
}

/// Retrieve the grounding context for a question.
/// POST /retrieve
pub async fn retrieve_context(
    State(state): State<AppState>,
    Json(request): Json<RetrieveRequest>,
) -> ApiResult<Json<RetrieveResponse>> {
    let retriever = state
        .retriever()
        .await
        .ok_or_else(|| ApiError::bad_request("No graph loaded. Call /graph first."))?;

    let params = request.params(state.default_params().await);
    let subgraph = retriever
        .retrieve_subgraph(&request.question, &params)
        .await?;
    let context = format_context(&subgraph);

    Ok(Json(RetrieveResponse { context, subgraph }))
}

/// Request body for answering a question.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// Retrieval request.
    #[serde(flatten)]
    pub retrieve: RetrieveRequest,
    /// Generation options for the LLM.
    #[serde(default)]
    pub options: GenerationOptions,
}

/// Response for answering a question.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub context: String,
}

/// Answer a question grounded in retrieved context.
/// POST /answer
pub async fn answer_question(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> ApiResult<Json<AnswerResponse>> {
    let retriever = state
        .retriever()
        .await
        .ok_or_else(|| ApiError::bad_request("No graph loaded. Call /graph first."))?;

    if !retriever.has_llm() {
        return Err(ApiError::bad_request(
            "No LLM configured. Set an llm provider in the server configuration.",
        ));
    }

    let params = request.retrieve.params(state.default_params().await);
    let answer = retriever
        .answer(&request.retrieve.question, &params, &request.options)
        .await?;

    Ok(Json(AnswerResponse {
        answer: answer.text,
        context: answer.context,
    }))
}
