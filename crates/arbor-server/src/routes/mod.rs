//! Route definitions for the REST API.

mod graph;
mod health;
mod retrieve;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Graph lifecycle
        .route("/graph", post(graph::load_graph))
        .route("/reset", post(graph::reset_graph))
        // Retrieval
        .route("/retrieve", post(retrieve::retrieve_context))
        .route("/answer", post(retrieve::answer_question))
        // Attach state
        .with_state(state)
}

pub use graph::*;
pub use health::*;
pub use retrieve::*;
