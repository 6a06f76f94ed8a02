//! Server state management.

use std::sync::Arc;

use arbor_core::config::ArborConfig;
use arbor_core::retrieval::Retriever;
use tokio::sync::RwLock;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
}

pub struct AppStateInner {
    /// The retriever over the currently loaded graph, if any.
    pub retriever: Option<Arc<Retriever>>,
    /// Provider wiring and retrieval defaults.
    pub config: ArborConfig,
}

impl AppState {
    /// Create a new application state with no graph loaded.
    pub fn new(config: ArborConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                retriever: None,
                config,
            })),
        }
    }

    /// Whether a graph is loaded and ready for retrieval.
    pub async fn is_loaded(&self) -> bool {
        self.inner.read().await.retriever.is_some()
    }

    /// Get the current retriever, if a graph is loaded.
    pub async fn retriever(&self) -> Option<Arc<Retriever>> {
        self.inner.read().await.retriever.clone()
    }

    /// Replace the current retriever.
    pub async fn set_retriever(&self, retriever: Arc<Retriever>) {
        self.inner.write().await.retriever = Some(retriever);
    }

    /// Drop the loaded graph.
    pub async fn reset(&self) {
        self.inner.write().await.retriever = None;
    }

    /// The default retrieval parameters from configuration.
    pub async fn default_params(&self) -> arbor_core::retrieval::RetrievalParams {
        self.inner.read().await.config.retrieval.clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ArborConfig::default())
    }
}
