//! Configuration system for arbor.

use serde::{Deserialize, Serialize};

use crate::retrieval::RetrievalParams;
use crate::traits::{
    EmbedderConfig, EmbedderProvider, LlmConfig, LlmProvider, SolverProvider,
};

/// Embedder provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedderProviderConfig {
    /// Provider type.
    pub provider: EmbedderProvider,
    /// Provider-specific configuration.
    #[serde(flatten)]
    pub config: EmbedderConfig,
}

impl Default for EmbedderProviderConfig {
    fn default() -> Self {
        Self {
            provider: EmbedderProvider::OpenAI,
            config: EmbedderConfig::default(),
        }
    }
}

/// LLM provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmProviderConfig {
    /// Provider type.
    pub provider: LlmProvider,
    /// Provider-specific configuration.
    #[serde(flatten)]
    pub config: LlmConfig,
}

impl Default for LlmProviderConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAI,
            config: LlmConfig::default(),
        }
    }
}

/// Solver provider configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverProviderConfig {
    /// Provider type.
    #[serde(default)]
    pub provider: SolverProvider,
}

/// Top-level arbor configuration: which providers to wire up and the
/// default retrieval parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArborConfig {
    /// Embedding provider.
    #[serde(default)]
    pub embedder: EmbedderProviderConfig,
    /// Answer-generation LLM, if answer endpoints are wanted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmProviderConfig>,
    /// Steiner-tree solver.
    #[serde(default)]
    pub solver: SolverProviderConfig,
    /// Default retrieval parameters; per-request values override these.
    #[serde(default)]
    pub retrieval: RetrievalParams,
}
