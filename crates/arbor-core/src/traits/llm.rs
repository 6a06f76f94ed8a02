//! LLM trait for the downstream answer-generation collaborator.
//!
//! The retrieval core only needs plain text completion: it hands the
//! model a grounding prompt and takes back a string. Tool calling and
//! streaming are out of scope.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ArborResult;

/// Configuration options for LLM generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Sampling temperature (0.0 - 2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Core LLM trait - all answer-generation providers implement this.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> ArborResult<String>;

    /// Get the model name.
    fn model_name(&self) -> &str;
}

/// LLM configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model name/identifier.
    pub model: String,
    /// API key (if not using environment variable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL for API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Default generation options.
    #[serde(default)]
    pub options: GenerationOptions,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            base_url: None,
            options: GenerationOptions::default(),
        }
    }
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    OpenAI,
    Ollama,
}
