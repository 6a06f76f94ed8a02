//! Factory for creating LLM providers.

use std::sync::Arc;

use arbor_core::error::ArborResult;
use arbor_core::traits::{Llm, LlmConfig, LlmProvider};

use crate::ollama::OllamaLlm;
use crate::openai::OpenAILlm;

/// Factory for creating LLM providers.
pub struct LlmFactory;

impl LlmFactory {
    /// Create an LLM from the given configuration.
    pub fn create(provider: LlmProvider, config: LlmConfig) -> ArborResult<Arc<dyn Llm>> {
        match provider {
            LlmProvider::OpenAI => {
                let llm = OpenAILlm::new(config)?;
                Ok(Arc::new(llm))
            }
            LlmProvider::Ollama => {
                let llm = OllamaLlm::new(config)?;
                Ok(Arc::new(llm))
            }
        }
    }

    /// Create an OpenAI LLM with default configuration.
    pub fn openai() -> ArborResult<Arc<dyn Llm>> {
        Self::create(LlmProvider::OpenAI, LlmConfig::default())
    }

    /// Create an OpenAI LLM with a specific model.
    pub fn openai_with_model(model: impl Into<String>) -> ArborResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            model: model.into(),
            ..Default::default()
        };
        Self::create(LlmProvider::OpenAI, config)
    }

    /// Create an Ollama LLM with default configuration.
    pub fn ollama() -> ArborResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            model: "llama3.1".to_string(),
            ..Default::default()
        };
        Self::create(LlmProvider::Ollama, config)
    }

    /// Create an Ollama LLM with a specific model.
    pub fn ollama_with_model(model: impl Into<String>) -> ArborResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            model: model.into(),
            ..Default::default()
        };
        Self::create(LlmProvider::Ollama, config)
    }
}
