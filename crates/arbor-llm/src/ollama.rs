//! Ollama LLM provider implementation.

use async_trait::async_trait;

use arbor_core::error::{ArborError, ArborResult};
use arbor_core::traits::{GenerationOptions, Llm, LlmConfig};

#[cfg(feature = "ollama")]
use ollama_rs::{generation::completion::request::GenerationRequest, Ollama};

/// Ollama LLM provider.
pub struct OllamaLlm {
    #[cfg(feature = "ollama")]
    client: Ollama,
    config: LlmConfig,
}

impl OllamaLlm {
    /// Create a new Ollama LLM provider.
    pub fn new(config: LlmConfig) -> ArborResult<Self> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "http://localhost:11434".to_string());

        // Parse host and port from base_url
        let url = url::Url::parse(&base_url)
            .map_err(|e| ArborError::Configuration(format!("Invalid Ollama URL: {}", e)))?;

        let host = url.host_str().unwrap_or("localhost").to_string();
        let port = url.port().unwrap_or(11434);

        #[cfg(feature = "ollama")]
        let client = Ollama::new(format!("http://{}", host), port);

        #[cfg(not(feature = "ollama"))]
        let _ = (host, port);

        let mut config = config;
        if config.model.is_empty() {
            config.model = "llama3.1".to_string();
        }

        Ok(Self {
            #[cfg(feature = "ollama")]
            client,
            config,
        })
    }
}

#[async_trait]
impl Llm for OllamaLlm {
    #[cfg(feature = "ollama")]
    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> ArborResult<String> {
        let request = GenerationRequest::new(self.config.model.clone(), prompt.to_string());

        let response = self
            .client
            .generate(request)
            .await
            .map_err(|e| ArborError::llm(format!("Ollama API error: {}", e)))?;

        Ok(response.response)
    }

    #[cfg(not(feature = "ollama"))]
    async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> ArborResult<String> {
        Err(ArborError::Configuration(
            "Ollama feature not enabled. Enable the 'ollama' feature.".to_string(),
        ))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
