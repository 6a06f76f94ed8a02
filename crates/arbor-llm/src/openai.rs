//! OpenAI LLM provider implementation.

use async_trait::async_trait;

use arbor_core::error::{ArborError, ArborResult};
use arbor_core::traits::{GenerationOptions, Llm, LlmConfig};

#[cfg(feature = "openai")]
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequest,
    },
    Client,
};

/// OpenAI LLM provider.
pub struct OpenAILlm {
    #[cfg(feature = "openai")]
    client: Client<OpenAIConfig>,
    config: LlmConfig,
}

impl OpenAILlm {
    /// Create a new OpenAI LLM provider.
    pub fn new(config: LlmConfig) -> ArborResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                ArborError::Configuration("OpenAI API key not found. Set OPENAI_API_KEY environment variable or provide api_key in config.".to_string())
            })?;

        #[cfg(feature = "openai")]
        let openai_config = if let Some(ref base_url) = config.base_url {
            OpenAIConfig::new()
                .with_api_key(api_key)
                .with_api_base(base_url)
        } else {
            OpenAIConfig::new().with_api_key(api_key)
        };

        #[cfg(feature = "openai")]
        let client = Client::with_config(openai_config);

        #[cfg(not(feature = "openai"))]
        let _ = api_key;

        let mut config = config;
        if config.model.is_empty() {
            config.model = "gpt-4o-mini".to_string();
        }

        Ok(Self {
            #[cfg(feature = "openai")]
            client,
            config,
        })
    }
}

#[async_trait]
impl Llm for OpenAILlm {
    #[cfg(feature = "openai")]
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> ArborResult<String> {
        let message = ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: prompt.into(),
            name: None,
        });

        let request = CreateChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![message],
            temperature: options.temperature.or(self.config.options.temperature),
            max_tokens: options.max_tokens.or(self.config.options.max_tokens),
            ..Default::default()
        };

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ArborError::llm(format!("OpenAI API error: {}", e)))?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| ArborError::llm("No completion returned"))
    }

    #[cfg(not(feature = "openai"))]
    async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> ArborResult<String> {
        Err(ArborError::Configuration(
            "OpenAI feature not enabled. Enable the 'openai' feature.".to_string(),
        ))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
