//! arbor-llm - LLM provider implementations for arbor.
//!
//! This crate provides the answer-generation collaborators used by the
//! retrieval pipeline to turn a grounded context block into an answer.
//!
//! # Supported Providers
//!
//! - **OpenAI** (feature: `openai`) - GPT-4o, GPT-4o-mini, etc.
//! - **Ollama** (feature: `ollama`) - Local models via Ollama
//!
//! # Example
//!
//! ```ignore
//! use arbor_llm::LlmFactory;
//!
//! // Create an OpenAI LLM
//! let llm = LlmFactory::openai()?;
//!
//! // Or with a specific model
//! let llm = LlmFactory::openai_with_model("gpt-4o")?;
//! ```

mod factory;
mod ollama;
mod openai;

pub use factory::LlmFactory;
pub use ollama::OllamaLlm;
pub use openai::OpenAILlm;

// Re-export core types for convenience
pub use arbor_core::traits::{GenerationOptions, Llm, LlmConfig, LlmProvider};
