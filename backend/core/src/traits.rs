use anyhow::Result;
use async_trait::async_trait;

use crate::error::BridgerError;

/// Trait for text-generation backends (e.g. a local Ollama server).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "ollama", "mock").
    fn name(&self) -> &str;

    /// Send a single non-streaming completion request and return the response text.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Request to an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub top_p: f32,
    pub repeat_penalty: f32,
}

/// Response from an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub latency_ms: u64,
}

/// The capability the view layer consumes: turn selected text into simplified,
/// marker-annotated text, or fail. There are no partial results.
#[async_trait]
pub trait TextTransformer: Send + Sync {
    async fn transform(&self, text: &str) -> std::result::Result<String, BridgerError>;
}
