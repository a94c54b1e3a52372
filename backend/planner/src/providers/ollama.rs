use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use bridger_core::{LlmProvider, LlmRequest, LlmResponse};

/// Default local Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Ollama local LLM provider, using the non-streaming generate endpoint.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
}

impl OllamaProvider {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_OLLAMA_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    repeat_penalty: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Strip any provider prefix like "ollama/" from a model name.
fn local_model_name(model: &str) -> &str {
    model.rsplit('/').next().unwrap_or(model)
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let start = Instant::now();
        let model = local_model_name(&request.model).to_string();

        let body = GenerateRequest {
            model: model.clone(),
            prompt: request.prompt.clone(),
            stream: false,
            options: GenerateOptions {
                temperature: request.temperature,
                top_p: request.top_p,
                repeat_penalty: request.repeat_penalty,
            },
        };

        debug!(model = %model, "Sending request to Ollama");

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .context("Ollama HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Ollama error {}: {}", status, error_body);
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        Ok(LlmResponse {
            content: generated.response,
            provider: "ollama".to_string(),
            model,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_model_name() {
        assert_eq!(local_model_name("gemma3:1b"), "gemma3:1b");
        assert_eq!(local_model_name("ollama/gemma3:1b"), "gemma3:1b");
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            model: "gemma3:1b".into(),
            prompt: "p".into(),
            stream: false,
            options: GenerateOptions {
                temperature: 0.5,
                top_p: 0.5,
                repeat_penalty: 1.5,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gemma3:1b",
                "prompt": "p",
                "stream": false,
                "options": {"temperature": 0.5, "top_p": 0.5, "repeat_penalty": 1.5}
            })
        );
    }

    #[test]
    fn test_missing_response_field_is_empty() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"done": true}"#).unwrap();
        assert!(parsed.response.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let provider = OllamaProvider::new().with_base_url("http://127.0.0.1:11434/");
        assert_eq!(provider.base_url, "http://127.0.0.1:11434");
    }
}
