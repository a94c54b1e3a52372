use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use bridger_core::{BridgerError, LlmProvider, LlmRequest, TextTransformer};

use crate::prompt::build_prompt;

/// Default model tag requested from the provider.
pub const DEFAULT_MODEL: &str = "gemma3:1b";

/// Upper bound on a single model call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone)]
pub struct SimplifierOptions {
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub top_p: f32,
    pub repeat_penalty: f32,
}

impl Default for SimplifierOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            temperature: 0.2,
            top_p: 0.9,
            repeat_penalty: 1.1,
        }
    }
}

/// Transform capability backed by an [`LlmProvider`].
///
/// Each call is a single request bounded by the configured timeout: either the
/// full response comes back or the call fails. No retries.
pub struct Simplifier {
    provider: Arc<dyn LlmProvider>,
    options: SimplifierOptions,
}

impl Simplifier {
    pub fn new(provider: Arc<dyn LlmProvider>, options: SimplifierOptions) -> Self {
        Self { provider, options }
    }

    pub fn options(&self) -> &SimplifierOptions {
        &self.options
    }

    fn request_for(&self, text: &str) -> LlmRequest {
        LlmRequest {
            model: self.options.model.clone(),
            prompt: build_prompt(text),
            temperature: self.options.temperature,
            top_p: self.options.top_p,
            repeat_penalty: self.options.repeat_penalty,
        }
    }
}

#[async_trait]
impl TextTransformer for Simplifier {
    async fn transform(&self, text: &str) -> Result<String, BridgerError> {
        let request = self.request_for(text);
        let provider = self.provider.name().to_string();

        debug!(provider = %provider, model = %request.model, chars = text.len(), "Requesting simplification");

        let response =
            match tokio::time::timeout(self.options.timeout, self.provider.complete(&request)).await {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    warn!(provider = %provider, error = %e, "Provider failed");
                    return Err(BridgerError::Provider {
                        provider,
                        message: format!("{e:#}"),
                    });
                }
                Err(_) => {
                    let secs = self.options.timeout.as_secs();
                    warn!(provider = %provider, timeout_secs = secs, "Provider timed out");
                    return Err(BridgerError::Timeout { secs });
                }
            };

        if response.content.trim().is_empty() {
            warn!(provider = %provider, "Provider returned an empty body");
            return Err(BridgerError::EmptyResponse);
        }

        info!(
            provider = %response.provider,
            model = %response.model,
            latency_ms = response.latency_ms,
            "Provider responded"
        );
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockProvider;

    fn simplifier(provider: MockProvider) -> Simplifier {
        Simplifier::new(Arc::new(provider), SimplifierOptions::default())
    }

    #[tokio::test]
    async fn test_returns_model_text() {
        let s = simplifier(MockProvider::new("mock").with_response("Short text."));
        assert_eq!(s.transform("A longer text.").await.unwrap(), "Short text.");
    }

    #[tokio::test]
    async fn test_provider_error_is_reported() {
        let s = simplifier(MockProvider::new("mock").with_failure("Ollama error 403 Forbidden: "));
        let err = s.transform("text").await.unwrap_err();
        assert!(matches!(err, BridgerError::Provider { ref provider, .. } if provider == "mock"));
        assert!(err.is_cors_blocked());
    }

    #[tokio::test]
    async fn test_blank_response_is_error() {
        let s = simplifier(MockProvider::new("mock").with_response("  \n"));
        assert!(matches!(
            s.transform("text").await,
            Err(BridgerError::EmptyResponse)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_after_eight_seconds() {
        let s = simplifier(MockProvider::new("slow").with_delay(Duration::from_secs(30)));
        let err = s.transform("text").await.unwrap_err();
        assert!(matches!(err, BridgerError::Timeout { secs: 8 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_but_in_time_succeeds() {
        let s = simplifier(
            MockProvider::new("slow")
                .with_delay(Duration::from_secs(7))
                .with_response("ok text"),
        );
        assert_eq!(s.transform("text").await.unwrap(), "ok text");
    }

    #[test]
    fn test_request_uses_prompt_and_options() {
        let s = simplifier(MockProvider::new("mock"));
        let request = s.request_for("Hello there.");
        assert_eq!(request.model, DEFAULT_MODEL);
        assert!(request.prompt.ends_with("Text:\nHello there."));
        assert_eq!(request.temperature, 0.2);
    }
}
