use thiserror::Error;

/// Top-level error type for the Bridger pipeline.
///
/// Only the transform capability can fail; parsing, segmenting, rendering
/// and gating are total.
#[derive(Debug, Error)]
pub enum BridgerError {
    #[error("model call timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("model provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    #[error("empty response from model")]
    EmptyResponse,

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BridgerError {
    /// Whether the failure looks like the provider refused a cross-origin request.
    pub fn is_cors_blocked(&self) -> bool {
        let message = match self {
            BridgerError::Provider { message, .. } => message.to_lowercase(),
            BridgerError::Other(err) => format!("{err:#}").to_lowercase(),
            _ => return false,
        };
        message.contains("403") || message.contains("cors") || message.contains("cross-origin")
    }
}
