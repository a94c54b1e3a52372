//! User-visible notices raised while transforming a selection.

use serde::Serialize;

pub const PROCESSING: &str = "Processing...";
pub const CORS_BLOCKED: &str = "Ollama blocked by CORS";
pub const TRANSFORM_FAILED: &str = "Simplification failed; showing original text";
pub const KEPT_ORIGINAL: &str = "Kept original text";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
