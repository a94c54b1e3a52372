//! Bridger configuration schema.
//!
//! Typed for serde YAML/JSON deserialization with camelCase keys. Every
//! section is optional; `defaults::apply_all_defaults` fills the gaps.

use bridger_core::Settings;
use serde::{Deserialize, Serialize};

use crate::defaults::{
    DEFAULT_LOG_LEVEL, DEFAULT_MAX_LENGTH_RATIO, DEFAULT_MIN_OVERLAP_RATIO, DEFAULT_MIN_TOKEN_LEN,
    DEFAULT_MODEL_NAME, DEFAULT_OLLAMA_URL, DEFAULT_REPEAT_PENALTY, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECS, DEFAULT_TOP_P,
};

/// Root configuration for Bridger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgerConfig {
    /// Reading settings (long-word assist, highlight look, typography, view mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,

    /// Model endpoint and sampling options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelConfig>,

    /// Output quality gate thresholds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<GateConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_overlap_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_token_len: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Emit JSON lines on the console instead of human-readable output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    /// Directory for daily-rolling NDJSON log files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// Model options with every default resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedModel {
    pub base_url: String,
    pub name: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub top_p: f32,
    pub repeat_penalty: f32,
}

/// Gate thresholds with every default resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGate {
    pub min_overlap_ratio: f64,
    pub max_length_ratio: f64,
    pub min_token_len: usize,
}

impl BridgerConfig {
    pub fn settings(&self) -> Settings {
        self.settings.clone().unwrap_or_default()
    }

    pub fn model(&self) -> ResolvedModel {
        let model = self.model.clone().unwrap_or_default();
        ResolvedModel {
            base_url: model.base_url.unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            name: model.name.unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
            timeout_secs: model.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            temperature: model.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: model.top_p.unwrap_or(DEFAULT_TOP_P),
            repeat_penalty: model.repeat_penalty.unwrap_or(DEFAULT_REPEAT_PENALTY),
        }
    }

    pub fn gate(&self) -> ResolvedGate {
        let gate = self.gate.clone().unwrap_or_default();
        ResolvedGate {
            min_overlap_ratio: gate.min_overlap_ratio.unwrap_or(DEFAULT_MIN_OVERLAP_RATIO),
            max_length_ratio: gate.max_length_ratio.unwrap_or(DEFAULT_MAX_LENGTH_RATIO),
            min_token_len: gate.min_token_len.unwrap_or(DEFAULT_MIN_TOKEN_LEN),
        }
    }

    pub fn log_level(&self) -> String {
        self.logging
            .as_ref()
            .and_then(|l| l.level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridger_core::{HighlightColor, ViewMode};

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
settings:
  splitLongWords: true
  highlightColor: teal
  viewMode: original
model:
  name: llama3.2:3b
  timeoutSecs: 12
gate:
  maxLengthRatio: 1.5
"#;
        let config: BridgerConfig = serde_yaml::from_str(yaml).unwrap();
        let settings = config.settings();
        assert!(settings.split_long_words);
        assert!(!settings.highlight_long_words);
        assert_eq!(settings.highlight_color, HighlightColor::Teal);
        assert_eq!(settings.view_mode, ViewMode::Original);
        assert_eq!(config.model().name, "llama3.2:3b");
        assert_eq!(config.model().timeout_secs, 12);
        assert_eq!(config.model().base_url, DEFAULT_OLLAMA_URL);
        assert_eq!(config.gate().max_length_ratio, 1.5);
        assert_eq!(config.gate().min_overlap_ratio, DEFAULT_MIN_OVERLAP_RATIO);
    }

    #[test]
    fn test_empty_config_serializes_to_empty_map() {
        let yaml = serde_yaml::to_string(&BridgerConfig::default()).unwrap();
        assert_eq!(yaml.trim(), "{}");
    }
}
