//! Config defaults: applies sensible default values to parsed config.

use bridger_core::types::{DEFAULT_HIGHLIGHT_THICKNESS, DEFAULT_LETTER_SPACING, DEFAULT_LINE_SPACING};
use bridger_core::Settings;

use crate::schema::{BridgerConfig, GateConfig, LoggingConfig, ModelConfig};

/// Default local Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default model tag.
pub const DEFAULT_MODEL_NAME: &str = "gemma3:1b";

/// Default model call timeout (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;

pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TOP_P: f32 = 0.9;
pub const DEFAULT_REPEAT_PENALTY: f32 = 1.1;

/// Minimum share of output tokens found in the input.
pub const DEFAULT_MIN_OVERLAP_RATIO: f64 = 0.4;

/// Maximum output/input length ratio.
pub const DEFAULT_MAX_LENGTH_RATIO: f64 = 1.2;

/// Shortest token the gate counts.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: BridgerConfig) -> BridgerConfig {
    let config = apply_settings_defaults(config);
    let config = apply_model_defaults(config);
    let config = apply_gate_defaults(config);
    apply_logging_defaults(config)
}

/// Replace non-finite or negative numeric settings with their defaults.
pub fn sanitize_settings(mut settings: Settings) -> Settings {
    if !settings.highlight_thickness.is_finite() || settings.highlight_thickness < 0.0 {
        settings.highlight_thickness = DEFAULT_HIGHLIGHT_THICKNESS;
    }
    if !settings.line_spacing.is_finite() || settings.line_spacing <= 0.0 {
        settings.line_spacing = DEFAULT_LINE_SPACING;
    }
    if !settings.letter_spacing.is_finite() {
        settings.letter_spacing = DEFAULT_LETTER_SPACING;
    }
    settings
}

fn apply_settings_defaults(mut config: BridgerConfig) -> BridgerConfig {
    let settings = config.settings.take().unwrap_or_default();
    config.settings = Some(sanitize_settings(settings));
    config
}

fn apply_model_defaults(mut config: BridgerConfig) -> BridgerConfig {
    let model = config.model.get_or_insert_with(ModelConfig::default);
    if model.base_url.is_none() {
        model.base_url = Some(DEFAULT_OLLAMA_URL.to_string());
    }
    if model.name.as_deref().map(str::trim).map_or(true, str::is_empty) {
        model.name = Some(DEFAULT_MODEL_NAME.to_string());
    }
    if model.timeout_secs.is_none() {
        model.timeout_secs = Some(DEFAULT_TIMEOUT_SECS);
    }
    if model.temperature.is_none() {
        model.temperature = Some(DEFAULT_TEMPERATURE);
    }
    if model.top_p.is_none() {
        model.top_p = Some(DEFAULT_TOP_P);
    }
    if model.repeat_penalty.is_none() {
        model.repeat_penalty = Some(DEFAULT_REPEAT_PENALTY);
    }
    config
}

fn apply_gate_defaults(mut config: BridgerConfig) -> BridgerConfig {
    let gate = config.gate.get_or_insert_with(GateConfig::default);
    if gate.min_overlap_ratio.is_none() {
        gate.min_overlap_ratio = Some(DEFAULT_MIN_OVERLAP_RATIO);
    }
    if gate.max_length_ratio.is_none() {
        gate.max_length_ratio = Some(DEFAULT_MAX_LENGTH_RATIO);
    }
    if gate.min_token_len.is_none() {
        gate.min_token_len = Some(DEFAULT_MIN_TOKEN_LEN);
    }
    config
}

fn apply_logging_defaults(mut config: BridgerConfig) -> BridgerConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.json.is_none() {
        logging.json = Some(false);
    }
    config
}
