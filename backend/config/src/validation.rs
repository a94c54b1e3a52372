//! Config validation: range and shape checks with path-addressed messages.

use crate::schema::BridgerConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &BridgerConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_settings(config, &mut report);
    validate_model(config, &mut report);
    validate_gate(config, &mut report);
    validate_logging(config, &mut report);
    report
}

/// Typography values outside a readable range are allowed but flagged.
fn validate_settings(config: &BridgerConfig, report: &mut ValidationReport) {
    let Some(settings) = &config.settings else { return };
    if !(0.0..=10.0).contains(&settings.highlight_thickness) {
        report.warn(
            "settings.highlightThickness",
            format!("{} px is outside 0-10 px", settings.highlight_thickness),
        );
    }
    if !(1.0..=4.0).contains(&settings.line_spacing) {
        report.warn(
            "settings.lineSpacing",
            format!("{} is outside 1.0-4.0", settings.line_spacing),
        );
    }
    if !(0.0..=1.0).contains(&settings.letter_spacing) {
        report.warn(
            "settings.letterSpacing",
            format!("{} em is outside 0-1 em", settings.letter_spacing),
        );
    }
}

fn validate_model(config: &BridgerConfig, report: &mut ValidationReport) {
    let Some(model) = &config.model else { return };
    if let Some(url) = &model.base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            report.error("model.baseUrl", format!("'{url}' must be an http(s) URL"));
        }
    }
    if let Some(name) = &model.name {
        if name.trim().is_empty() {
            report.error("model.name", "Model name cannot be empty");
        }
    }
    if model.timeout_secs == Some(0) {
        report.error("model.timeoutSecs", "timeoutSecs must be >= 1");
    }
    if let Some(temperature) = model.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            report.warn("model.temperature", "temperature is usually between 0 and 2");
        }
    }
}

fn validate_gate(config: &BridgerConfig, report: &mut ValidationReport) {
    let Some(gate) = &config.gate else { return };
    if let Some(ratio) = gate.min_overlap_ratio {
        if !(0.0..=1.0).contains(&ratio) {
            report.error("gate.minOverlapRatio", "minOverlapRatio must be between 0 and 1");
        }
    }
    if let Some(ratio) = gate.max_length_ratio {
        if !ratio.is_finite() || ratio <= 0.0 {
            report.error("gate.maxLengthRatio", "maxLengthRatio must be > 0");
        }
    }
    if gate.min_token_len == Some(0) {
        report.warn("gate.minTokenLen", "minTokenLen 0 counts every fragment as a token");
    }
}

fn validate_logging(config: &BridgerConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    if let Some(level) = &logging.level {
        let simple = !level.contains('=') && !level.contains(',');
        if simple
            && !matches!(
                level.to_ascii_lowercase().as_str(),
                "trace" | "debug" | "info" | "warn" | "error" | "off"
            )
        {
            report.warn("logging.level", format!("Unknown log level '{level}'"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::apply_all_defaults;
    use crate::schema::{GateConfig, ModelConfig};
    use bridger_core::Settings;

    #[test]
    fn default_config_is_valid() {
        let report = validate(&apply_all_defaults(BridgerConfig::default()));
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    }

    #[test]
    fn zero_timeout_and_bad_url_are_errors() {
        let mut cfg = BridgerConfig::default();
        cfg.model = Some(ModelConfig {
            base_url: Some("localhost:11434".to_string()),
            timeout_secs: Some(0),
            ..Default::default()
        });
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].path, "model.baseUrl");
        assert_eq!(report.errors[1].path, "model.timeoutSecs");
    }

    #[test]
    fn overlap_ratio_out_of_range() {
        let mut cfg = BridgerConfig::default();
        cfg.gate = Some(GateConfig {
            min_overlap_ratio: Some(1.5),
            ..Default::default()
        });
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert!(report.errors[0].path.contains("minOverlapRatio"));
    }

    #[test]
    fn wide_line_spacing_is_warning() {
        let mut cfg = BridgerConfig::default();
        cfg.settings = Some(Settings {
            line_spacing: 6.0,
            ..Default::default()
        });
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "settings.lineSpacing");
    }
}
