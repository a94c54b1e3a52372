//! Bridger configuration management.
//!
//! Provides:
//! - Typed config schema (reading settings, model, gate, logging)
//! - YAML loading with first-run defaults
//! - JSON Merge Patch updates
//! - Default value application and sanitising of numeric settings
//! - Schema validation with path-addressed messages
//! - An in-memory settings store that publishes every change

pub mod defaults;
pub mod io;
pub mod schema;
pub mod store;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use io::{apply_merge_patch, apply_settings_patch, config_dir, config_file_path, load_config};
pub use schema::{BridgerConfig, GateConfig, LoggingConfig, ModelConfig};
pub use store::SettingsStore;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::Result;
use std::path::Path;

/// Apply defaults to a loaded config and validate it.
///
/// Callers that adjust the raw config (e.g. environment overrides) do so
/// between `load_config` and this step, and decide how to report problems.
pub fn prepare(config: BridgerConfig) -> (BridgerConfig, ValidationReport) {
    let config = apply_all_defaults(config);
    let report = validate(&config);
    (config, report)
}

/// Load a config file, apply defaults and validate it in one call.
///
/// Validation problems are logged; errors do not abort loading.
pub async fn load_and_prepare(path: &Path) -> Result<BridgerConfig> {
    let (config, report) = prepare(load_config(path).await?);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }

    Ok(config)
}
