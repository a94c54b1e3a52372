//! Config file loading and in-memory patching.
//!
//! Bridger never writes the config file; settings changes are applied in
//! memory with JSON Merge Patch.

use crate::schema::BridgerConfig;
use anyhow::{Context, Result};
use bridger_core::Settings;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the Bridger config directory.
/// Priority: `BRIDGER_CONFIG_DIR` env > `~/.bridger/` > `./.bridger`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BRIDGER_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".bridger");
    }
    PathBuf::from(".bridger")
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<BridgerConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(BridgerConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if raw.trim().is_empty() {
        return Ok(BridgerConfig::default());
    }

    let config: BridgerConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Patch config with a JSON Merge Patch (RFC 7396).
pub fn apply_merge_patch(config: &BridgerConfig, patch: &serde_json::Value) -> Result<BridgerConfig> {
    patch_typed(config, patch)
}

/// Patch reading settings with a JSON Merge Patch, e.g. `{"splitLongWords": true}`.
pub fn apply_settings_patch(settings: &Settings, patch: &serde_json::Value) -> Result<Settings> {
    patch_typed(settings, patch)
}

/// Serialize, patch, and deserialize back, so partial updates keep every
/// untouched field.
fn patch_typed<T: Serialize + DeserializeOwned>(value: &T, patch: &serde_json::Value) -> Result<T> {
    let mut json = serde_json::to_value(value).context("Failed to serialize for merge patch")?;
    json_merge_patch(&mut json, patch);
    serde_json::from_value(json).context("Failed to deserialize after merge patch")
}

/// RFC 7396 JSON Merge Patch algorithm.
fn json_merge_patch(target: &mut serde_json::Value, patch: &serde_json::Value) {
    if let serde_json::Value::Object(patch_map) = patch {
        if !target.is_object() {
            *target = serde_json::Value::Object(serde_json::Map::new());
        }
        if let serde_json::Value::Object(target_map) = target {
            for (key, patch_val) in patch_map {
                if patch_val.is_null() {
                    target_map.remove(key);
                } else {
                    let entry = target_map
                        .entry(key.clone())
                        .or_insert(serde_json::Value::Null);
                    json_merge_patch(entry, patch_val);
                }
            }
        }
    } else {
        *target = patch.clone();
    }
}
