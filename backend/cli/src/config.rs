//! Runtime configuration for the CLI: the config file plus environment
//! overrides, mapped onto planner types.

use std::time::Duration;

use bridger_config::schema::{ResolvedGate, ResolvedModel};
use bridger_config::{BridgerConfig, ModelConfig};
use bridger_planner::{GateThresholds, SimplifierOptions};

/// Apply `OLLAMA_URL` and `BRIDGER_MODEL` on top of the loaded file.
pub fn apply_env_overrides(config: BridgerConfig) -> BridgerConfig {
    apply_overrides(
        config,
        std::env::var("OLLAMA_URL").ok(),
        std::env::var("BRIDGER_MODEL").ok(),
    )
}

fn apply_overrides(
    mut config: BridgerConfig,
    ollama_url: Option<String>,
    model_name: Option<String>,
) -> BridgerConfig {
    let model = config.model.get_or_insert_with(ModelConfig::default);
    if let Some(url) = ollama_url.filter(|u| !u.trim().is_empty()) {
        model.base_url = Some(url);
    }
    if let Some(name) = model_name.filter(|n| !n.trim().is_empty()) {
        model.name = Some(name);
    }
    config
}

pub fn simplifier_options(model: &ResolvedModel) -> SimplifierOptions {
    SimplifierOptions {
        model: model.name.clone(),
        timeout: Duration::from_secs(model.timeout_secs.max(1)),
        temperature: model.temperature,
        top_p: model.top_p,
        repeat_penalty: model.repeat_penalty,
    }
}

pub fn gate_thresholds(gate: &ResolvedGate) -> GateThresholds {
    GateThresholds {
        min_overlap_ratio: gate.min_overlap_ratio,
        max_length_ratio: gate.max_length_ratio,
        min_token_len: gate.min_token_len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridger_config::apply_all_defaults;

    #[test]
    fn env_values_override_file_values() {
        let mut config = BridgerConfig::default();
        config.model = Some(ModelConfig {
            name: Some("llama3.2:3b".into()),
            ..Default::default()
        });
        let config = apply_overrides(config, Some("http://gpu-box:11434".into()), None);
        let model = config.model();
        assert_eq!(model.base_url, "http://gpu-box:11434");
        assert_eq!(model.name, "llama3.2:3b");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let config = apply_overrides(BridgerConfig::default(), Some(" ".into()), Some(String::new()));
        let model = apply_all_defaults(config).model();
        assert_eq!(model.base_url, "http://localhost:11434");
        assert_eq!(model.name, "gemma3:1b");
    }

    #[test]
    fn defaults_map_to_planner_defaults() {
        let config = apply_all_defaults(BridgerConfig::default());
        let options = simplifier_options(&config.model());
        let expected = SimplifierOptions::default();
        assert_eq!(options.model, expected.model);
        assert_eq!(options.timeout, expected.timeout);
        assert_eq!(options.temperature, expected.temperature);
        assert_eq!(gate_thresholds(&config.gate()), GateThresholds::default());
    }
}
