//! Application configuration model.

use crate::generation::GenerationParams;
use serde::{Deserialize, Serialize};

/// Identifier of the model loaded when no configuration overrides it.
pub const DEFAULT_MODEL_ID: &str = "Qwen2.5-1.5B-Instruct-q4f16_1";

/// Model selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub id: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_MODEL_ID.to_string(),
        }
    }
}

/// Root configuration for the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlumeConfig {
    pub model: ModelConfig,
    pub generation: GenerationParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlumeConfig::default();
        assert_eq!(config.model.id, DEFAULT_MODEL_ID);
        assert_eq!(config.generation, GenerationParams::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = PlumeConfig::default();
        config.model.id = "Llama-3.2-1B-Instruct-q4f16_1".to_string();
        config.generation.temperature = 0.3;

        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: PlumeConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: PlumeConfig = toml::from_str("[model]\nid = \"tiny\"").unwrap();
        assert_eq!(parsed.model.id, "tiny");
        assert_eq!(parsed.generation, GenerationParams::default());
    }
}
