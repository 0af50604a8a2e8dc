//! Configuration for the Gemini inference client

use serde::{Deserialize, Serialize};

/// Configuration for the inference engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the Generative Language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default model to use
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Temperature for sampling (provider default when unset)
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Upper bound on generated tokens (provider default when unset)
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

const fn default_timeout_ms() -> u64 {
    60000 // 60 seconds
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_model: default_model(),
            timeout_ms: default_timeout_ms(),
            temperature: None,
            max_output_tokens: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = InferenceConfig::default();
        assert_eq!(
            config.base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.default_model, "gemini-2.5-flash");
        assert_eq!(config.timeout_ms, 60000);
        assert!(config.temperature.is_none());
        assert!(config.max_output_tokens.is_none());
    }

    #[test]
    fn config_deserialization() {
        let json = r#"{"base_url":"http://custom:8080","default_model":"gemini-2.5-pro","temperature":0.4}"#;
        let config: InferenceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "http://custom:8080");
        assert_eq!(config.default_model, "gemini-2.5-pro");
        assert!((config.temperature.unwrap() - 0.4).abs() < 0.01);
    }

    #[test]
    fn config_deserialization_with_defaults() {
        let config: InferenceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.default_model, "gemini-2.5-flash");
        assert_eq!(config.timeout_ms, 60000);
    }
}
