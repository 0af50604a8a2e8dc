//! Upstream service configuration: CWA open data and Gemini.

use ai_core::InferenceConfig;
use integration_cwa::CwaConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

// ==============================
// CWA Configuration
// ==============================

/// CWA open-data API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CwaAppConfig {
    /// Datastore base URL
    #[serde(default = "default_cwa_base_url")]
    pub base_url: String,

    /// Dataset identifier
    #[serde(default = "default_dataset_id")]
    pub dataset_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_cwa_timeout")]
    pub timeout_secs: u64,

    /// Skip TLS certificate validation (flagged by the security validator)
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// API key (prefer the `CWA_API_KEY` environment variable)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

fn default_cwa_base_url() -> String {
    CwaConfig::default().base_url
}

fn default_dataset_id() -> String {
    CwaConfig::default().dataset_id
}

fn default_cwa_timeout() -> u64 {
    CwaConfig::default().timeout_secs
}

impl Default for CwaAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_cwa_base_url(),
            dataset_id: default_dataset_id(),
            timeout_secs: default_cwa_timeout(),
            accept_invalid_certs: false,
            api_key: None,
        }
    }
}

impl CwaAppConfig {
    /// Client settings without the key
    #[must_use]
    pub fn client_config(&self) -> CwaConfig {
        CwaConfig {
            base_url: self.base_url.clone(),
            dataset_id: self.dataset_id.clone(),
            timeout_secs: self.timeout_secs,
            accept_invalid_certs: self.accept_invalid_certs,
        }
    }
}

// ==============================
// Gemini Configuration
// ==============================

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiAppConfig {
    /// Generative Language API base URL
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Model used for reports
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_gemini_timeout_ms")]
    pub timeout_ms: u64,

    /// Sampling temperature (provider default when unset)
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Upper bound on generated tokens (provider default when unset)
    #[serde(default)]
    pub max_output_tokens: Option<u32>,

    /// API key (prefer the `GEMINI_API_KEY` environment variable)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

fn default_gemini_base_url() -> String {
    InferenceConfig::default().base_url
}

fn default_gemini_model() -> String {
    InferenceConfig::default().default_model
}

fn default_gemini_timeout_ms() -> u64 {
    InferenceConfig::default().timeout_ms
}

impl Default for GeminiAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            timeout_ms: default_gemini_timeout_ms(),
            temperature: None,
            max_output_tokens: None,
            api_key: None,
        }
    }
}

impl GeminiAppConfig {
    /// Inference settings without the key
    #[must_use]
    pub fn inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            base_url: self.base_url.clone(),
            default_model: self.model.clone(),
            timeout_ms: self.timeout_ms,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}
