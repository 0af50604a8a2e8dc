//! Port definitions for inference engine
//!
//! Defines the traits (ports) that inference adapters must implement.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Request for inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest {
    /// System instruction steering tone and content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    /// Single-turn user prompt
    pub prompt: String,
    /// Model to use (overrides config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl InferenceRequest {
    /// Create a simple single-turn request
    pub fn simple(prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            prompt: prompt.into(),
            model: None,
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Create a request with a system instruction
    pub fn with_system(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: Some(system.into()),
            ..Self::simple(prompt)
        }
    }

    /// Set the model for this request
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set temperature
    #[must_use]
    pub const fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Response from inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResponse {
    /// Generated content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Port for inference engine implementations
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Generate a complete response
    async fn generate(
        &self,
        api_key: &SecretString,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, GenerationError>;

    /// List models the key can use
    async fn list_models(&self, api_key: &SecretString) -> Result<Vec<String>, GenerationError>;

    /// Get the current default model
    fn default_model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_request_simple() {
        let req = InferenceRequest::simple("Hello");
        assert_eq!(req.prompt, "Hello");
        assert!(req.system_instruction.is_none());
    }

    #[test]
    fn inference_request_with_system() {
        let req = InferenceRequest::with_system("您是主播", "天氣如何");
        assert_eq!(req.system_instruction.as_deref(), Some("您是主播"));
        assert_eq!(req.prompt, "天氣如何");
    }

    #[test]
    fn inference_request_chaining() {
        let req = InferenceRequest::simple("Test")
            .with_model("gemini-2.5-pro")
            .with_temperature(0.3);
        assert_eq!(req.model, Some("gemini-2.5-pro".to_string()));
        assert_eq!(req.temperature, Some(0.3));
    }

    #[test]
    fn inference_request_skip_none_fields() {
        let req = InferenceRequest::simple("Test");
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("model"));
        assert!(!json.contains("system_instruction"));
        assert!(!json.contains("temperature"));
    }
}
