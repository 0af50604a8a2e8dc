//! Gemini REST client implementation

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::types::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ModelsResponse,
};
use crate::config::InferenceConfig;
use crate::error::GenerationError;
use crate::ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Inference engine backed by the Gemini `generateContent` endpoint
#[derive(Debug)]
pub struct GeminiClient {
    client: Client,
    config: InferenceConfig,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: InferenceConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GenerationError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized Gemini client"
        );

        Ok(Self { client, config })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, GenerationError> {
        Self::new(InferenceConfig::default())
    }

    /// Build the API URL for a given path below the version root
    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Get the model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a InferenceRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }

    fn build_body(&self, request: InferenceRequest) -> GenerateContentRequest {
        let temperature = request.temperature.or(self.config.temperature);
        let max_output_tokens = request.max_output_tokens.or(self.config.max_output_tokens);
        let generation_config = (temperature.is_some() || max_output_tokens.is_some()).then_some(
            GenerationConfig {
                temperature,
                max_output_tokens,
            },
        );

        GenerateContentRequest {
            system_instruction: request
                .system_instruction
                .map(|text| Content::text(None, text)),
            contents: vec![Content::text(Some("user"), request.prompt)],
            generation_config,
        }
    }

    fn map_transport(&self, err: &reqwest::Error) -> GenerationError {
        GenerationError::from_transport(err, self.config.timeout_ms)
    }
}

/// Turn a non-success response into a typed error carrying the provider message
async fn error_from_response(response: Response) -> GenerationError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body).map_or_else(
        |_| body,
        |envelope| match envelope.error.status {
            Some(code) if !envelope.error.message.is_empty() => {
                format!("{code}: {}", envelope.error.message)
            },
            _ => envelope.error.message,
        },
    );

    warn!(status = %status, message = %message, "Gemini request failed");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited,
        _ => GenerationError::ServerError(format!("Status {status}: {message}")),
    }
}

#[async_trait]
impl InferenceEngine for GeminiClient {
    #[instrument(skip(self, api_key, request), fields(model = %self.resolve_model(&request)))]
    async fn generate(
        &self,
        api_key: &SecretString,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, GenerationError> {
        let model = self.resolve_model(&request).to_string();
        let body = self.build_body(request);

        debug!("Sending generateContent request");

        let response = self
            .client
            .post(self.api_url(&format!("models/{model}:generateContent")))
            .header(API_KEY_HEADER, api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport(&e))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let Some(candidate) = parsed.candidates.first() else {
            if let Some(reason) = parsed
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
            {
                warn!(block_reason = %reason, "Prompt was blocked");
            }
            return Err(GenerationError::EmptyResponse);
        };
        let content = candidate.text().ok_or(GenerationError::EmptyResponse)?;

        let usage = parsed.usage_metadata.as_ref().map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        debug!(tokens = ?usage, "Generation completed");

        Ok(InferenceResponse {
            content,
            model: parsed.model_version.unwrap_or(model),
            usage,
            finish_reason: candidate.finish_reason.clone(),
        })
    }

    #[instrument(skip(self, api_key))]
    async fn list_models(&self, api_key: &SecretString) -> Result<Vec<String>, GenerationError> {
        let response = self
            .client
            .get(self.api_url("models"))
            .header(API_KEY_HEADER, api_key.expose_secret())
            .send()
            .await
            .map_err(|e| self.map_transport(&e))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let models: ModelsResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        Ok(models
            .models
            .into_iter()
            .map(|m| {
                m.name
                    .strip_prefix("models/")
                    .map_or_else(|| m.name.clone(), str::to_string)
            })
            .collect())
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_segments() {
        let engine = GeminiClient::with_defaults().unwrap();
        assert_eq!(
            engine.api_url("models/gemini-2.5-flash:generateContent"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            engine.api_url("/models"),
            "https://generativelanguage.googleapis.com/v1beta/models"
        );
    }

    #[test]
    fn default_model_is_flash() {
        let engine = GeminiClient::with_defaults().unwrap();
        assert_eq!(engine.default_model(), "gemini-2.5-flash");
    }

    #[test]
    fn request_model_overrides_default() {
        let engine = GeminiClient::with_defaults().unwrap();
        let request = InferenceRequest::simple("hi").with_model("gemini-2.5-pro");
        assert_eq!(engine.resolve_model(&request), "gemini-2.5-pro");
    }

    #[test]
    fn generation_config_omitted_without_overrides() {
        let engine = GeminiClient::with_defaults().unwrap();
        let body = engine.build_body(InferenceRequest::with_system("sys", "prompt"));
        assert!(body.generation_config.is_none());
        assert!(body.system_instruction.is_some());
    }

    #[test]
    fn generation_config_falls_back_to_config() {
        let engine = GeminiClient::new(InferenceConfig {
            temperature: Some(0.2),
            max_output_tokens: Some(200),
            ..Default::default()
        })
        .unwrap();
        let body = engine.build_body(InferenceRequest::simple("prompt").with_temperature(0.9));
        let config = body.generation_config.unwrap();
        assert_eq!(config.temperature, Some(0.9));
        assert_eq!(config.max_output_tokens, Some(200));
    }
}
