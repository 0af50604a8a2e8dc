//! Report adapter - Implements ReportPort using the Gemini report generator

use ai_core::{GeminiClient, GenerationError, InferenceConfig, InferenceEngine, ReportGenerator};
use application::error::ApplicationError;
use application::ports::ReportPort;
use async_trait::async_trait;
use domain::Report;
use secrecy::SecretString;
use tracing::instrument;

/// Adapter that narrates forecasts with Gemini
#[derive(Debug)]
pub struct GeminiReportAdapter {
    generator: ReportGenerator<GeminiClient>,
}

impl GeminiReportAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let client =
            GeminiClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self {
            generator: ReportGenerator::new(client),
        })
    }

    /// List the models the key can use
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Generation`] when the listing fails.
    pub async fn list_models(
        &self,
        api_key: &SecretString,
    ) -> Result<Vec<String>, ApplicationError> {
        self.generator
            .engine()
            .list_models(api_key)
            .await
            .map_err(|e| Self::map_error(&e))
    }

    fn map_error(err: &GenerationError) -> ApplicationError {
        ApplicationError::Generation(err.to_string())
    }
}

#[async_trait]
impl ReportPort for GeminiReportAdapter {
    #[instrument(skip(self, api_key, forecast))]
    async fn generate_report(
        &self,
        api_key: &SecretString,
        forecast: &str,
    ) -> Result<Report, ApplicationError> {
        self.generator
            .try_generate(api_key, forecast)
            .await
            .map_err(|e| Self::map_error(&e))
    }

    fn model_name(&self) -> String {
        self.generator.engine().default_model().to_string()
    }
}
