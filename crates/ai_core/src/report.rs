//! Weather report generation
//!
//! Wraps a flattened forecast into the fixed instruction/prompt pair and
//! turns the model output into a [`Report`].

use domain::Report;
use secrecy::SecretString;
use tracing::{debug, instrument, warn};

use crate::error::GenerationError;
use crate::ports::{InferenceEngine, InferenceRequest};

/// Persona and content constraints sent as the system instruction
pub const SYSTEM_INSTRUCTION: &str = concat!(
    "您是一位專業的天氣報告主播，請根據提供的數據，",
    "以溫和、親切、帶有問候的語氣，為聽眾總結這份天氣預報。",
    "報告中必須包含天氣現象、最高溫、最低溫、降雨機率和舒適度建議。",
    "請以繁體中文撰寫，內容約 50-80 字。"
);

const PROMPT_PREFIX: &str = "請為這份天氣預報數據生成一份溫暖的報告:\n\n---\n";

/// Build the user prompt for a flattened forecast
#[must_use]
pub fn build_prompt(forecast: &str) -> String {
    format!("{PROMPT_PREFIX}{forecast}")
}

/// Generates narrated weather reports through an inference engine
#[derive(Debug)]
pub struct ReportGenerator<E> {
    engine: E,
}

impl<E: InferenceEngine> ReportGenerator<E> {
    /// Create a generator on top of the given engine
    pub const fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Access the underlying engine
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Generate a report, keeping the failure typed
    ///
    /// # Errors
    ///
    /// Returns the engine's error when the call fails or yields no text.
    #[instrument(skip(self, api_key, forecast), fields(model = %self.engine.default_model()))]
    pub async fn try_generate(
        &self,
        api_key: &SecretString,
        forecast: &str,
    ) -> Result<Report, GenerationError> {
        let request = InferenceRequest::with_system(SYSTEM_INSTRUCTION, build_prompt(forecast));
        let response = self.engine.generate(api_key, request).await?;

        debug!(chars = response.content.chars().count(), "Report generated");
        Ok(Report::narrated(response.content, response.model))
    }

    /// Generate a report, folding any failure into a marked failure report
    pub async fn generate(&self, api_key: &SecretString, forecast: &str) -> Report {
        match self.try_generate(api_key, forecast).await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Report generation failed");
                Report::failure(e)
            },
        }
    }
}
