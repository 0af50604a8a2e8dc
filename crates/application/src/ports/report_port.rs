//! Report port
//!
//! Defines the interface for turning forecast text into a narrated report.

use async_trait::async_trait;
use domain::Report;
#[cfg(test)]
use mockall::automock;
use secrecy::SecretString;

use crate::error::ApplicationError;

/// Port for report generation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReportPort: Send + Sync {
    /// Generate a report for the rendered forecast text
    ///
    /// # Errors
    /// Returns [`ApplicationError::Generation`] when the model call fails.
    async fn generate_report(
        &self,
        api_key: &SecretString,
        forecast: &str,
    ) -> Result<Report, ApplicationError>;

    /// Model used for new reports
    fn model_name(&self) -> String;
}
