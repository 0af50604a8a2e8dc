//! Application-level errors

use domain::{DomainError, ForecastError};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Forecast could not be fetched or parsed
    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    /// Report generation failed, carrying the model error message
    #[error("{0}")]
    Generation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Requested item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
