//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// City is not one of the selectable forecast locations
    #[error("Unknown city: {0}")]
    UnknownCity(String),
}

/// Forecast fetch errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    /// The request could not be sent or returned a non-success status
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body does not have the expected structure
    #[error("Parse error: {0}")]
    Parse(String),
}
