//! Generation errors

use thiserror::Error;

/// Errors that can occur while generating a report
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Failed to connect to the model provider
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request could not be sent
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Timeout during generation
    #[error("Generation timeout after {0}ms")]
    Timeout(u64),

    /// The API key was rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Provider returned a non-success status
    #[error("Server error: {0}")]
    ServerError(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The model returned no candidate text
    #[error("Model returned no text")]
    EmptyResponse,
}

impl GenerationError {
    /// Map a transport error, reporting timeouts with the configured budget
    #[must_use]
    pub fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
