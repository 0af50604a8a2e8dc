//! Port for secret storage and retrieval
//!
//! This port defines the interface for retrieving API keys from a backend
//! (environment variables by default).

use async_trait::async_trait;

use crate::error::ApplicationError;

/// Port for secret storage operations
#[async_trait]
pub trait SecretStorePort: Send + Sync {
    /// Retrieve a secret by its key/path
    ///
    /// # Arguments
    /// * `key` - The key or path to the secret (e.g., "gemini/api_key")
    ///
    /// # Returns
    /// The secret value as a string, or [`ApplicationError::NotFound`]
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError>;
}
