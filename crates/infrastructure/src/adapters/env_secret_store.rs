//! Environment-based secret store adapter
//!
//! Reads the two API keys from `CWA_API_KEY` and `GEMINI_API_KEY` so they
//! never have to be written into the configuration file.

use std::env;

use application::{error::ApplicationError, ports::SecretStorePort};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::config::{CWA_API_KEY_PATH, GEMINI_API_KEY_PATH};

/// Secret store that reads API keys from environment variables
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretStore;

impl EnvSecretStore {
    /// Create a new environment secret store
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Environment variable holding the secret at `key`
    fn env_var(key: &str) -> Option<&'static str> {
        match key {
            CWA_API_KEY_PATH => Some("CWA_API_KEY"),
            GEMINI_API_KEY_PATH => Some("GEMINI_API_KEY"),
            _ => None,
        }
    }
}

#[async_trait]
impl SecretStorePort for EnvSecretStore {
    #[instrument(skip(self))]
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError> {
        let env_var = Self::env_var(key)
            .ok_or_else(|| ApplicationError::NotFound(format!("Unknown secret: {key}")))?;

        match env::var(env_var) {
            Ok(value) => {
                debug!(env_var, "Retrieved secret from environment variable");
                Ok(value)
            },
            Err(env::VarError::NotPresent) => Err(ApplicationError::NotFound(format!(
                "Secret not found: {key} (env: {env_var})"
            ))),
            Err(env::VarError::NotUnicode(_)) => Err(ApplicationError::Configuration(format!(
                "Secret contains invalid UTF-8: {env_var}"
            ))),
        }
    }
}
