//! Application configuration
//!
//! Split into focused sub-modules:
//! - `integrations`: CWA and Gemini endpoints
//! - `cache`: forecast/report cache settings
//! - `logging`: log filter and output format
//!
//! Values are layered: built-in defaults, then an optional `config.toml`,
//! then `WEATHER_REPORTER_*` environment variables (`__` separates nesting,
//! e.g. `WEATHER_REPORTER_GEMINI__MODEL`).

mod cache;
mod integrations;
mod logging;

use std::{fmt, path::Path};

use application::{
    Credentials,
    error::ApplicationError,
    ports::SecretStorePort,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use cache::CacheConfig;
pub use integrations::{CwaAppConfig, GeminiAppConfig};
pub use logging::{LogFormat, LoggingConfig};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "WEATHER_REPORTER";

/// Secret store path of the CWA key (`CWA_API_KEY` in the environment)
pub const CWA_API_KEY_PATH: &str = "cwa/api_key";

/// Secret store path of the Gemini key (`GEMINI_API_KEY` in the environment)
pub const GEMINI_API_KEY_PATH: &str = "gemini/api_key";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Controls security validation strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - relaxed security warnings
    #[default]
    Development,
    /// Production environment - strict security validation
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// CWA forecast API
    #[serde(default)]
    pub cwa: CwaAppConfig,

    /// Gemini report generation
    #[serde(default)]
    pub gemini: GeminiAppConfig,

    /// Forecast/report cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `./config.toml` (if present) and environment
    ///
    /// # Errors
    /// Returns an error when a source cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_path(None)
    }

    /// Load configuration from an explicit file, or `./config.toml` when `None`
    ///
    /// An explicit path must exist; the implicit `config.toml` is optional.
    ///
    /// # Errors
    /// Returns an error when the file is missing or a source cannot be parsed.
    pub fn load_from_path(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Fill missing API keys from a secret store
    ///
    /// Keys already present in the configuration are never overridden.
    /// Lookup failures are logged and leave the key unset.
    pub async fn resolve_secrets(&mut self, store: &dyn SecretStorePort) {
        info!("Resolving API keys from secret store");

        if self.cwa.api_key.is_none() {
            self.cwa.api_key = lookup(store, CWA_API_KEY_PATH).await;
        }
        if self.gemini.api_key.is_none() {
            self.gemini.api_key = lookup(store, GEMINI_API_KEY_PATH).await;
        }
    }

    /// Build validated credentials from the resolved keys
    ///
    /// # Errors
    /// Returns [`ApplicationError::Configuration`] when a key is missing,
    /// blank or still a placeholder.
    pub fn credentials(&self) -> Result<Credentials, ApplicationError> {
        let cwa = self.cwa.api_key.clone().ok_or_else(|| {
            ApplicationError::Configuration(
                "CWA API key not set (CWA_API_KEY or cwa.api_key)".to_string(),
            )
        })?;
        let gemini = self.gemini.api_key.clone().ok_or_else(|| {
            ApplicationError::Configuration(
                "Gemini API key not set (GEMINI_API_KEY or gemini.api_key)".to_string(),
            )
        })?;
        Credentials::new(cwa, gemini)
    }
}

async fn lookup(store: &dyn SecretStorePort, path: &str) -> Option<SecretString> {
    match store.get_secret(path).await {
        Ok(value) if !value.trim().is_empty() => {
            debug!(path = %path, "Loaded secret from secret store");
            Some(SecretString::from(value))
        },
        Ok(_) => {
            warn!(path = %path, "Secret store returned an empty value");
            None
        },
        Err(ApplicationError::NotFound(_)) => None,
        Err(e) => {
            warn!(path = %path, error = %e, "Failed to resolve secret");
            None
        },
    }
}
