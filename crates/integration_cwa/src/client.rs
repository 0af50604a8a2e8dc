//! CWA forecast client
//!
//! HTTP client for the CWA open-data datastore API.

use async_trait::async_trait;
use domain::{FlattenedForecast, ForecastError};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::models::ForecastDocument;

/// CWA client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CwaConfig {
    /// Datastore base URL (default: <https://opendata.cwa.gov.tw/api/v1/rest/datastore>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Dataset identifier (default: F-C0032-001, 36-hour county forecast)
    #[serde(default = "default_dataset_id")]
    pub dataset_id: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Skip TLS certificate validation (default: false)
    ///
    /// Only for hosts whose trust store cannot validate the CWA chain.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_base_url() -> String {
    "https://opendata.cwa.gov.tw/api/v1/rest/datastore".to_string()
}

fn default_dataset_id() -> String {
    "F-C0032-001".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for CwaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            dataset_id: default_dataset_id(),
            timeout_secs: default_timeout(),
            accept_invalid_certs: false,
        }
    }
}

/// Forecast client trait
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// Fetch and flatten the forecast for one location
    async fn fetch(
        &self,
        api_key: &SecretString,
        location_name: &str,
    ) -> Result<FlattenedForecast, ForecastError>;
}

/// CWA HTTP client implementation
#[derive(Debug)]
pub struct CwaClient {
    client: Client,
    config: CwaConfig,
}

impl CwaClient {
    /// Create a new CWA client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: CwaConfig) -> Result<Self, ForecastError> {
        if config.accept_invalid_certs {
            warn!(
                base_url = %config.base_url,
                "TLS certificate validation is DISABLED for the CWA client"
            );
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ForecastError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, ForecastError> {
        Self::new(CwaConfig::default())
    }

    /// Dataset endpoint, without query parameters
    fn dataset_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.dataset_id
        )
    }
}

#[async_trait]
impl ForecastClient for CwaClient {
    #[instrument(skip(self, api_key), fields(dataset = %self.config.dataset_id))]
    async fn fetch(
        &self,
        api_key: &SecretString,
        location_name: &str,
    ) -> Result<FlattenedForecast, ForecastError> {
        let url = self.dataset_url();
        debug!(url = %url, "Fetching forecast");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("Authorization", api_key.expose_secret()),
                ("locationName", location_name),
            ])
            .send()
            .await
            .map_err(|e| ForecastError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::Transport(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ForecastError::Transport(e.to_string()))?;

        let forecast = ForecastDocument::from_json(&body)?.flatten()?;
        debug!(lines = forecast.line_count(), "Forecast flattened");
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CwaConfig::default();
        assert_eq!(
            config.base_url,
            "https://opendata.cwa.gov.tw/api/v1/rest/datastore"
        );
        assert_eq!(config.dataset_id, "F-C0032-001");
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_dataset_url() {
        let client = CwaClient::with_defaults().expect("client creation should succeed");
        assert_eq!(
            client.dataset_url(),
            "https://opendata.cwa.gov.tw/api/v1/rest/datastore/F-C0032-001"
        );
    }

    #[test]
    fn test_dataset_url_trims_trailing_slash() {
        let config = CwaConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        let client = CwaClient::new(config).expect("client creation should succeed");
        assert_eq!(client.dataset_url(), "http://localhost:8080/F-C0032-001");
    }

    #[test]
    fn test_client_with_invalid_certs_allowed() {
        let config = CwaConfig {
            accept_invalid_certs: true,
            ..Default::default()
        };
        assert!(CwaClient::new(config).is_ok());
    }

    #[test]
    fn test_config_deserialization_with_defaults() {
        let config: CwaConfig = serde_json::from_str("{}").expect("should deserialize");
        assert_eq!(config.dataset_id, "F-C0032-001");
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_config_serialization() {
        let config = CwaConfig {
            base_url: "https://mirror.example.com".to_string(),
            dataset_id: "F-D0047-061".to_string(),
            timeout_secs: 10,
            accept_invalid_certs: false,
        };

        let json = serde_json::to_string(&config).expect("should serialize");
        let deserialized: CwaConfig = serde_json::from_str(&json).expect("should deserialize");

        assert_eq!(deserialized.base_url, "https://mirror.example.com");
        assert_eq!(deserialized.dataset_id, "F-D0047-061");
        assert_eq!(deserialized.timeout_secs, 10);
    }
}
