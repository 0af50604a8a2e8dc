//! Forecast adapter - Implements ForecastPort using integration_cwa

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::ForecastPort;
use async_trait::async_trait;
use domain::{City, FlattenedForecast};
use integration_cwa::{CwaClient, CwaConfig, ForecastClient};
use secrecy::SecretString;
use tracing::{debug, instrument};

/// Adapter for the CWA 36-hour forecast dataset
pub struct CwaForecastAdapter {
    client: Arc<dyn ForecastClient>,
}

impl std::fmt::Debug for CwaForecastAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CwaForecastAdapter")
            .field("client", &"ForecastClient")
            .finish()
    }
}

impl CwaForecastAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: CwaConfig) -> Result<Self, ApplicationError> {
        let client =
            CwaClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self::from_client(Arc::new(client)))
    }

    /// Wrap an existing forecast client
    #[must_use]
    pub fn from_client(client: Arc<dyn ForecastClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ForecastPort for CwaForecastAdapter {
    #[instrument(skip(self, api_key), fields(city = %city))]
    async fn fetch_forecast(
        &self,
        api_key: &SecretString,
        city: City,
    ) -> Result<FlattenedForecast, ApplicationError> {
        let forecast = self.client.fetch(api_key, city.dataset_name()).await?;

        debug!(lines = forecast.line_count(), "Fetched forecast");
        Ok(forecast)
    }
}
