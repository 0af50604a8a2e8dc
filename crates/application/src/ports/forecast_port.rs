//! Forecast port
//!
//! Defines the interface for retrieving a flattened short-range forecast.

use async_trait::async_trait;
use domain::{City, FlattenedForecast};
#[cfg(test)]
use mockall::automock;
use secrecy::SecretString;

use crate::error::ApplicationError;

/// Port for forecast retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastPort: Send + Sync {
    /// Fetch the forecast for `city` and flatten it to one line per element
    ///
    /// # Errors
    /// Returns [`ApplicationError::Forecast`] when the request fails or the
    /// response does not have the expected structure.
    async fn fetch_forecast(
        &self,
        api_key: &SecretString,
        city: City,
    ) -> Result<FlattenedForecast, ApplicationError>;
}
