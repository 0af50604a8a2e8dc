//! Weather report service - Forecast fetch and report generation pipeline

use std::{fmt, sync::Arc, time::Duration};

use domain::{City, FlattenedForecast, Report};
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, instrument, warn};

use crate::{
    credentials::Credentials,
    error::ApplicationError,
    ports::{CachePort, CachePortExt, ForecastPort, ReportPort, cache_key},
};

/// Result of one full pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// City the pipeline ran for
    pub city: City,
    /// Flattened forecast sent to the model
    pub forecast: FlattenedForecast,
    /// Narrated report, or a failure report
    pub report: Report,
}

/// Runs the two-stage pipeline with an optional call-site cache
pub struct WeatherReportService {
    forecasts: Arc<dyn ForecastPort>,
    reports: Arc<dyn ReportPort>,
    cache: Option<Arc<dyn CachePort>>,
    ttl: Duration,
}

impl fmt::Debug for WeatherReportService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherReportService")
            .field("cached", &self.cache.is_some())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl WeatherReportService {
    /// Create a new service
    pub fn new(
        forecasts: Arc<dyn ForecastPort>,
        reports: Arc<dyn ReportPort>,
        cache: Option<Arc<dyn CachePort>>,
        ttl: Duration,
    ) -> Self {
        Self {
            forecasts,
            reports,
            cache,
            ttl,
        }
    }

    /// Fetch the flattened forecast for `city`
    ///
    /// # Errors
    /// Propagates the forecast port's error; nothing is cached in that case.
    #[instrument(skip(self, credentials), fields(city = %city))]
    pub async fn fetch_forecast(
        &self,
        credentials: &Credentials,
        city: City,
    ) -> Result<FlattenedForecast, ApplicationError> {
        let key = cache_key(
            "forecast",
            &[credentials.cwa_api_key().expose_secret(), city.dataset_name()],
        );

        if let Some(forecast) = self.cached::<FlattenedForecast>(&key).await {
            debug!("Forecast served from cache");
            return Ok(forecast);
        }

        let forecast = self
            .forecasts
            .fetch_forecast(credentials.cwa_api_key(), city)
            .await?;
        self.store(&key, &forecast).await;

        Ok(forecast)
    }

    /// Generate the narrated report for a forecast
    ///
    /// Never fails: a generation error is returned as a failure report,
    /// and failure reports are not cached.
    #[instrument(skip(self, credentials, forecast), fields(location = %forecast.location_name()))]
    pub async fn generate_report(
        &self,
        credentials: &Credentials,
        forecast: &FlattenedForecast,
    ) -> Report {
        let text = forecast.render();
        let model = self.reports.model_name();
        let key = cache_key(
            "report",
            &[credentials.gemini_api_key().expose_secret(), &model, &text],
        );

        if let Some(report) = self.cached::<Report>(&key).await {
            debug!("Report served from cache");
            return report;
        }

        match self
            .reports
            .generate_report(credentials.gemini_api_key(), &text)
            .await
        {
            Ok(report) => {
                if !report.is_failure() {
                    self.store(&key, &report).await;
                }
                report
            },
            Err(e) => {
                warn!(error = %e, "Report generation failed");
                Report::failure(e)
            },
        }
    }

    /// Fetch the forecast, then narrate it
    ///
    /// # Errors
    /// Only a forecast failure aborts the run.
    #[instrument(skip(self, credentials), fields(city = %city))]
    pub async fn run(
        &self,
        credentials: &Credentials,
        city: City,
    ) -> Result<PipelineOutcome, ApplicationError> {
        let forecast = self.fetch_forecast(credentials, city).await?;
        let report = self.generate_report(credentials, &forecast).await;

        info!(
            lines = forecast.line_count(),
            failed = report.is_failure(),
            "Weather report pipeline finished"
        );

        Ok(PipelineOutcome {
            city,
            forecast,
            report,
        })
    }

    async fn cached<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned + Send,
    {
        let cache = self.cache.as_ref()?;
        match cache.get::<T>(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Cache read failed, bypassing cache");
                None
            },
        }
    }

    async fn store<T>(&self, key: &str, value: &T)
    where
        T: Serialize + Send + Sync,
    {
        if let Some(cache) = &self.cache
            && let Err(e) = cache.set(key, value, self.ttl).await
        {
            warn!(error = %e, "Cache write failed");
        }
    }
}
