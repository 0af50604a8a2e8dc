//! Integration tests for the persistent call-site cache
//!
//! Each CLI invocation builds its own service; these tests build two
//! services in turn over the same cache file, as two runs would.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use application::{
    ApplicationError, Credentials, WeatherReportService,
    ports::{CachePort, ForecastPort, ReportPort},
};
use async_trait::async_trait;
use domain::{City, FlattenedForecast, ForecastLine, Report};
use infrastructure::RedbCache;
use secrecy::SecretString;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

#[derive(Default)]
struct CountingForecasts {
    calls: AtomicUsize,
}

#[async_trait]
impl ForecastPort for CountingForecasts {
    async fn fetch_forecast(
        &self,
        _api_key: &SecretString,
        city: City,
    ) -> Result<FlattenedForecast, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FlattenedForecast::new(
            city.dataset_name(),
            vec![ForecastLine::new("Wx", "晴時多雲"), ForecastLine::new("MaxT", "30")],
        ))
    }
}

#[derive(Default)]
struct CountingReports {
    calls: AtomicUsize,
}

#[async_trait]
impl ReportPort for CountingReports {
    async fn generate_report(
        &self,
        _api_key: &SecretString,
        _forecast_text: &str,
    ) -> Result<Report, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Report::narrated("各位觀眾早安！", "gemini-2.5-flash"))
    }

    fn model_name(&self) -> String {
        "gemini-2.5-flash".to_string()
    }
}

fn credentials() -> Credentials {
    Credentials::new(
        SecretString::from("CWA-TEST".to_string()),
        SecretString::from("AIza-TEST".to_string()),
    )
    .expect("valid credentials")
}

fn build_service(
    path: &Path,
    forecasts: &Arc<CountingForecasts>,
    reports: &Arc<CountingReports>,
    ttl: Duration,
) -> WeatherReportService {
    let cache: Arc<dyn CachePort> = Arc::new(RedbCache::open(path).expect("cache should open"));
    WeatherReportService::new(
        Arc::clone(forecasts) as Arc<dyn ForecastPort>,
        Arc::clone(reports) as Arc<dyn ReportPort>,
        Some(cache),
        ttl,
    )
}

// ============================================================================
// Cross-run Tests
// ============================================================================

#[tokio::test]
async fn second_run_is_served_from_persistent_cache() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache.redb");
    let forecasts = Arc::new(CountingForecasts::default());
    let reports = Arc::new(CountingReports::default());

    let first = {
        let service = build_service(&path, &forecasts, &reports, Duration::from_secs(600));
        service.run(&credentials(), City::Taipei).await.unwrap()
    };

    let second = {
        let service = build_service(&path, &forecasts, &reports, Duration::from_secs(600));
        service.run(&credentials(), City::Taipei).await.unwrap()
    };

    assert_eq!(forecasts.calls.load(Ordering::SeqCst), 1);
    assert_eq!(reports.calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.forecast, second.forecast);
    assert_eq!(first.report, second.report);
}

#[tokio::test]
async fn other_city_is_fetched_on_next_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache.redb");
    let forecasts = Arc::new(CountingForecasts::default());
    let reports = Arc::new(CountingReports::default());

    {
        let service = build_service(&path, &forecasts, &reports, Duration::from_secs(600));
        service.run(&credentials(), City::Taipei).await.unwrap();
    }
    {
        let service = build_service(&path, &forecasts, &reports, Duration::from_secs(600));
        service.run(&credentials(), City::Kaohsiung).await.unwrap();
    }

    assert_eq!(forecasts.calls.load(Ordering::SeqCst), 2);
    assert_eq!(reports.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn expired_entries_are_refetched_on_next_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache.redb");
    let forecasts = Arc::new(CountingForecasts::default());
    let reports = Arc::new(CountingReports::default());

    for _ in 0..2 {
        let service = build_service(&path, &forecasts, &reports, Duration::ZERO);
        service.run(&credentials(), City::Taichung).await.unwrap();
    }

    assert_eq!(forecasts.calls.load(Ordering::SeqCst), 2);
    assert_eq!(reports.calls.load(Ordering::SeqCst), 2);
}
