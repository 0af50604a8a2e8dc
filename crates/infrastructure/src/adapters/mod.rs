//! Adapters implementing application ports

mod cwa_forecast_adapter;
mod env_secret_store;
mod gemini_report_adapter;

pub use cwa_forecast_adapter::CwaForecastAdapter;
pub use env_secret_store::EnvSecretStore;
pub use gemini_report_adapter::GeminiReportAdapter;
