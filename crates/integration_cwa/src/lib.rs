//! Central Weather Administration (CWA) forecast integration
//!
//! Client for the CWA open-data REST API (<https://opendata.cwa.gov.tw>).
//! Fetches the 36-hour county forecast dataset and flattens it into the
//! plain-text block consumed by the report generator.

pub mod client;
mod models;

pub use client::{CwaClient, CwaConfig, ForecastClient};
pub use domain::ForecastError;
pub use models::ForecastDocument;
