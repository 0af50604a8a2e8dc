//! Application services - Use case implementations

mod weather_report_service;

pub use weather_report_service::{PipelineOutcome, WeatherReportService};
