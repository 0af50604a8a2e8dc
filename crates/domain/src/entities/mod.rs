//! Domain entities

mod forecast;
mod report;

pub use forecast::{FORECAST_HEADER_SUFFIX, FlattenedForecast, ForecastLine};
pub use report::{REPORT_FAILURE_MARKER, Report};
