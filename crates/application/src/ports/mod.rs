//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod cache_port;
mod forecast_port;
mod report_port;
mod secret_store;

pub use cache_port::{CachePort, CachePortExt, DEFAULT_TTL, cache_key};
#[cfg(test)]
pub use cache_port::MockCachePort;
pub use forecast_port::ForecastPort;
#[cfg(test)]
pub use forecast_port::MockForecastPort;
pub use report_port::ReportPort;
#[cfg(test)]
pub use report_port::MockReportPort;
pub use secret_store::SecretStorePort;
