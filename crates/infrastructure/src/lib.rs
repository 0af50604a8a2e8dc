//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the CWA and Gemini adapters, the persistent cache, configuration
//! loading, logging setup and startup security checks.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod telemetry;
pub mod validation;

pub use adapters::*;
pub use cache::RedbCache;
pub use config::{
    AppConfig, CacheConfig, CwaAppConfig, Environment, GeminiAppConfig, LogFormat, LoggingConfig,
};
pub use telemetry::{TelemetryError, init_logging};
pub use validation::{SecurityValidator, SecurityWarning, WarningSeverity};
