//! Tracing subscriber initialization

use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Resolve the active filter
///
/// `RUST_LOG` wins, then the explicit override (from CLI verbosity), then
/// the configured filter.
#[must_use]
pub fn build_filter(config: &LoggingConfig, override_filter: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(override_filter.unwrap_or(config.filter.as_str()))
    })
}

/// Install the global subscriber
///
/// # Errors
/// Returns [`TelemetryError::Init`] if a global subscriber is already set.
pub fn init_logging(
    config: &LoggingConfig,
    override_filter: Option<&str>,
) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config, override_filter);

    match config.format {
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        },
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        },
    }
    .map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(format = ?config.format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TelemetryError::Init("already set".to_string());
        assert_eq!(err.to_string(), "Failed to initialize tracing: already set");
    }

    #[test]
    fn second_init_fails() {
        let config = LoggingConfig::default();
        // Whichever call runs first in this process may succeed; the next must not.
        let _ = init_logging(&config, Some("off"));
        assert!(init_logging(&config, Some("off")).is_err());
    }

    #[test]
    fn json_format_is_accepted() {
        let config = LoggingConfig {
            format: LogFormat::Json,
            ..Default::default()
        };
        let _ = init_logging(&config, Some("off"));
        assert!(init_logging(&config, None).is_err());
    }
}
