//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber. Log lines go to stderr so that
//! forecast and report output on stdout stays clean.

mod logging;

pub use logging::{TelemetryError, build_filter, init_logging};
