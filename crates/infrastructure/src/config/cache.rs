//! Cache configuration.

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use super::default_true;

/// File name of the cache database when no path is configured
const DEFAULT_CACHE_FILE: &str = "weather-reporter-cache.redb";

/// Call-site cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caching is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Lifetime of cached forecasts and reports in seconds (default: 10 minutes)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Cache database file (default: `weather-reporter-cache.redb` in the
    /// system temp directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

const fn default_ttl_secs() -> u64 {
    10 * 60 // 10 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_ttl_secs(),
            path: None,
        }
    }
}

impl CacheConfig {
    /// TTL as a duration
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Resolved cache database path
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_CACHE_FILE))
    }
}
