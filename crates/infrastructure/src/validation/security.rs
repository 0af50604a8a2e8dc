//! Security validation for application configuration
//!
//! Validates configuration for security issues and provides warnings at startup.
//! Critical issues in production will prevent startup unless explicitly allowed.

use std::fmt;

use crate::config::{AppConfig, ENV_PREFIX, Environment};

/// Severity level for security warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningSeverity {
    /// Informational - no action required
    Info,
    /// Warning - should be addressed but not critical
    Warning,
    /// Critical - must be addressed in production
    Critical,
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A security warning with severity and description
#[derive(Debug, Clone)]
pub struct SecurityWarning {
    /// Severity level of the warning
    pub severity: WarningSeverity,
    /// Short code identifying the warning type
    pub code: String,
    /// Human-readable description of the issue
    pub message: String,
    /// Recommended action to resolve the issue
    pub recommendation: String,
}

impl SecurityWarning {
    /// Create a new security warning
    #[must_use]
    pub fn new(
        severity: WarningSeverity,
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }

    /// Create a critical warning
    #[must_use]
    pub fn critical(
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self::new(WarningSeverity::Critical, code, message, recommendation)
    }

    /// Create a warning-level issue
    #[must_use]
    pub fn warning(
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self::new(WarningSeverity::Warning, code, message, recommendation)
    }

    /// Create an informational notice
    #[must_use]
    pub fn info(
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self::new(WarningSeverity::Info, code, message, recommendation)
    }

    /// Check if this warning is critical
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self.severity, WarningSeverity::Critical)
    }
}

impl fmt::Display for SecurityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} - {}",
            self.severity, self.code, self.message, self.recommendation
        )
    }
}

/// Validates application configuration for security issues
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityValidator;

impl SecurityValidator {
    /// Validate configuration and return all security warnings
    ///
    /// Returns a list of warnings sorted by severity (critical first).
    #[must_use]
    pub fn validate(config: &AppConfig) -> Vec<SecurityWarning> {
        let mut warnings = Vec::new();
        let is_production = config.environment == Environment::Production;

        Self::check_tls_verification(config, is_production, &mut warnings);
        Self::check_plaintext_keys(config, &mut warnings);
        Self::check_transport(config, is_production, &mut warnings);

        // Sort by severity (critical first)
        warnings.sort_by(|a, b| b.severity.cmp(&a.severity));

        warnings
    }

    /// Check if startup should be blocked due to critical security issues
    ///
    /// Reads `WEATHER_REPORTER_ALLOW_INSECURE_CONFIG` (`true` or `1`) as the
    /// escape hatch.
    #[must_use]
    pub fn should_block_startup(config: &AppConfig, warnings: &[SecurityWarning]) -> bool {
        let allow_insecure = std::env::var(format!("{ENV_PREFIX}_ALLOW_INSECURE_CONFIG"))
            .is_ok_and(|v| v == "true" || v == "1");
        Self::should_block_startup_with(config, warnings, allow_insecure)
    }

    /// Blocking decision with an explicit override flag
    #[must_use]
    pub fn should_block_startup_with(
        config: &AppConfig,
        warnings: &[SecurityWarning],
        allow_insecure: bool,
    ) -> bool {
        let is_production = config.environment == Environment::Production;
        let has_critical = warnings.iter().any(SecurityWarning::is_critical);

        is_production && has_critical && !allow_insecure
    }

    /// Log all warnings using tracing
    pub fn log_warnings(warnings: &[SecurityWarning]) {
        for warning in warnings {
            match warning.severity {
                WarningSeverity::Critical => {
                    tracing::error!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Security configuration issue"
                    );
                },
                WarningSeverity::Warning => {
                    tracing::warn!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Security configuration warning"
                    );
                },
                WarningSeverity::Info => {
                    tracing::info!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Security configuration notice"
                    );
                },
            }
        }
    }

    fn check_tls_verification(
        config: &AppConfig,
        is_production: bool,
        warnings: &mut Vec<SecurityWarning>,
    ) {
        if config.cwa.accept_invalid_certs {
            let severity = if is_production {
                WarningSeverity::Critical
            } else {
                WarningSeverity::Warning
            };
            warnings.push(SecurityWarning::new(
                severity,
                "SEC001",
                "TLS certificate verification is disabled for the CWA API",
                "Set cwa.accept_invalid_certs = false and install the CA chain instead",
            ));
        }
    }

    fn check_plaintext_keys(config: &AppConfig, warnings: &mut Vec<SecurityWarning>) {
        // Keys resolved from the environment land in the same fields, so this
        // runs before secret resolution.
        if config.cwa.api_key.is_some() {
            warnings.push(SecurityWarning::warning(
                "SEC002",
                "CWA API key is stored in the configuration",
                "Remove cwa.api_key and set CWA_API_KEY in the environment",
            ));
        }
        if config.gemini.api_key.is_some() {
            warnings.push(SecurityWarning::warning(
                "SEC003",
                "Gemini API key is stored in the configuration",
                "Remove gemini.api_key and set GEMINI_API_KEY in the environment",
            ));
        }
    }

    fn check_transport(
        config: &AppConfig,
        is_production: bool,
        warnings: &mut Vec<SecurityWarning>,
    ) {
        let severity = if is_production {
            WarningSeverity::Warning
        } else {
            WarningSeverity::Info
        };
        for (name, url) in [
            ("cwa.base_url", &config.cwa.base_url),
            ("gemini.base_url", &config.gemini.base_url),
        ] {
            if !url.starts_with("https://") {
                warnings.push(SecurityWarning::new(
                    severity,
                    "SEC004",
                    format!("{name} does not use HTTPS; API keys are sent in clear text"),
                    "Use an https:// endpoint",
                ));
            }
        }
    }
}
