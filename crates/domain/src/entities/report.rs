//! Narrated weather report entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix that marks a report whose generation failed
pub const REPORT_FAILURE_MARKER: &str = "❌ Gemini API 呼叫失敗: ";

/// The text shown to the listener
///
/// Either the model's output kept verbatim, or an error message starting
/// with [`REPORT_FAILURE_MARKER`] so callers can branch on the text alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    text: String,
    /// Model that produced the text, `None` for failure reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    generated_at: DateTime<Utc>,
}

impl Report {
    /// Report produced by a successful model call
    pub fn narrated(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: Some(model.into()),
            generated_at: Utc::now(),
        }
    }

    /// Report standing in for a failed model call
    pub fn failure(error: impl fmt::Display) -> Self {
        Self {
            text: format!("{REPORT_FAILURE_MARKER}{error}"),
            model: None,
            generated_at: Utc::now(),
        }
    }

    /// Report text as displayed
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Model that generated the text
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// When the report was produced
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Whether this report carries a generation failure
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.model.is_none() && self.text.starts_with(REPORT_FAILURE_MARKER)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
