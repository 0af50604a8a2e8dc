//! Flattened forecast entity
//!
//! The plain-text reduction of a forecast document: one header line naming
//! the location, then one `<element>: <value>` line per weather element,
//! using only the soonest time slot of each element.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to the location name in the header line
pub const FORECAST_HEADER_SUFFIX: &str = "36小時預報";

/// One weather element reduced to its first time-slot value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastLine {
    /// Element name as returned by the API (e.g. `Wx`, `MaxT`)
    pub element_name: String,
    /// Human-readable value of the first time slot
    pub value: String,
}

impl ForecastLine {
    /// Create a new forecast line
    pub fn new(element_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
            value: value.into(),
        }
    }
}

/// Forecast for one location, flattened for the language model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenedForecast {
    location_name: String,
    lines: Vec<ForecastLine>,
}

impl FlattenedForecast {
    /// Create a flattened forecast; `lines` keep the order the API returned
    pub fn new(location_name: impl Into<String>, lines: Vec<ForecastLine>) -> Self {
        Self {
            location_name: location_name.into(),
            lines,
        }
    }

    /// Location name taken from the response record
    #[must_use]
    pub fn location_name(&self) -> &str {
        &self.location_name
    }

    /// Element lines in response order
    #[must_use]
    pub fn lines(&self) -> &[ForecastLine] {
        &self.lines
    }

    /// Header line without the trailing newline
    #[must_use]
    pub fn header(&self) -> String {
        format!("城市: {} {FORECAST_HEADER_SUFFIX}", self.location_name)
    }

    /// Number of text lines: the header plus one per element
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len() + 1
    }

    /// Render the text block handed to the report generator
    ///
    /// Every line, the last one included, ends with `\n`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = self.header();
        text.push('\n');
        for line in &self.lines {
            text.push_str(&format!("{}: {}\n", line.element_name, line.value));
        }
        text
    }
}

impl fmt::Display for FlattenedForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taipei() -> FlattenedForecast {
        FlattenedForecast::new(
            "臺北市",
            vec![
                ForecastLine::new("Wx", "晴時多雲"),
                ForecastLine::new("MaxT", "30"),
            ],
        )
    }

    #[test]
    fn render_matches_expected_block() {
        assert_eq!(
            taipei().render(),
            "城市: 臺北市 36小時預報\nWx: 晴時多雲\nMaxT: 30\n"
        );
    }

    #[test]
    fn header_names_the_location() {
        assert_eq!(taipei().header(), "城市: 臺北市 36小時預報");
    }

    #[test]
    fn line_count_includes_header() {
        assert_eq!(taipei().line_count(), 3);
        assert_eq!(FlattenedForecast::new("高雄市", vec![]).line_count(), 1);
    }

    #[test]
    fn empty_forecast_renders_header_only() {
        let forecast = FlattenedForecast::new("高雄市", vec![]);
        assert_eq!(forecast.render(), "城市: 高雄市 36小時預報\n");
    }

    #[test]
    fn display_matches_render() {
        let forecast = taipei();
        assert_eq!(forecast.to_string(), forecast.render());
    }

    #[test]
    fn lines_keep_insertion_order() {
        let forecast = taipei();
        let names: Vec<&str> = forecast
            .lines()
            .iter()
            .map(|l| l.element_name.as_str())
            .collect();
        assert_eq!(names, vec!["Wx", "MaxT"]);
    }

    #[test]
    fn serde_roundtrip_preserves_render() {
        let forecast = taipei();
        let json = serde_json::to_string(&forecast).unwrap();
        let restored: FlattenedForecast = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.render(), forecast.render());
    }
}
