//! Property-based tests for domain entities
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{City, FlattenedForecast, ForecastLine, REPORT_FAILURE_MARKER, Report};
use proptest::prelude::*;

/// Element names and values never contain a line break in API data
fn line_strategy() -> impl Strategy<Value = ForecastLine> {
    ("[A-Za-z]{1,8}", "[^\r\n]{0,12}").prop_map(|(name, value)| ForecastLine::new(name, value))
}

// ============================================================================
// FlattenedForecast Property Tests
// ============================================================================

mod flattened_forecast_tests {
    use super::*;

    proptest! {
        #[test]
        fn renders_one_line_per_element_plus_header(
            lines in prop::collection::vec(line_strategy(), 0..12)
        ) {
            let n = lines.len();
            let forecast = FlattenedForecast::new("臺北市", lines);
            let text = forecast.render();

            prop_assert_eq!(text.lines().count(), n + 1);
            prop_assert_eq!(forecast.line_count(), n + 1);
            prop_assert!(text.ends_with('\n'));
        }

        #[test]
        fn header_comes_first(
            lines in prop::collection::vec(line_strategy(), 0..6)
        ) {
            let forecast = FlattenedForecast::new("高雄市", lines);
            let text = forecast.render();
            prop_assert_eq!(text.lines().next(), Some("城市: 高雄市 36小時預報"));
        }

        #[test]
        fn element_order_is_preserved(
            lines in prop::collection::vec(line_strategy(), 1..10)
        ) {
            let forecast = FlattenedForecast::new("臺中市", lines.clone());
            let rendered: Vec<String> = forecast.render().lines().skip(1).map(str::to_owned).collect();
            let expected: Vec<String> = lines
                .iter()
                .map(|l| format!("{}: {}", l.element_name, l.value))
                .collect();
            prop_assert_eq!(rendered, expected);
        }
    }
}

// ============================================================================
// Report Property Tests
// ============================================================================

mod report_tests {
    use super::*;

    proptest! {
        #[test]
        fn failure_always_carries_marker(message in ".{0,40}") {
            let report = Report::failure(&message);
            prop_assert!(report.text().starts_with(REPORT_FAILURE_MARKER));
            prop_assert!(report.is_failure());
        }

        #[test]
        fn narrated_text_is_unmodified(text in ".{0,80}") {
            let report = Report::narrated(text.clone(), "gemini-2.5-flash");
            prop_assert_eq!(report.text(), text.as_str());
            prop_assert!(!report.is_failure());
        }
    }
}

// ============================================================================
// City Property Tests
// ============================================================================

mod city_tests {
    use super::*;

    proptest! {
        #[test]
        fn parse_never_panics(input in ".{0,20}") {
            let _ = City::parse(&input);
        }

        #[test]
        fn parse_display_roundtrip(index in 0usize..3) {
            let city = City::all()[index];
            prop_assert_eq!(City::parse(&city.to_string()).ok(), Some(city));
        }
    }
}
