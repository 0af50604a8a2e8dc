//! Forecast document models
//!
//! Types for the JSON returned by the CWA `F-C0032-001` dataset. Only the
//! fields the flattener reads are modelled; every one of them is required,
//! so a structural violation surfaces as a parse error instead of a
//! partially built forecast.

use domain::{FlattenedForecast, ForecastError, ForecastLine};
use serde::Deserialize;

/// Raw forecast response
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDocument {
    records: Records,
}

#[derive(Debug, Clone, Deserialize)]
struct Records {
    location: Vec<LocationRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationRecord {
    location_name: String,
    weather_element: Vec<WeatherElement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeatherElement {
    element_name: String,
    time: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeSlot {
    parameter: Parameter,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Parameter {
    parameter_name: String,
}

impl ForecastDocument {
    /// Parse a response body
    pub fn from_json(body: &str) -> Result<Self, ForecastError> {
        serde_json::from_str(body)
            .map_err(|e| ForecastError::Parse(format!("Malformed forecast document: {e}")))
    }

    /// Flatten the first location record
    ///
    /// Uses the first time slot of each element and keeps the elements in
    /// response order. Fails on an empty location array or an element
    /// without any time slot.
    pub fn flatten(self) -> Result<FlattenedForecast, ForecastError> {
        let location = self.records.location.into_iter().next().ok_or_else(|| {
            ForecastError::Parse("records.location is empty".to_string())
        })?;

        let lines = location
            .weather_element
            .into_iter()
            .map(|element| {
                let slot = element.time.into_iter().next().ok_or_else(|| {
                    ForecastError::Parse(format!(
                        "weather element {} has no time slots",
                        element.element_name
                    ))
                })?;
                Ok(ForecastLine::new(
                    element.element_name,
                    slot.parameter.parameter_name,
                ))
            })
            .collect::<Result<Vec<_>, ForecastError>>()?;

        Ok(FlattenedForecast::new(location.location_name, lines))
    }
}
