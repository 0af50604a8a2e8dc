//! City - A selectable forecast location
//!
//! The forecast dataset keys its records by the official Traditional Chinese
//! county/city name, so the value object stores exactly that spelling.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DomainError;

/// Locations offered by the city selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    /// Taipei City
    #[default]
    #[serde(rename = "臺北市")]
    Taipei,
    /// Taichung City
    #[serde(rename = "臺中市")]
    Taichung,
    /// Kaohsiung City
    #[serde(rename = "高雄市")]
    Kaohsiung,
}

impl City {
    /// All selectable cities in selector order
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Taipei, Self::Taichung, Self::Kaohsiung]
    }

    /// The location name as the dataset spells it
    #[must_use]
    pub const fn dataset_name(&self) -> &'static str {
        match self {
            Self::Taipei => "臺北市",
            Self::Taichung => "臺中市",
            Self::Kaohsiung => "高雄市",
        }
    }

    /// Parse a dataset location name
    ///
    /// Only the exact dataset spelling is accepted; the simplified
    /// variant (台北市) is rejected because the API would not match it.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        Self::all()
            .into_iter()
            .find(|city| city.dataset_name() == name)
            .ok_or_else(|| DomainError::UnknownCity(name.to_string()))
    }
}

impl FromStr for City {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dataset_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_selector_order() {
        let names: Vec<&str> = City::all().iter().map(City::dataset_name).collect();
        assert_eq!(names, vec!["臺北市", "臺中市", "高雄市"]);
    }

    #[test]
    fn parse_accepts_dataset_names() {
        assert_eq!(City::parse("臺北市").unwrap(), City::Taipei);
        assert_eq!(City::parse("臺中市").unwrap(), City::Taichung);
        assert_eq!(City::parse("高雄市").unwrap(), City::Kaohsiung);
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(City::parse("  高雄市 ").unwrap(), City::Kaohsiung);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert!(matches!(
            City::parse("台北市"),
            Err(DomainError::UnknownCity(name)) if name == "台北市"
        ));
        assert!(City::parse("").is_err());
        assert!(City::parse("Taipei").is_err());
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let city: City = "臺中市".parse().unwrap();
        assert_eq!(city, City::Taichung);
    }

    #[test]
    fn display_matches_dataset_name() {
        assert_eq!(City::Taipei.to_string(), "臺北市");
        assert_eq!(format!("{}", City::Kaohsiung), "高雄市");
    }

    #[test]
    fn default_is_taipei() {
        assert_eq!(City::default(), City::Taipei);
    }

    #[test]
    fn serializes_to_dataset_name() {
        assert_eq!(serde_json::to_string(&City::Taichung).unwrap(), "\"臺中市\"");
        assert_eq!(
            serde_json::from_str::<City>("\"高雄市\"").unwrap(),
            City::Kaohsiung
        );
    }
}
