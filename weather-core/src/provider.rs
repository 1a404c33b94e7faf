use crate::{
    error::ProviderError,
    model::{Coordinates, LookupSettings, RawResponse},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Unit systems understood by the OpenWeatherMap API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryUnits {
    Metric,
    Imperial,
    Kelvin,
}

impl QueryUnits {
    /// Token reported back in [`RawResponse::unit`].
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryUnits::Metric => "metric",
            QueryUnits::Imperial => "imperial",
            QueryUnits::Kelvin => "kelvin",
        }
    }

    /// Value of the `units` query parameter.
    pub fn api_param(&self) -> &'static str {
        match self {
            QueryUnits::Metric => "metric",
            QueryUnits::Imperial => "imperial",
            QueryUnits::Kelvin => "standard",
        }
    }

    pub const fn all() -> &'static [QueryUnits] {
        &[QueryUnits::Metric, QueryUnits::Imperial, QueryUnits::Kelvin]
    }
}

impl std::fmt::Display for QueryUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for QueryUnits {
    type Error = ProviderError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "c" | "metric" => Ok(QueryUnits::Metric),
            "f" | "imperial" => Ok(QueryUnits::Imperial),
            "k" | "kelvin" | "standard" => Ok(QueryUnits::Kelvin),
            _ => Err(ProviderError::UnsupportedUnit(value.to_string())),
        }
    }
}

/// Client for a current-weather service.
///
/// The API key is passed per call so implementations never hold plaintext.
#[async_trait]
pub trait ProviderClient: Send + Sync + Debug {
    async fn query_by_coordinates(
        &self,
        settings: &LookupSettings,
        api_key: &str,
        coords: Coordinates,
    ) -> Result<RawResponse, ProviderError>;

    async fn query_by_name(
        &self,
        settings: &LookupSettings,
        api_key: &str,
        name: &str,
    ) -> Result<RawResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_as_str_roundtrip() {
        for units in QueryUnits::all() {
            let parsed = QueryUnits::try_from(units.as_str()).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn short_tokens_are_case_insensitive() {
        assert_eq!(QueryUnits::try_from("C").unwrap(), QueryUnits::Metric);
        assert_eq!(QueryUnits::try_from("c").unwrap(), QueryUnits::Metric);
        assert_eq!(QueryUnits::try_from("F").unwrap(), QueryUnits::Imperial);
        assert_eq!(QueryUnits::try_from("K").unwrap(), QueryUnits::Kelvin);
        assert_eq!(QueryUnits::try_from("standard").unwrap(), QueryUnits::Kelvin);
    }

    #[test]
    fn kelvin_uses_standard_api_param() {
        assert_eq!(QueryUnits::Kelvin.api_param(), "standard");
        assert_eq!(QueryUnits::Kelvin.as_str(), "kelvin");
    }

    #[test]
    fn unknown_unit_error() {
        let err = QueryUnits::try_from("rankine").unwrap_err();
        assert!(matches!(err, ProviderError::UnsupportedUnit(ref u) if u == "rankine"));
        assert!(err.to_string().contains("unsupported unit"));
    }
}
