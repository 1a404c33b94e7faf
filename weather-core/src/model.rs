use serde::{Deserialize, Serialize};

pub const DEFAULT_UNIT: &str = "C";
pub const DEFAULT_LANG: &str = "en";

/// Unit and language a session queries with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSettings {
    pub unit: String,
    pub lang: String,
}

impl LookupSettings {
    pub fn new(unit: impl Into<String>, lang: impl Into<String>) -> Self {
        Self { unit: unit.into(), lang: lang.into() }
    }
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT, DEFAULT_LANG)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One entry of the provider's condition list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

/// Provider response reduced to what normalization needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub location_name: String,
    pub conditions: Vec<Condition>,
    pub temperature: f64,
    pub feels_like: f64,
    /// Unit token the query was made with, e.g. "metric".
    pub unit: String,
}

/// Display-ready current weather.
///
/// The summary is composed once in [`Weather::new`]; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    #[serde(rename = "temp")]
    temperature: String,
    unit: String,
    description: String,
    feels_like: String,
    summary: String,
    icon: String,
}

impl Weather {
    pub fn new(
        location: &str,
        description: String,
        temperature: String,
        unit: String,
        feels_like: String,
        icon: String,
    ) -> Self {
        let summary = compose_summary(location, &description, &temperature, &unit, &feels_like, &icon);

        Self { temperature, unit, description, feels_like, summary, icon }
    }

    pub fn temperature(&self) -> &str {
        &self.temperature
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn feels_like(&self) -> &str {
        &self.feels_like
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Flat JSON object with the keys `temp`, `unit`, `description`,
    /// `feels_like`, `summary` and `icon`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses the output of [`Weather::to_json`]. The `summary` field is taken
    /// as stored and is not recomposed, since the JSON carries no location name.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// `<location>, <description>, <temp><unit> (<feels_like><unit>) <icon>`
pub fn compose_summary(
    location: &str,
    description: &str,
    temperature: &str,
    unit: &str,
    feels_like: &str,
    icon: &str,
) -> String {
    format!("{location}, {description}, {temperature}{unit} ({feels_like}{unit}) {icon}")
}
