use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::ProviderError,
    model::{Condition, Coordinates, LookupSettings, RawResponse},
    provider::QueryUnits,
};

use super::ProviderClient;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
}

impl Default for OpenWeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenWeatherClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http: Client::new(), base_url }
    }

    async fn fetch_current(
        &self,
        settings: &LookupSettings,
        api_key: &str,
        location: &[(&str, String)],
    ) -> Result<RawResponse, ProviderError> {
        let units = QueryUnits::try_from(settings.unit.as_str())?;
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        debug!(units = %units, lang = %settings.lang, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(location)
            .query(&[
                ("appid", api_key),
                ("units", units.api_param()),
                ("lang", settings.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| ProviderError::Transport(e.without_url()))?;

        if !status.is_success() {
            return Err(ProviderError::Status { status, body: error_message(&body) });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        debug!(location = %parsed.name, conditions = parsed.weather.len(), "received current weather");

        Ok(RawResponse {
            location_name: parsed.name,
            conditions: parsed
                .weather
                .into_iter()
                .map(|w| Condition { description: w.description, icon: w.icon })
                .collect(),
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            unit: units.as_str().to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

#[async_trait]
impl ProviderClient for OpenWeatherClient {
    async fn query_by_coordinates(
        &self,
        settings: &LookupSettings,
        api_key: &str,
        coords: Coordinates,
    ) -> Result<RawResponse, ProviderError> {
        let location = [("lat", coords.latitude.to_string()), ("lon", coords.longitude.to_string())];
        self.fetch_current(settings, api_key, &location).await
    }

    async fn query_by_name(
        &self,
        settings: &LookupSettings,
        api_key: &str,
        name: &str,
    ) -> Result<RawResponse, ProviderError> {
        self.fetch_current(settings, api_key, &[("q", name.to_string())]).await
    }
}

/// The API's `message` field when the body carries one, otherwise the
/// truncated raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<OwErrorBody>(body) {
        Ok(err) => err.message,
        Err(_) => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
