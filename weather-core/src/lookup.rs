use std::{fmt, sync::Arc};

use tracing::{info, warn};

use crate::{
    credential::Secret,
    error::LookupError,
    model::{Coordinates, LookupSettings, Weather},
    normalize::normalize,
    provider::{ProviderClient, openweather::OpenWeatherClient},
};

/// One lookup session: a secret, the unit/lang settings and a provider
/// client. Read-only after construction, so independent sessions can run
/// concurrently.
pub struct WeatherLookup {
    secret: Arc<dyn Secret>,
    settings: LookupSettings,
    provider: Arc<dyn ProviderClient>,
}

impl fmt::Debug for WeatherLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherLookup")
            .field("secret", &self.secret)
            .field("settings", &self.settings)
            .field("provider", &self.provider)
            .finish()
    }
}

impl WeatherLookup {
    /// Unit and language are not validated here.
    pub fn configure(
        secret: impl Secret + 'static,
        unit: impl Into<String>,
        lang: impl Into<String>,
    ) -> Self {
        Self {
            secret: Arc::new(secret),
            settings: LookupSettings::new(unit, lang),
            provider: Arc::new(OpenWeatherClient::new()),
        }
    }

    pub fn with_provider(mut self, provider: impl ProviderClient + 'static) -> Self {
        self.provider = Arc::new(provider);
        self
    }

    pub fn settings(&self) -> &LookupSettings {
        &self.settings
    }

    pub async fn fetch_by_coordinates(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<Weather, LookupError> {
        let coords = Coordinates {
            latitude: parse_coordinate("latitude", latitude)?,
            longitude: parse_coordinate("longitude", longitude)?,
        };

        let api_key = self.secret.plaintext()?;
        let raw = self
            .provider
            .query_by_coordinates(&self.settings, &api_key, coords)
            .await
            .inspect_err(|e| warn!(error = %e, "coordinate lookup failed"))?;
        drop(api_key);

        let weather = normalize(&raw)?;
        info!(summary = weather.summary(), "weather lookup by coordinates complete");
        Ok(weather)
    }

    pub async fn fetch_by_name(&self, name: &str) -> Result<Weather, LookupError> {
        let api_key = self.secret.plaintext()?;
        let raw = self
            .provider
            .query_by_name(&self.settings, &api_key, name)
            .await
            .inspect_err(|e| warn!(error = %e, location = name, "name lookup failed"))?;
        drop(api_key);

        let weather = normalize(&raw)?;
        info!(summary = weather.summary(), "weather lookup by name complete");
        Ok(weather)
    }
}

fn parse_coordinate(field: &'static str, input: &str) -> Result<f64, LookupError> {
    match input.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(LookupError::Parse { field, input: input.to_string(), source: None }),
        Err(source) => Err(LookupError::Parse { field, input: input.to_string(), source: Some(source) }),
    }
}
