//! Mapping of a raw provider response into a display-ready [`Weather`].
//!
//! Both lookup tables are total: an unknown unit token passes through and an
//! unknown icon code maps to [`FALLBACK_ICON`]. The only failure is a response
//! without any condition entry.

use crate::{
    error::ProviderError,
    model::{RawResponse, Weather},
};

/// Provider unit token → display unit.
pub const UNIT_TABLE: &[(&str, &str)] = &[
    ("metric", "°C"),
    ("C", "°C"),
    ("imperial", "°F"),
    ("F", "°F"),
    ("kelvin", "K"),
    ("K", "K"),
];

/// OpenWeatherMap icon code → emoji.
pub const ICON_TABLE: &[(&str, &str)] = &[
    ("01d", "☀️"),
    ("01n", "🌙"),
    ("02d", "🌤️"),
    ("02n", "🌙️"),
    ("03d", "🌥️"),
    ("03n", "☁️"),
    ("04d", "☁️"),
    ("04n", "☁️"),
    ("09d", "🌧️"),
    ("09n", "🌧️"),
    ("10d", "🌧️"),
    ("10n", "🌧️"),
    ("11d", "🌩️"),
    ("11n", "🌩️"),
    ("13d", "❄️"),
    ("13n", "❄️"),
    ("50d", "🌫️"),
    ("50n", "🌫️"),
];

pub const FALLBACK_ICON: &str = "🤷";

pub fn display_unit(token: &str) -> &str {
    UNIT_TABLE
        .iter()
        .find(|(key, _)| *key == token)
        .map_or(token, |(_, display)| *display)
}

pub fn icon_for(code: &str) -> &'static str {
    ICON_TABLE
        .iter()
        .find(|(key, _)| *key == code)
        .map_or(FALLBACK_ICON, |(_, glyph)| *glyph)
}

/// Shortest round-trip decimal, switching to exponent form like `%g` does
/// when the decimal exponent is below -4 or at least 6.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf".to_string() } else { "-Inf".to_string() };
    }

    let sci = format!("{value:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return value.to_string();
    };
    let exp: i32 = match exp.parse() {
        Ok(exp) => exp,
        Err(_) => return value.to_string(),
    };

    if (-4..6).contains(&exp) {
        value.to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    }
}

pub fn normalize(raw: &RawResponse) -> Result<Weather, ProviderError> {
    let condition = raw.conditions.first().ok_or_else(|| ProviderError::NoConditions {
        location: raw.location_name.clone(),
    })?;

    Ok(Weather::new(
        &raw.location_name,
        condition.description.clone(),
        format_general(raw.temperature),
        display_unit(&raw.unit).to_string(),
        format_general(raw.feels_like),
        icon_for(&condition.icon).to_string(),
    ))
}
