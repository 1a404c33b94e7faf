use std::num::ParseFloatError;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single lookup, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid {field} '{input}': expected a decimal number")]
    Parse {
        field: &'static str,
        input: String,
        #[source]
        source: Option<ParseFloatError>,
    },

    #[error("failed to resolve API key")]
    Credential(#[from] CredentialError),

    #[error("weather provider request failed")]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("environment variable '{name}' is not set or not valid unicode")]
    MissingEnv {
        name: String,
        #[source]
        source: std::env::VarError,
    },

    #[error("failed to read secret file '{path}'")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("secret '{origin}' is empty")]
    Empty { origin: String },
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unsupported unit '{0}'. Supported units: C, F, K (or metric, imperial, kelvin)")]
    UnsupportedUnit(String),

    #[error("failed to reach the weather service")]
    Transport(#[from] reqwest::Error),

    #[error("weather service responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode weather service response")]
    Decode(#[from] serde_json::Error),

    #[error("weather service returned no conditions for '{location}'")]
    NoConditions { location: String },
}
