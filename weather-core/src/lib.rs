//! Core library for the `weather-lookup` CLI.
//!
//! This crate defines:
//! - API key sources (environment, file, config)
//! - The OpenWeatherMap client behind the `ProviderClient` trait
//! - Normalization of provider responses into display-ready `Weather` values
//! - The `WeatherLookup` session tying them together
//!
//! It is used by `weather-lookup-cli`, but can also be embedded by other hosts.

pub mod config;
pub mod credential;
pub mod error;
pub mod lookup;
pub mod model;
pub mod normalize;
pub mod provider;

pub use config::Config;
pub use credential::{EnvSecret, FileSecret, Secret, StaticSecret};
pub use error::{CredentialError, LookupError, ProviderError};
pub use lookup::WeatherLookup;
pub use model::{Condition, Coordinates, LookupSettings, RawResponse, Weather};
pub use normalize::normalize;
pub use provider::{ProviderClient, QueryUnits, openweather::OpenWeatherClient};
