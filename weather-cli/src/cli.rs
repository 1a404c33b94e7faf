use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_lookup_core::{
    Config, EnvSecret, FileSecret, Secret, Weather, WeatherLookup, config::API_KEY_ENV,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-lookup", version, about = "Current weather from OpenWeatherMap")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Unit: C, F or K (also metric, imperial, kelvin). Defaults to the config file, then C.
    #[arg(long, global = true)]
    pub unit: Option<String>,

    /// 2-letter ISO language code, e.g. "en" or "es". Defaults to the config file, then en.
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Read the API key from this environment variable.
    #[arg(long, global = true, value_name = "VAR", conflicts_with = "api_key_file")]
    pub api_key_env: Option<String>,

    /// Read the API key from the first line of this file.
    #[arg(long, global = true, value_name = "PATH")]
    pub api_key_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store API key, unit and language in the config file.
    Configure,

    /// Show weather at a latitude/longitude.
    Coords {
        /// Latitude in decimal degrees.
        #[arg(allow_hyphen_values = true)]
        lat: String,

        /// Longitude in decimal degrees.
        #[arg(allow_hyphen_values = true)]
        lon: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show weather for a location name, e.g. "London,UK".
    Name {
        location: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Print the result as JSON instead of the summary line.
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output.
    #[arg(long, requires = "json")]
    pub pretty: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match &self.command {
            Command::Configure => configure(config),
            Command::Coords { lat, lon, output } => {
                let lookup = self.lookup(&config)?;
                let weather = lookup
                    .fetch_by_coordinates(lat, lon)
                    .await
                    .with_context(|| format!("Weather lookup for ({lat}, {lon}) failed"))?;
                print_weather(&weather, output)
            }
            Command::Name { location, output } => {
                let lookup = self.lookup(&config)?;
                let weather = lookup
                    .fetch_by_name(location)
                    .await
                    .with_context(|| format!("Weather lookup for '{location}' failed"))?;
                print_weather(&weather, output)
            }
        }
    }

    fn lookup(&self, config: &Config) -> anyhow::Result<WeatherLookup> {
        let secret = self.secret(config)?;
        let settings = config.settings(self.unit.as_deref(), self.lang.as_deref());
        tracing::debug!(?secret, ?settings, "configured lookup");

        Ok(WeatherLookup::configure(secret, settings.unit, settings.lang))
    }

    /// Flag > `OWM_API_KEY` > config file.
    fn secret(&self, config: &Config) -> anyhow::Result<Box<dyn Secret>> {
        self.secret_with_env(config, std::env::var(API_KEY_ENV).ok())
    }

    /// A blank `OWM_API_KEY` counts as unset.
    fn secret_with_env(
        &self,
        config: &Config,
        env_key: Option<String>,
    ) -> anyhow::Result<Box<dyn Secret>> {
        if let Some(var) = &self.api_key_env {
            return Ok(Box::new(EnvSecret::new(var)));
        }
        if let Some(path) = &self.api_key_file {
            return Ok(Box::new(FileSecret::new(path)));
        }
        if env_key.is_some_and(|key| !key.trim().is_empty()) {
            return Ok(Box::new(EnvSecret::new(API_KEY_ENV)));
        }
        if let Some(secret) = config.api_key_secret() {
            return Ok(Box::new(secret));
        }

        bail!(
            "No API key available.\n\
             Hint: set {API_KEY_ENV}, pass --api-key-env/--api-key-file, or run `weather-lookup configure`."
        )
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let unit = Text::new("Unit (C, F or K):")
        .with_default(config.unit.as_deref().unwrap_or("C"))
        .prompt()
        .context("Failed to read unit")?;

    let lang = Text::new("Language (2-letter ISO code):")
        .with_default(config.lang.as_deref().unwrap_or("en"))
        .prompt()
        .context("Failed to read language")?;

    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }
    config.unit = Some(unit);
    config.lang = Some(lang);

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

fn print_weather(weather: &Weather, output: &OutputArgs) -> anyhow::Result<()> {
    if output.json {
        let json = (if output.pretty { weather.to_json_pretty() } else { weather.to_json() })
            .context("Failed to serialize weather as JSON")?;
        println!("{json}");
    } else {
        println!("{}", weather.summary());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_coordinates() {
        let cli = Cli::try_parse_from(["weather-lookup", "coords", "51.5", "-0.12"]).unwrap();
        match cli.command {
            Command::Coords { lat, lon, output } => {
                assert_eq!(lat, "51.5");
                assert_eq!(lon, "-0.12");
                assert!(!output.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "weather-lookup",
            "name",
            "London,UK",
            "--unit",
            "F",
            "--lang",
            "es",
            "--json",
            "--pretty",
        ])
        .unwrap();

        assert_eq!(cli.unit.as_deref(), Some("F"));
        assert_eq!(cli.lang.as_deref(), Some("es"));
        assert!(matches!(cli.command, Command::Name { ref location, ref output } if location == "London,UK" && output.json && output.pretty));
    }

    #[test]
    fn pretty_requires_json() {
        assert!(Cli::try_parse_from(["weather-lookup", "name", "Oslo", "--pretty"]).is_err());
    }

    #[test]
    fn key_sources_conflict() {
        let res = Cli::try_parse_from([
            "weather-lookup",
            "name",
            "Oslo",
            "--api-key-env",
            "KEY",
            "--api-key-file",
            "key.txt",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn explicit_key_flag_wins_over_config() {
        let cli =
            Cli::try_parse_from(["weather-lookup", "name", "Oslo", "--api-key-file", "/nonexistent"])
                .unwrap();
        let config = Config { api_key: Some("from-config".into()), ..Config::default() };

        let secret = cli.secret(&config).unwrap();
        assert!(format!("{secret:?}").contains("FileSecret"));
    }

    #[test]
    fn config_key_is_used_when_nothing_else_is_given() {
        let cli = Cli::try_parse_from(["weather-lookup", "name", "Oslo"]).unwrap();
        let config = Config { api_key: Some("from-config".into()), ..Config::default() };

        let secret = cli.secret_with_env(&config, None).unwrap();
        assert_eq!(secret.plaintext().unwrap(), "from-config");

        let err = cli.secret_with_env(&Config::default(), None).unwrap_err();
        assert!(err.to_string().contains("No API key available"));
    }

    #[test]
    fn env_key_wins_over_config() {
        let cli = Cli::try_parse_from(["weather-lookup", "name", "Oslo"]).unwrap();
        let config = Config { api_key: Some("from-config".into()), ..Config::default() };

        let secret = cli.secret_with_env(&config, Some("from-env".into())).unwrap();
        assert!(format!("{secret:?}").contains(API_KEY_ENV));
    }

    #[test]
    fn blank_env_key_falls_back_to_config() {
        let cli = Cli::try_parse_from(["weather-lookup", "name", "Oslo"]).unwrap();
        let config = Config { api_key: Some("from-config".into()), ..Config::default() };

        for blank in ["", "   "] {
            let secret = cli.secret_with_env(&config, Some(blank.into())).unwrap();
            assert_eq!(secret.plaintext().unwrap(), "from-config");
        }

        let err = cli.secret_with_env(&Config::default(), Some(String::new())).unwrap_err();
        assert!(err.to_string().contains("No API key available"));
    }
}
