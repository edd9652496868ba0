//! Pipeline configuration: the locations to visit, the provider field sets, the
//! destination store and request pacing.
//!
//! Every field has a default, so an empty YAML document (or no file at all) yields
//! the stock eight-city setup writing to `weather_data.db`.

use crate::types::location::Location;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://weather_data.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] serde_yaml::Error),

    #[error("No locations configured")]
    NoLocations,

    #[error("Invalid coordinates for '{name}': latitude {latitude} must be within -90..=90, longitude {longitude} within -180..=180")]
    InvalidCoordinates {
        name: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("Forecast horizon must be between 1 and 16 days, got {0}")]
    InvalidForecastDays(u8),
}

/// The fixed parameter set sent with every forecast request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherParams {
    pub current: Vec<String>,
    pub hourly: Vec<String>,
    pub daily: Vec<String>,
    /// `auto` lets the provider resolve the timezone from the coordinates.
    pub timezone: String,
    pub forecast_days: u8,
}

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

impl Default for WeatherParams {
    fn default() -> Self {
        Self {
            current: fields(&[
                "temperature_2m",
                "relative_humidity_2m",
                "apparent_temperature",
                "precipitation",
                "weather_code",
                "wind_speed_10m",
                "wind_direction_10m",
                "pressure_msl",
                "uv_index",
                "visibility",
            ]),
            hourly: fields(&[
                "temperature_2m",
                "relative_humidity_2m",
                "apparent_temperature",
                "precipitation_probability",
                "precipitation",
                "weather_code",
                "wind_speed_10m",
                "wind_direction_10m",
            ]),
            daily: fields(&[
                "weather_code",
                "temperature_2m_max",
                "temperature_2m_min",
                "sunrise",
                "sunset",
                "precipitation_sum",
                "precipitation_probability_max",
                "wind_speed_10m_max",
            ]),
            timezone: "auto".to_string(),
            forecast_days: 7,
        }
    }
}

impl WeatherParams {
    /// Query pairs for one location, in the order the provider documents them.
    pub fn query_pairs(&self, location: &Location) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("current", self.current.join(",")),
            ("hourly", self.hourly.join(",")),
            ("daily", self.daily.join(",")),
            ("timezone", self.timezone.clone()),
            ("forecast_days", self.forecast_days.to_string()),
        ]
    }
}

/// Everything one pipeline run needs, passed explicitly to each stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Forecast endpoint, including the `/v1/forecast` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_locations")]
    pub locations: Vec<Location>,

    #[serde(default)]
    pub params: WeatherParams,

    /// `sqlite://<path>`, `sqlite:///<absolute path>`, a bare path or `:memory:`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Pause after each successful request.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request socket timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_locations() -> Vec<Location> {
    vec![
        Location::new("New York", "USA", 40.7128, -74.0060),
        Location::new("London", "UK", 51.5074, -0.1278),
        Location::new("Tokyo", "Japan", 35.6762, 139.6503),
        Location::new("Sydney", "Australia", -33.8688, 151.2093),
        Location::new("Rio de Janeiro", "Brazil", -22.9068, -43.1729),
        Location::new("Cape Town", "South Africa", -33.9249, 18.4241),
        Location::new("Mumbai", "India", 19.0760, 72.8777),
        Location::new("Dubai", "UAE", 25.2048, 55.2708),
    ]
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            locations: default_locations(),
            params: WeatherParams::default(),
            database_url: default_database_url(),
            request_delay_ms: default_request_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a YAML file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Checks the invariants the extractor relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locations.is_empty() {
            return Err(ConfigError::NoLocations);
        }
        for location in &self.locations {
            if !(-90.0..=90.0).contains(&location.latitude)
                || !(-180.0..=180.0).contains(&location.longitude)
            {
                return Err(ConfigError::InvalidCoordinates {
                    name: location.name.clone(),
                    latitude: location.latitude,
                    longitude: location.longitude,
                });
            }
        }
        if !(1..=16).contains(&self.params.forecast_days) {
            return Err(ConfigError::InvalidForecastDays(self.params.forecast_days));
        }
        Ok(())
    }
}
