//! Data structures mirroring the JSON body of the Open-Meteo forecast endpoint, and the
//! [`RawWeather`] record the extractor hands to the transformer.
//!
//! Every block and every field is optional: the provider omits blocks that were not
//! requested and reports `null` for values it has no data for.

use crate::types::location::{LatLon, Location, LocationInfo};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Timezone assumed when the provider does not report one.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// The decoded body of a `/v1/forecast` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastResponse {
    /// Grid-snapped latitude the provider computed the forecast for.
    pub latitude: Option<f64>,
    /// Grid-snapped longitude the provider computed the forecast for.
    pub longitude: Option<f64>,
    /// IANA timezone name, resolved by the provider when `timezone=auto`.
    pub timezone: Option<String>,
    pub current: Option<CurrentBlock>,
    pub current_units: Option<HashMap<String, String>>,
    pub hourly: Option<HourlyBlock>,
    pub hourly_units: Option<HashMap<String, String>>,
    pub daily: Option<DailyBlock>,
    pub daily_units: Option<HashMap<String, String>>,
}

/// The `current` block: scalar values at a single `time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentBlock {
    pub time: Option<String>,
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub precipitation: Option<f64>,
    pub weather_code: Option<i64>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
    pub pressure_msl: Option<f64>,
    pub uv_index: Option<f64>,
    pub visibility: Option<f64>,
}

/// The `hourly` block: parallel arrays indexed by `time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlyBlock {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub relative_humidity_2m: Vec<Option<f64>>,
    pub apparent_temperature: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i64>>,
    pub wind_speed_10m: Vec<Option<f64>>,
    pub wind_direction_10m: Vec<Option<f64>>,
}

/// The `daily` block: parallel arrays indexed by `time` (dates).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyBlock {
    pub time: Vec<String>,
    pub weather_code: Vec<Option<i64>>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub sunrise: Vec<Option<String>>,
    pub sunset: Vec<Option<String>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub precipitation_probability_max: Vec<Option<f64>>,
    pub wind_speed_10m_max: Vec<Option<f64>>,
}

/// One location's extraction result: the provider response plus request metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RawWeather {
    /// Display name of the configured location.
    pub city_name: String,
    pub country: String,
    /// The configured coordinates. These, not the provider's grid-snapped ones,
    /// identify the location in the store.
    pub requested: LatLon,
    pub extraction_time: DateTime<Utc>,
    pub response: ForecastResponse,
}

impl RawWeather {
    pub fn new(location: &Location, response: ForecastResponse) -> Self {
        Self::with_extraction_time(location, response, Utc::now())
    }

    pub fn with_extraction_time(
        location: &Location,
        response: ForecastResponse,
        extraction_time: DateTime<Utc>,
    ) -> Self {
        Self {
            city_name: location.name.clone(),
            country: location.country.clone(),
            requested: location.coordinates(),
            extraction_time,
            response,
        }
    }

    /// Metadata attached to every row transformed from this result.
    pub fn location_info(&self) -> LocationInfo {
        LocationInfo {
            city: self.city_name.clone(),
            country: self.country.clone(),
            latitude: self.requested.0,
            longitude: self.requested.1,
            timezone: self
                .response
                .timezone
                .clone()
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
        }
    }
}
