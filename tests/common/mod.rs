#![allow(dead_code)]

use weather_etl::{Location, PipelineConfig};
use wiremock::MockServer;

pub const FORECAST_PATH: &str = "/v1/forecast";

pub fn testville() -> Location {
    Location::new("Testville", "Nowhere", 10.0, 20.0)
}

pub fn failtown() -> Location {
    Location::new("Failtown", "Nowhere", 30.0, 40.0)
}

/// Configuration pointing at the mock server, without request pacing.
pub fn config_for(
    server: &MockServer,
    locations: Vec<Location>,
    database_url: &str,
) -> PipelineConfig {
    PipelineConfig {
        base_url: format!("{}{}", server.uri(), FORECAST_PATH),
        locations,
        database_url: database_url.to_string(),
        request_delay_ms: 0,
        timeout_secs: 5,
        ..Default::default()
    }
}

/// A provider response with every block populated.
pub fn forecast_body(latitude: f64, longitude: f64, temperature: f64) -> serde_json::Value {
    serde_json::json!({
        "latitude": latitude,
        "longitude": longitude,
        "timezone": "Europe/Amsterdam",
        "current_units": { "temperature_2m": "°C" },
        "current": {
            "time": "2024-06-01T12:00",
            "temperature_2m": temperature,
            "relative_humidity_2m": 60,
            "apparent_temperature": 20.0,
            "precipitation": 0.0,
            "weather_code": 3,
            "wind_speed_10m": 5.0,
            "wind_direction_10m": 180,
            "pressure_msl": 1012.0,
            "uv_index": 4.0,
            "visibility": 10000.0
        },
        "hourly": {
            "time": ["2024-06-01T00:00", "2024-06-01T01:00", "2024-06-01T02:00"],
            "temperature_2m": [15.0, 14.5, null],
            "relative_humidity_2m": [70, 72, 75],
            "apparent_temperature": [14.0, 13.5, 13.0],
            "precipitation_probability": [0, 10, 20],
            "precipitation": [0.0, 0.0, 0.2],
            "weather_code": [0, 2, 61],
            "wind_speed_10m": [3.0, 3.5, 4.0],
            "wind_direction_10m": [170, 175, 180]
        },
        "daily": {
            "time": ["2024-06-01", "2024-06-02"],
            "weather_code": [3, 95],
            "temperature_2m_max": [25.0, 27.0],
            "temperature_2m_min": [12.0, 14.0],
            "sunrise": ["2024-06-01T05:30", "2024-06-02T05:29"],
            "sunset": ["2024-06-01T21:45", "2024-06-02T21:46"],
            "precipitation_sum": [0.0, 5.5],
            "precipitation_probability_max": [10, 80],
            "wind_speed_10m_max": [12.0, 20.0]
        }
    })
}
