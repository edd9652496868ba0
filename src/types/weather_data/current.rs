use crate::types::location::LocationInfo;

/// One row of the current-conditions table.
#[derive(Debug, PartialEq, Clone)]
pub struct CurrentObservation {
    pub location: LocationInfo,
    pub temperature: f64,         // temperature_2m (°C)
    pub feels_like: f64,          // apparent_temperature (°C)
    pub humidity: f64,            // relative_humidity_2m (%)
    pub pressure: f64,            // pressure_msl (hPa)
    pub wind_speed: f64,          // wind_speed_10m (km/h)
    pub wind_direction: f64,      // wind_direction_10m (°)
    pub weather_code: i64,        // WMO code
    pub weather_description: String,
    pub uv_index: f64,
    pub visibility: f64,          // metres
    pub recorded_at: String,      // provider local time, ISO 8601
    pub extraction_time: String,  // RFC 3339, UTC
}
