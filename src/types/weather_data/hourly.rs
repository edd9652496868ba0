use crate::types::location::LocationInfo;

/// One row of the hourly forecast table.
#[derive(Debug, PartialEq, Clone)]
pub struct HourlyForecastPoint {
    pub location: LocationInfo,
    pub forecast_time: String,             // time
    pub temperature: f64,                  // temperature_2m
    pub feels_like: f64,                   // apparent_temperature
    pub humidity: f64,                     // relative_humidity_2m
    pub precipitation_probability: f64,    // %
    pub precipitation: f64,                // mm
    pub weather_code: i64,
    pub weather_description: String,
    pub wind_speed: f64,                   // wind_speed_10m
    pub wind_direction: f64,               // wind_direction_10m
}
