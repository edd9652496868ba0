use crate::types::location::LocationInfo;

/// One row of the daily forecast table.
#[derive(Debug, PartialEq, Clone)]
pub struct DailyForecastPoint {
    pub location: LocationInfo,
    pub forecast_date: String,                 // time
    pub weather_code: i64,
    pub weather_description: String,
    pub temperature_max: f64,                  // temperature_2m_max
    pub temperature_min: f64,                  // temperature_2m_min
    pub sunrise: String,                       // ISO 8601 local datetime
    pub sunset: String,
    pub precipitation_sum: f64,                // mm
    pub precipitation_probability_max: f64,    // %
    pub wind_speed_max: f64,                   // wind_speed_10m_max
}
