// hourly_frame.rs

//! Contains the `HourlyFrame` structure holding the hourly forecast table.

use crate::types::fragment::FragmentKind;
use crate::types::frames::columns::{
    float_at, float_column, int_at, int_column, location_columns, text_at, text_column,
    LocationReader,
};
use crate::types::frames::WeatherFrame;
use crate::types::weather_data::hourly::HourlyForecastPoint;
use polars::prelude::{DataFrame, PolarsResult};

/// A wrapper around a Polars `DataFrame` holding one row per location per forecast hour.
///
/// A location whose response had no hourly series contributes no rows; when no
/// location contributes, the frame is empty but keeps the full schema.
#[derive(Debug, Clone)]
pub struct HourlyFrame {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl WeatherFrame for HourlyFrame {
    const KIND: FragmentKind = FragmentKind::Hourly;

    fn from_frame(frame: DataFrame) -> Self {
        Self { frame }
    }

    fn frame(&self) -> &DataFrame {
        &self.frame
    }
}

impl HourlyFrame {
    /// Builds a frame from typed rows, preserving their order.
    pub fn from_points(rows: &[HourlyForecastPoint]) -> PolarsResult<Self> {
        let locations: Vec<_> = rows.iter().map(|r| &r.location).collect();
        let mut columns = location_columns(&locations);
        columns.extend([
            text_column(
                "forecast_time",
                rows.iter().map(|r| r.forecast_time.as_str()).collect(),
            ),
            float_column("temperature", rows.iter().map(|r| r.temperature).collect()),
            float_column("feels_like", rows.iter().map(|r| r.feels_like).collect()),
            float_column("humidity", rows.iter().map(|r| r.humidity).collect()),
            float_column(
                "precipitation_probability",
                rows.iter().map(|r| r.precipitation_probability).collect(),
            ),
            float_column(
                "precipitation",
                rows.iter().map(|r| r.precipitation).collect(),
            ),
            int_column("weather_code", rows.iter().map(|r| r.weather_code).collect()),
            text_column(
                "weather_description",
                rows.iter().map(|r| r.weather_description.as_str()).collect(),
            ),
            float_column("wind_speed", rows.iter().map(|r| r.wind_speed).collect()),
            float_column(
                "wind_direction",
                rows.iter().map(|r| r.wind_direction).collect(),
            ),
        ]);
        Ok(Self::from_frame(DataFrame::new(columns)?))
    }

    /// Collects the frame back into typed rows.
    pub fn points(&self) -> PolarsResult<Vec<HourlyForecastPoint>> {
        let df = &self.frame;
        let location = LocationReader::new(df)?;
        let forecast_time = df.column("forecast_time")?.str()?;
        let temperature = df.column("temperature")?.f64()?;
        let feels_like = df.column("feels_like")?.f64()?;
        let humidity = df.column("humidity")?.f64()?;
        let precipitation_probability = df.column("precipitation_probability")?.f64()?;
        let precipitation = df.column("precipitation")?.f64()?;
        let weather_code = df.column("weather_code")?.i64()?;
        let weather_description = df.column("weather_description")?.str()?;
        let wind_speed = df.column("wind_speed")?.f64()?;
        let wind_direction = df.column("wind_direction")?.f64()?;

        Ok((0..df.height())
            .map(|i| HourlyForecastPoint {
                location: location.at(i),
                forecast_time: text_at(forecast_time, i),
                temperature: float_at(temperature, i),
                feels_like: float_at(feels_like, i),
                humidity: float_at(humidity, i),
                precipitation_probability: float_at(precipitation_probability, i),
                precipitation: float_at(precipitation, i),
                weather_code: int_at(weather_code, i),
                weather_description: text_at(weather_description, i),
                wind_speed: float_at(wind_speed, i),
                wind_direction: float_at(wind_direction, i),
            })
            .collect())
    }
}
