// current_frame.rs

//! Contains the `CurrentFrame` structure holding the current-conditions table.

use crate::types::fragment::FragmentKind;
use crate::types::frames::columns::{
    float_at, float_column, int_at, int_column, location_columns, text_at, text_column,
    LocationReader,
};
use crate::types::frames::WeatherFrame;
use crate::types::weather_data::current::CurrentObservation;
use polars::prelude::{DataFrame, PolarsResult};

/// A wrapper around a Polars `DataFrame` holding one row per location with its
/// current weather conditions.
///
/// Instances are produced by [`crate::transform_current`] and
/// [`crate::WeatherTransformer::transform_all`]. The columns are those listed by
/// [`FragmentKind::Current`].
#[derive(Debug, Clone)]
pub struct CurrentFrame {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl WeatherFrame for CurrentFrame {
    const KIND: FragmentKind = FragmentKind::Current;

    fn from_frame(frame: DataFrame) -> Self {
        Self { frame }
    }

    fn frame(&self) -> &DataFrame {
        &self.frame
    }
}

impl CurrentFrame {
    /// Builds a frame from typed rows, preserving their order.
    pub fn from_observations(rows: &[CurrentObservation]) -> PolarsResult<Self> {
        let locations: Vec<_> = rows.iter().map(|r| &r.location).collect();
        let mut columns = location_columns(&locations);
        columns.extend([
            float_column("temperature", rows.iter().map(|r| r.temperature).collect()),
            float_column("feels_like", rows.iter().map(|r| r.feels_like).collect()),
            float_column("humidity", rows.iter().map(|r| r.humidity).collect()),
            float_column("pressure", rows.iter().map(|r| r.pressure).collect()),
            float_column("wind_speed", rows.iter().map(|r| r.wind_speed).collect()),
            float_column(
                "wind_direction",
                rows.iter().map(|r| r.wind_direction).collect(),
            ),
            int_column("weather_code", rows.iter().map(|r| r.weather_code).collect()),
            text_column(
                "weather_description",
                rows.iter().map(|r| r.weather_description.as_str()).collect(),
            ),
            float_column("uv_index", rows.iter().map(|r| r.uv_index).collect()),
            float_column("visibility", rows.iter().map(|r| r.visibility).collect()),
            text_column(
                "recorded_at",
                rows.iter().map(|r| r.recorded_at.as_str()).collect(),
            ),
            text_column(
                "extraction_time",
                rows.iter().map(|r| r.extraction_time.as_str()).collect(),
            ),
        ]);
        Ok(Self::from_frame(DataFrame::new(columns)?))
    }

    /// Collects the frame back into typed rows.
    ///
    /// # Errors
    ///
    /// Returns a [`polars::prelude::PolarsError`] if a column is missing or has an
    /// unexpected type, e.g. when the frame was built by hand.
    pub fn observations(&self) -> PolarsResult<Vec<CurrentObservation>> {
        let df = &self.frame;
        let location = LocationReader::new(df)?;
        let temperature = df.column("temperature")?.f64()?;
        let feels_like = df.column("feels_like")?.f64()?;
        let humidity = df.column("humidity")?.f64()?;
        let pressure = df.column("pressure")?.f64()?;
        let wind_speed = df.column("wind_speed")?.f64()?;
        let wind_direction = df.column("wind_direction")?.f64()?;
        let weather_code = df.column("weather_code")?.i64()?;
        let weather_description = df.column("weather_description")?.str()?;
        let uv_index = df.column("uv_index")?.f64()?;
        let visibility = df.column("visibility")?.f64()?;
        let recorded_at = df.column("recorded_at")?.str()?;
        let extraction_time = df.column("extraction_time")?.str()?;

        Ok((0..df.height())
            .map(|i| CurrentObservation {
                location: location.at(i),
                temperature: float_at(temperature, i),
                feels_like: float_at(feels_like, i),
                humidity: float_at(humidity, i),
                pressure: float_at(pressure, i),
                wind_speed: float_at(wind_speed, i),
                wind_direction: float_at(wind_direction, i),
                weather_code: int_at(weather_code, i),
                weather_description: text_at(weather_description, i),
                uv_index: float_at(uv_index, i),
                visibility: float_at(visibility, i),
                recorded_at: text_at(recorded_at, i),
                extraction_time: text_at(extraction_time, i),
            })
            .collect())
    }
}
