// daily_frame.rs

//! Contains the `DailyFrame` structure holding the daily forecast table.

use crate::types::fragment::FragmentKind;
use crate::types::frames::columns::{
    float_at, float_column, int_at, int_column, location_columns, text_at, text_column,
    LocationReader,
};
use crate::types::frames::WeatherFrame;
use crate::types::weather_data::daily::DailyForecastPoint;
use polars::prelude::{DataFrame, PolarsResult};

/// A wrapper around a Polars `DataFrame` holding one row per location per forecast day.
///
/// `sunrise` and `sunset` hold the provider's local datetimes verbatim; the
/// loader stores only their time-of-day part.
#[derive(Debug, Clone)]
pub struct DailyFrame {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl WeatherFrame for DailyFrame {
    const KIND: FragmentKind = FragmentKind::Daily;

    fn from_frame(frame: DataFrame) -> Self {
        Self { frame }
    }

    fn frame(&self) -> &DataFrame {
        &self.frame
    }
}

impl DailyFrame {
    /// Builds a frame from typed rows, preserving their order.
    pub fn from_points(rows: &[DailyForecastPoint]) -> PolarsResult<Self> {
        let locations: Vec<_> = rows.iter().map(|r| &r.location).collect();
        let mut columns = location_columns(&locations);
        columns.extend([
            text_column(
                "forecast_date",
                rows.iter().map(|r| r.forecast_date.as_str()).collect(),
            ),
            int_column("weather_code", rows.iter().map(|r| r.weather_code).collect()),
            text_column(
                "weather_description",
                rows.iter().map(|r| r.weather_description.as_str()).collect(),
            ),
            float_column(
                "temperature_max",
                rows.iter().map(|r| r.temperature_max).collect(),
            ),
            float_column(
                "temperature_min",
                rows.iter().map(|r| r.temperature_min).collect(),
            ),
            text_column("sunrise", rows.iter().map(|r| r.sunrise.as_str()).collect()),
            text_column("sunset", rows.iter().map(|r| r.sunset.as_str()).collect()),
            float_column(
                "precipitation_sum",
                rows.iter().map(|r| r.precipitation_sum).collect(),
            ),
            float_column(
                "precipitation_probability_max",
                rows.iter()
                    .map(|r| r.precipitation_probability_max)
                    .collect(),
            ),
            float_column(
                "wind_speed_max",
                rows.iter().map(|r| r.wind_speed_max).collect(),
            ),
        ]);
        Ok(Self::from_frame(DataFrame::new(columns)?))
    }

    /// Collects the frame back into typed rows.
    pub fn points(&self) -> PolarsResult<Vec<DailyForecastPoint>> {
        let df = &self.frame;
        let location = LocationReader::new(df)?;
        let forecast_date = df.column("forecast_date")?.str()?;
        let weather_code = df.column("weather_code")?.i64()?;
        let weather_description = df.column("weather_description")?.str()?;
        let temperature_max = df.column("temperature_max")?.f64()?;
        let temperature_min = df.column("temperature_min")?.f64()?;
        let sunrise = df.column("sunrise")?.str()?;
        let sunset = df.column("sunset")?.str()?;
        let precipitation_sum = df.column("precipitation_sum")?.f64()?;
        let precipitation_probability_max = df.column("precipitation_probability_max")?.f64()?;
        let wind_speed_max = df.column("wind_speed_max")?.f64()?;

        Ok((0..df.height())
            .map(|i| DailyForecastPoint {
                location: location.at(i),
                forecast_date: text_at(forecast_date, i),
                weather_code: int_at(weather_code, i),
                weather_description: text_at(weather_description, i),
                temperature_max: float_at(temperature_max, i),
                temperature_min: float_at(temperature_min, i),
                sunrise: text_at(sunrise, i),
                sunset: text_at(sunset, i),
                precipitation_sum: float_at(precipitation_sum, i),
                precipitation_probability_max: float_at(precipitation_probability_max, i),
                wind_speed_max: float_at(wind_speed_max, i),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_frame_schema() -> Result<(), Box<dyn std::error::Error>> {
        let frame = DailyFrame::from_points(&[])?;
        let names: Vec<&str> = frame
            .frame
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();
        assert_eq!(names, FragmentKind::Daily.column_names());
        assert_eq!(frame.frame.schema(), DailyFrame::empty().frame.schema());
        Ok(())
    }
}
