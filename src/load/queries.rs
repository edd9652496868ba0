//! Read-only queries over the stored weather data.

use crate::load::error::LoadError;
use crate::load::schema::{CURRENT_WEATHER, DAILY_FORECAST, HOURLY_FORECAST, LOCATIONS};
use crate::types::location::LatLon;
use bon::bon;
use rusqlite::{params, Connection};

/// The newest current-conditions row of one location.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestObservation {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub weather_description: String,
    pub recorded_at: String,
}

/// One stored forecast day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecastRow {
    pub forecast_date: String,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub weather_description: String,
    pub precipitation_sum: f64,
    pub precipitation_probability_max: f64,
    pub wind_speed_max: f64,
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub locations: i64,
    pub current_weather: i64,
    pub hourly_forecast: i64,
    pub daily_forecast: i64,
}

const LATEST_CURRENT_SQL: &str = "
    SELECT l.city, l.country, l.latitude, l.longitude,
           c.temperature, c.feels_like, c.humidity, c.wind_speed,
           c.weather_description, c.recorded_at
    FROM current_weather c
    JOIN locations l ON l.location_id = c.location_id
    WHERE c.weather_id = (
        SELECT c2.weather_id FROM current_weather c2
        WHERE c2.location_id = c.location_id
        ORDER BY c2.recorded_at DESC, c2.weather_id DESC
        LIMIT 1
    )
    ORDER BY c.temperature DESC";

// Every run appends a fresh forecast, so only the newest row per day is kept.
const DAILY_FORECAST_SQL: &str = "
    SELECT d.forecast_date, d.temperature_max, d.temperature_min,
           d.weather_description, d.precipitation_sum,
           d.precipitation_probability_max, d.wind_speed_max,
           d.sunrise, d.sunset
    FROM daily_forecast d
    JOIN locations l ON l.location_id = d.location_id
    WHERE l.latitude = ?1 AND l.longitude = ?2
      AND d.forecast_id IN (
        SELECT MAX(forecast_id) FROM daily_forecast
        GROUP BY location_id, forecast_date
      )
    ORDER BY d.forecast_date
    LIMIT ?3";

/// A read-only view of the store, borrowed from a [`crate::WeatherLoader`].
pub struct WeatherStore<'a> {
    conn: &'a Connection,
}

#[bon]
impl<'a> WeatherStore<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The most recent observation of every stored location, warmest first.
    pub fn latest_current_weather(&self) -> Result<Vec<LatestObservation>, LoadError> {
        let mut stmt = self.conn.prepare(LATEST_CURRENT_SQL)?;
        let rows = stmt.query_map([], |row| {
            Ok(LatestObservation {
                city: row.get(0)?,
                country: row.get(1)?,
                latitude: row.get(2)?,
                longitude: row.get(3)?,
                temperature: row.get::<_, Option<f64>>(4)?.unwrap_or_default(),
                feels_like: row.get::<_, Option<f64>>(5)?.unwrap_or_default(),
                humidity: row.get::<_, Option<f64>>(6)?.unwrap_or_default(),
                wind_speed: row.get::<_, Option<f64>>(7)?.unwrap_or_default(),
                weather_description: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
                recorded_at: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Stored forecast days of one location, ordered by date.
    ///
    /// ```no_run
    /// # use weather_etl::{LatLon, WeatherLoader, LoadError};
    /// # fn main() -> Result<(), LoadError> {
    /// let mut loader = WeatherLoader::new("sqlite://weather_data.db");
    /// let store = loader.store()?;
    /// let week = store.daily_forecast(LatLon(51.5074, -0.1278)).limit(7).call()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = daily_forecast)]
    #[doc(hidden)]
    pub fn build_daily_forecast(
        &self,
        #[builder(start_fn)] location: LatLon,
        limit: Option<usize>,
    ) -> Result<Vec<DailyForecastRow>, LoadError> {
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map_or(-1, |l| l as i64);
        let mut stmt = self.conn.prepare(DAILY_FORECAST_SQL)?;
        let rows = stmt.query_map(params![location.0, location.1, limit], |row| {
            Ok(DailyForecastRow {
                forecast_date: row.get(0)?,
                temperature_max: row.get::<_, Option<f64>>(1)?.unwrap_or_default(),
                temperature_min: row.get::<_, Option<f64>>(2)?.unwrap_or_default(),
                weather_description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                precipitation_sum: row.get::<_, Option<f64>>(4)?.unwrap_or_default(),
                precipitation_probability_max: row.get::<_, Option<f64>>(5)?.unwrap_or_default(),
                wind_speed_max: row.get::<_, Option<f64>>(6)?.unwrap_or_default(),
                sunrise: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
                sunset: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// All stored forecast days of the location at `latitude`, `longitude`.
    pub fn daily_forecast_for(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<DailyForecastRow>, LoadError> {
        self.daily_forecast(LatLon(latitude, longitude)).call()
    }

    pub fn table_counts(&self) -> Result<TableCounts, LoadError> {
        let count = |table: &str| -> Result<i64, LoadError> {
            Ok(self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })?)
        };
        Ok(TableCounts {
            locations: count(LOCATIONS.name)?,
            current_weather: count(CURRENT_WEATHER.name)?,
            hourly_forecast: count(HOURLY_FORECAST.name)?,
            daily_forecast: count(DAILY_FORECAST.name)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::loader::WeatherLoader;
    use crate::transform::transformer::WeatherTransformer;
    use crate::types::location::Location;
    use crate::types::raw_weather::{ForecastResponse, RawWeather};

    fn raw(name: &str, lat: f64, temperature: f64, time: &str) -> RawWeather {
        let response: ForecastResponse = serde_json::from_value(serde_json::json!({
            "current": { "time": time, "temperature_2m": temperature, "weather_code": 1 },
            "daily": {
                "time": ["2024-06-02", "2024-06-01"],
                "temperature_2m_max": [temperature + 5.0, temperature + 4.0],
                "weather_code": [2, 3],
                "sunrise": ["2024-06-02T05:31", "2024-06-01T05:30"]
            }
        }))
        .expect("fixture should decode");
        RawWeather::new(&Location::new(name, "Nowhere", lat, 0.0), response)
    }

    fn loaded(runs: &[Vec<RawWeather>]) -> WeatherLoader {
        let mut loader = WeatherLoader::new(":memory:");
        for run in runs {
            let tables = WeatherTransformer::new()
                .transform_all(run)
                .expect("fixture should transform");
            loader.load_all(&tables).expect("load should succeed");
        }
        loader
    }

    #[test]
    fn test_latest_current_weather() -> Result<(), LoadError> {
        let mut loader = loaded(&[
            vec![
                raw("Cold", 1.0, 5.0, "2024-06-01T10:00"),
                raw("Warm", 2.0, 25.0, "2024-06-01T10:00"),
            ],
            vec![raw("Cold", 1.0, 30.0, "2024-06-01T11:00")],
        ]);
        let latest = loader.store()?.latest_current_weather()?;
        let summary: Vec<(&str, f64)> = latest
            .iter()
            .map(|o| (o.city.as_str(), o.temperature))
            .collect();
        assert_eq!(summary, vec![("Cold", 30.0), ("Warm", 25.0)]);
        assert_eq!(latest[0].weather_description, "Mainly clear");
        Ok(())
    }

    #[test]
    fn test_daily_forecast_is_ordered_and_deduplicated() -> Result<(), LoadError> {
        let mut loader = loaded(&[
            vec![raw("Testville", 1.0, 10.0, "2024-06-01T10:00")],
            vec![raw("Testville", 1.0, 20.0, "2024-06-01T11:00")],
        ]);
        let store = loader.store()?;
        let days = store.daily_forecast_for(1.0, 0.0)?;
        let dates: Vec<&str> = days.iter().map(|d| d.forecast_date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-01", "2024-06-02"]);
        assert_eq!(days[0].temperature_max, 24.0);
        assert_eq!(days[0].sunrise, "05:30");
        assert_eq!(days[1].weather_description, "Partly cloudy");

        let first = store.daily_forecast(LatLon(1.0, 0.0)).limit(1).call()?;
        assert_eq!(first.len(), 1);
        assert!(store.daily_forecast_for(99.0, 0.0)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_table_counts() -> Result<(), LoadError> {
        let mut loader = loaded(&[vec![
            raw("A", 1.0, 10.0, "2024-06-01T10:00"),
            raw("B", 2.0, 11.0, "2024-06-01T10:00"),
        ]]);
        let counts = loader.store()?.table_counts()?;
        assert_eq!(
            counts,
            TableCounts {
                locations: 2,
                current_weather: 2,
                hourly_forecast: 0,
                daily_forecast: 4,
            }
        );
        Ok(())
    }
}
