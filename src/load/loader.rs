//! Persists transformed tables into SQLite.
//!
//! The loader holds a single connection for its whole lifetime. It is opened on
//! first use, so constructing a loader never touches the filesystem.

use crate::load::error::LoadError;
use crate::load::queries::WeatherStore;
use crate::load::schema::{
    time_of_day, ColumnDef, ColumnSource, TableDef, CURRENT_WEATHER, DAILY_FORECAST,
    HOURLY_FORECAST, LOCATIONS, TABLES,
};
use crate::transform::transformer::TransformedTables;
use crate::types::frames::columns::LocationReader;
use crate::types::frames::current_frame::CurrentFrame;
use crate::types::frames::daily_frame::DailyFrame;
use crate::types::frames::hourly_frame::HourlyFrame;
use crate::types::frames::WeatherFrame;
use crate::types::location::{CoordinateKey, LatLon, LocationInfo};
use crate::utils::DatabaseTarget;
use log::{debug, error, info, warn};
use polars::prelude::{AnyValue, Column, DataFrame};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::collections::{HashMap, HashSet};

/// Stored location ids, keyed by exact coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationIds(HashMap<CoordinateKey, i64>);

impl LocationIds {
    pub fn get(&self, coordinates: LatLon) -> Option<i64> {
        self.0.get(&coordinates.key()).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, coordinates: LatLon, id: i64) {
        self.0.insert(coordinates.key(), id);
    }
}

/// Rows written by one [`WeatherLoader::load_all`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub locations: usize,
    pub current_records: usize,
    pub hourly_records: usize,
    pub daily_records: usize,
}

pub struct WeatherLoader {
    database_url: String,
    conn: Option<Connection>,
}

impl WeatherLoader {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            conn: None,
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    fn open(&self) -> Result<Connection, LoadError> {
        let target = DatabaseTarget::parse(&self.database_url)
            .ok_or_else(|| LoadError::InvalidDatabaseUrl(self.database_url.clone()))?;
        let connectivity = |source| LoadError::Connectivity {
            url: self.database_url.clone(),
            source,
        };
        let conn = match target {
            DatabaseTarget::InMemory => Connection::open_in_memory(),
            DatabaseTarget::File(path) => Connection::open(path),
        }
        .map_err(connectivity)?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(connectivity)?;
        Ok(conn)
    }

    fn connection(&mut self) -> Result<&mut Connection, LoadError> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                debug!("Opening database {}", self.database_url);
                self.open()?
            }
        };
        Ok(self.conn.insert(conn))
    }

    /// Opens the connection if needed and runs a trivial query against it.
    pub fn check_connection(&mut self) -> Result<(), LoadError> {
        let url = self.database_url.clone();
        let conn = self.connection()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(|source| LoadError::Connectivity { url, source })?;
        info!("Database connection successful");
        Ok(())
    }

    /// Creates any missing tables and their time indexes. Existing tables are
    /// left untouched.
    pub fn create_tables(&mut self) -> Result<(), LoadError> {
        let conn = self.connection()?;
        for table in TABLES {
            let mut sql = table.create_sql();
            if let Some(index) = table.index_sql() {
                sql.push_str(";\n");
                sql.push_str(&index);
            }
            conn.execute_batch(&sql)
                .map_err(|source| LoadError::Schema {
                    table: table.name,
                    source,
                })?;
        }
        info!("Database tables created successfully");
        Ok(())
    }

    /// Looks up every distinct location in the tables by coordinates, inserting
    /// the ones not stored yet. Runs in a single transaction.
    pub fn load_locations(
        &mut self,
        tables: &TransformedTables,
    ) -> Result<LocationIds, LoadError> {
        let locations = distinct_locations(tables)?;
        let conn = self.connection()?;
        let tx = conn.transaction()?;
        let mut ids = LocationIds::default();
        let mut inserted = 0;
        {
            let mut select = tx.prepare(
                "SELECT location_id FROM locations WHERE latitude = ?1 AND longitude = ?2",
            )?;
            let mut insert = tx.prepare(&LOCATIONS.insert_sql())?;
            for location in &locations {
                let existing: Option<i64> = select
                    .query_row(params![location.latitude, location.longitude], |row| {
                        row.get(0)
                    })
                    .optional()?;
                let id = match existing {
                    Some(id) => id,
                    None => {
                        insert.execute(params![
                            location.city,
                            location.country,
                            location.latitude,
                            location.longitude,
                            location.timezone,
                        ])?;
                        inserted += 1;
                        tx.last_insert_rowid()
                    }
                };
                ids.insert(location.coordinates(), id);
            }
        }
        tx.commit()?;
        info!("Loaded {} locations ({} new)", ids.len(), inserted);
        Ok(ids)
    }

    pub fn load_current_weather(
        &mut self,
        frame: &CurrentFrame,
        ids: &LocationIds,
    ) -> Result<usize, LoadError> {
        self.append(&CURRENT_WEATHER, frame, ids)
    }

    pub fn load_hourly_forecast(
        &mut self,
        frame: &HourlyFrame,
        ids: &LocationIds,
    ) -> Result<usize, LoadError> {
        self.append(&HOURLY_FORECAST, frame, ids)
    }

    pub fn load_daily_forecast(
        &mut self,
        frame: &DailyFrame,
        ids: &LocationIds,
    ) -> Result<usize, LoadError> {
        self.append(&DAILY_FORECAST, frame, ids)
    }

    /// Appends every row of `frame` to `table` in one transaction.
    fn append<F: WeatherFrame>(
        &mut self,
        table: &TableDef,
        frame: &F,
        ids: &LocationIds,
    ) -> Result<usize, LoadError> {
        if frame.is_empty() {
            warn!("No {} data to load", F::KIND);
            return Ok(0);
        }
        let df = frame.frame();
        let columns = insert_sources(table, df)?;
        let latitude = df.column("latitude")?.f64()?;
        let longitude = df.column("longitude")?.f64()?;

        let conn = self.connection()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&table.insert_sql())?;
            for i in 0..df.height() {
                let coordinates = LatLon(
                    latitude.get(i).unwrap_or_default(),
                    longitude.get(i).unwrap_or_default(),
                );
                let location_id = ids.get(coordinates).ok_or_else(|| {
                    LoadError::UnresolvedLocation {
                        kind: F::KIND,
                        latitude: coordinates.0,
                        longitude: coordinates.1,
                    }
                })?;
                let values = columns
                    .iter()
                    .map(|(def, column)| row_value(def, *column, i, location_id))
                    .collect::<Result<Vec<Value>, LoadError>>()?;
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;
        info!("Loaded {} {} records", df.height(), F::KIND);
        Ok(df.height())
    }

    /// Runs the full load: connectivity check, schema, locations, then the three
    /// tables. Stops at the first failure.
    pub fn load_all(&mut self, tables: &TransformedTables) -> Result<LoadSummary, LoadError> {
        self.check_connection()
            .inspect_err(|e| error!("Database connection failed: {}", e))?;
        self.create_tables()
            .inspect_err(|e| error!("Error creating tables: {}", e))?;
        let ids = self
            .load_locations(tables)
            .inspect_err(|e| error!("Error loading locations: {}", e))?;
        let current_records = self
            .load_current_weather(&tables.current, &ids)
            .inspect_err(|e| error!("Error loading current weather: {}", e))?;
        let hourly_records = self
            .load_hourly_forecast(&tables.hourly, &ids)
            .inspect_err(|e| error!("Error loading hourly forecast: {}", e))?;
        let daily_records = self
            .load_daily_forecast(&tables.daily, &ids)
            .inspect_err(|e| error!("Error loading daily forecast: {}", e))?;

        Ok(LoadSummary {
            locations: ids.len(),
            current_records,
            hourly_records,
            daily_records,
        })
    }

    /// Read-only access to the stored data over the loader's connection.
    pub fn store(&mut self) -> Result<WeatherStore<'_>, LoadError> {
        Ok(WeatherStore::new(self.connection()?))
    }
}

/// Distinct locations across the three tables, current first, in first-seen order.
fn distinct_locations(tables: &TransformedTables) -> Result<Vec<LocationInfo>, LoadError> {
    let mut seen = HashSet::new();
    let mut locations = Vec::new();
    for df in [
        tables.current.frame(),
        tables.hourly.frame(),
        tables.daily.frame(),
    ] {
        let reader = LocationReader::new(df)?;
        for i in 0..df.height() {
            let location = reader.at(i);
            if seen.insert(location.coordinates().key()) {
                locations.push(location);
            }
        }
    }
    Ok(locations)
}

/// Pairs each inserted column with the frame column it reads from, if any.
fn insert_sources<'a>(
    table: &TableDef,
    df: &'a DataFrame,
) -> Result<Vec<(&'static ColumnDef, Option<&'a Column>)>, LoadError> {
    table
        .insert_columns()
        .map(|def| -> Result<_, LoadError> {
            match def.source {
                ColumnSource::LocationId | ColumnSource::Generated => Ok((def, None)),
                ColumnSource::Frame | ColumnSource::TimeOfDay => {
                    Ok((def, Some(df.column(def.name)?)))
                }
            }
        })
        .collect()
}

fn row_value(
    def: &ColumnDef,
    column: Option<&Column>,
    idx: usize,
    location_id: i64,
) -> Result<Value, LoadError> {
    let Some(column) = column else {
        return Ok(Value::Integer(location_id));
    };
    let value = match column.get(idx)? {
        AnyValue::Null => Value::Null,
        AnyValue::Float64(v) => Value::Real(v),
        AnyValue::Int64(v) => Value::Integer(v),
        AnyValue::String(s) => text_value(def, s),
        AnyValue::StringOwned(s) => text_value(def, s.as_str()),
        other => Value::Text(other.to_string()),
    };
    Ok(value)
}

fn text_value(def: &ColumnDef, s: &str) -> Value {
    match def.source {
        ColumnSource::TimeOfDay => Value::Text(time_of_day(s).to_string()),
        _ => Value::Text(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::location::Location;
    use crate::transform::transformer::WeatherTransformer;
    use crate::types::raw_weather::{ForecastResponse, RawWeather};

    fn raw(name: &str, lat: f64, lon: f64) -> RawWeather {
        let response: ForecastResponse = serde_json::from_value(serde_json::json!({
            "timezone": "Etc/UTC",
            "current": { "time": "2024-06-01T12:00", "temperature_2m": lat, "weather_code": 3 },
            "hourly": {
                "time": ["2024-06-01T00:00", "2024-06-01T01:00"],
                "temperature_2m": [15.0, 14.0]
            },
            "daily": {
                "time": ["2024-06-01"],
                "sunrise": ["2024-06-01T05:30"],
                "sunset": ["2024-06-01T21:45"]
            }
        }))
        .expect("fixture should decode");
        RawWeather::new(&Location::new(name, "Nowhere", lat, lon), response)
    }

    fn tables(raws: &[RawWeather]) -> TransformedTables {
        WeatherTransformer::new()
            .transform_all(raws)
            .expect("fixture should transform")
    }

    fn count(loader: &mut WeatherLoader, table: &str) -> i64 {
        loader
            .connection()
            .expect("connection")
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
            .expect("count query")
    }

    #[test]
    fn test_create_tables_twice() -> Result<(), LoadError> {
        let mut loader = WeatherLoader::new(":memory:");
        loader.create_tables()?;
        loader.create_tables()?;
        let conn = loader.connection()?;
        let names: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")?
            .query_map([], |row| row.get(0))?
            .collect::<Result<_, _>>()?;
        assert_eq!(
            names,
            vec!["current_weather", "daily_forecast", "hourly_forecast", "locations"]
        );
        let indexes: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%'",
            [],
            |row| row.get(0),
        )?;
        assert_eq!(indexes, 3);
        Ok(())
    }

    #[test]
    fn test_locations_are_idempotent() -> Result<(), LoadError> {
        let mut loader = WeatherLoader::new(":memory:");
        loader.create_tables()?;
        let tables = tables(&[raw("Testville", 10.0, 20.0)]);
        let first = loader.load_locations(&tables)?;
        let second = loader.load_locations(&tables)?;
        assert_eq!(first, second);
        assert_eq!(count(&mut loader, "locations"), 1);
        Ok(())
    }

    #[test]
    fn test_same_name_different_coordinates() -> Result<(), LoadError> {
        let mut loader = WeatherLoader::new(":memory:");
        loader.create_tables()?;
        let tables = tables(&[
            raw("Springfield", 39.7817, -89.6501),
            raw("Springfield", 42.1015, -72.5898),
        ]);
        let ids = loader.load_locations(&tables)?;
        assert_eq!(ids.len(), 2);
        assert_ne!(
            ids.get(LatLon(39.7817, -89.6501)),
            ids.get(LatLon(42.1015, -72.5898))
        );
        Ok(())
    }

    #[test]
    fn test_load_all_appends() -> Result<(), LoadError> {
        let mut loader = WeatherLoader::new(":memory:");
        let tables = tables(&[raw("Testville", 10.0, 20.0)]);
        let summary = loader.load_all(&tables)?;
        assert_eq!(
            summary,
            LoadSummary {
                locations: 1,
                current_records: 1,
                hourly_records: 2,
                daily_records: 1,
            }
        );
        loader.load_all(&tables)?;
        assert_eq!(count(&mut loader, "locations"), 1);
        assert_eq!(count(&mut loader, "current_weather"), 2);
        assert_eq!(count(&mut loader, "hourly_forecast"), 4);
        assert_eq!(count(&mut loader, "daily_forecast"), 2);

        let (sunrise, sunset): (String, String) = loader.connection()?.query_row(
            "SELECT sunrise, sunset FROM daily_forecast LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        assert_eq!(sunrise, "05:30");
        assert_eq!(sunset, "21:45");
        Ok(())
    }

    #[test]
    fn test_empty_forecasts_are_noops() -> Result<(), LoadError> {
        let mut loader = WeatherLoader::new(":memory:");
        loader.create_tables()?;
        let ids = LocationIds::default();
        assert_eq!(loader.load_hourly_forecast(&HourlyFrame::empty(), &ids)?, 0);
        assert_eq!(loader.load_daily_forecast(&DailyFrame::empty(), &ids)?, 0);
        assert_eq!(count(&mut loader, "hourly_forecast"), 0);
        Ok(())
    }

    #[test]
    fn test_unresolved_location() -> Result<(), LoadError> {
        let mut loader = WeatherLoader::new(":memory:");
        loader.create_tables()?;
        let tables = tables(&[raw("Testville", 10.0, 20.0)]);
        let result = loader.load_current_weather(&tables.current, &LocationIds::default());
        assert!(matches!(result, Err(LoadError::UnresolvedLocation { .. })));
        assert_eq!(count(&mut loader, "current_weather"), 0);
        Ok(())
    }

    #[test]
    fn test_connectivity_failure_stops_before_schema() {
        let mut loader = WeatherLoader::new("sqlite:///nonexistent-weather-dir/sub/weather.db");
        let result = loader.load_all(&TransformedTables::empty());
        assert!(matches!(result, Err(LoadError::Connectivity { .. })));
        assert!(loader.conn.is_none());
    }

    #[test]
    fn test_invalid_url() {
        let mut loader = WeatherLoader::new("sqlite://");
        assert!(matches!(
            loader.check_connection(),
            Err(LoadError::InvalidDatabaseUrl(_))
        ));
    }
}
