//! Declarative description of the four tables in the store. DDL and insert
//! statements are rendered from these definitions.

/// Where an inserted value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnSource {
    /// Filled in by the database (primary keys, `created_at`).
    Generated,
    /// The id of the row's location, resolved by coordinates.
    LocationId,
    /// The frame column of the same name, copied as is.
    Frame,
    /// The frame column of the same name, keeping only the text after `T`.
    TimeOfDay,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub source: ColumnSource,
}

const fn col(name: &'static str, sql_type: &'static str, source: ColumnSource) -> ColumnDef {
    ColumnDef {
        name,
        sql_type,
        source,
    }
}

const fn value(name: &'static str, sql_type: &'static str) -> ColumnDef {
    col(name, sql_type, ColumnSource::Frame)
}

const CREATED_AT: ColumnDef = col(
    "created_at",
    "TIMESTAMP DEFAULT CURRENT_TIMESTAMP",
    ColumnSource::Generated,
);

const LOCATION_FK: &str = "FOREIGN KEY (location_id) REFERENCES locations (location_id)";

#[derive(Debug)]
pub(crate) struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    pub constraints: &'static [&'static str],
    /// `(index name, column)` for the table's time axis.
    pub time_index: Option<(&'static str, &'static str)>,
}

pub(crate) const LOCATIONS: TableDef = TableDef {
    name: "locations",
    columns: &[
        col(
            "location_id",
            "INTEGER PRIMARY KEY AUTOINCREMENT",
            ColumnSource::Generated,
        ),
        value("city", "TEXT NOT NULL"),
        value("country", "TEXT NOT NULL"),
        value("latitude", "REAL NOT NULL"),
        value("longitude", "REAL NOT NULL"),
        value("timezone", "TEXT"),
        CREATED_AT,
    ],
    constraints: &["UNIQUE (latitude, longitude)"],
    time_index: None,
};

pub(crate) const CURRENT_WEATHER: TableDef = TableDef {
    name: "current_weather",
    columns: &[
        col(
            "weather_id",
            "INTEGER PRIMARY KEY AUTOINCREMENT",
            ColumnSource::Generated,
        ),
        col("location_id", "INTEGER NOT NULL", ColumnSource::LocationId),
        value("temperature", "REAL"),
        value("feels_like", "REAL"),
        value("humidity", "REAL"),
        value("pressure", "REAL"),
        value("wind_speed", "REAL"),
        value("wind_direction", "REAL"),
        value("weather_code", "INTEGER"),
        value("weather_description", "TEXT"),
        value("uv_index", "REAL"),
        value("visibility", "REAL"),
        value("recorded_at", "TIMESTAMP"),
        CREATED_AT,
    ],
    constraints: &[LOCATION_FK],
    time_index: Some(("idx_current_weather_recorded", "recorded_at")),
};

pub(crate) const HOURLY_FORECAST: TableDef = TableDef {
    name: "hourly_forecast",
    columns: &[
        col(
            "forecast_id",
            "INTEGER PRIMARY KEY AUTOINCREMENT",
            ColumnSource::Generated,
        ),
        col("location_id", "INTEGER NOT NULL", ColumnSource::LocationId),
        value("forecast_time", "TIMESTAMP"),
        value("temperature", "REAL"),
        value("feels_like", "REAL"),
        value("precipitation_probability", "REAL"),
        value("precipitation", "REAL"),
        value("weather_code", "INTEGER"),
        value("weather_description", "TEXT"),
        value("wind_speed", "REAL"),
        value("wind_direction", "REAL"),
        value("humidity", "REAL"),
        CREATED_AT,
    ],
    constraints: &[LOCATION_FK],
    time_index: Some(("idx_hourly_forecast_time", "forecast_time")),
};

pub(crate) const DAILY_FORECAST: TableDef = TableDef {
    name: "daily_forecast",
    columns: &[
        col(
            "forecast_id",
            "INTEGER PRIMARY KEY AUTOINCREMENT",
            ColumnSource::Generated,
        ),
        col("location_id", "INTEGER NOT NULL", ColumnSource::LocationId),
        value("forecast_date", "DATE"),
        value("temperature_max", "REAL"),
        value("temperature_min", "REAL"),
        col("sunrise", "TIME", ColumnSource::TimeOfDay),
        col("sunset", "TIME", ColumnSource::TimeOfDay),
        value("precipitation_sum", "REAL"),
        value("precipitation_probability_max", "REAL"),
        value("weather_code", "INTEGER"),
        value("weather_description", "TEXT"),
        value("wind_speed_max", "REAL"),
        CREATED_AT,
    ],
    constraints: &[LOCATION_FK],
    time_index: Some(("idx_daily_forecast_date", "forecast_date")),
};

/// Creation order; referenced tables come first.
pub(crate) const TABLES: [&TableDef; 4] = [
    &LOCATIONS,
    &CURRENT_WEATHER,
    &HOURLY_FORECAST,
    &DAILY_FORECAST,
];

impl TableDef {
    /// Columns that receive a value on insert, in statement order.
    pub fn insert_columns(&self) -> impl Iterator<Item = &'static ColumnDef> {
        self.columns
            .iter()
            .filter(|c| c.source != ColumnSource::Generated)
    }

    pub fn create_sql(&self) -> String {
        let definitions: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.sql_type))
            .chain(self.constraints.iter().map(|c| c.to_string()))
            .collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.name,
            definitions.join(",\n    ")
        )
    }

    pub fn index_sql(&self) -> Option<String> {
        self.time_index.map(|(index, column)| {
            format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                index, self.name, column
            )
        })
    }

    pub fn insert_sql(&self) -> String {
        let names: Vec<&str> = self.insert_columns().map(|c| c.name).collect();
        let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{i}")).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.name,
            names.join(", "),
            placeholders.join(", ")
        )
    }
}

/// The time-of-day part of a local ISO 8601 datetime: `2024-06-01T05:30` → `05:30`.
/// Values without a `T` are kept whole.
pub(crate) fn time_of_day(datetime: &str) -> &str {
    datetime
        .split_once('T')
        .map_or(datetime, |(_, time)| time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fragment::FragmentKind;

    #[test]
    fn test_location_insert_sql() {
        assert_eq!(
            LOCATIONS.insert_sql(),
            "INSERT INTO locations (city, country, latitude, longitude, timezone) VALUES (?1, ?2, ?3, ?4, ?5)"
        );
    }

    #[test]
    fn test_create_sql_is_idempotent_ddl() {
        for table in TABLES {
            assert!(table.create_sql().starts_with("CREATE TABLE IF NOT EXISTS"));
            if let Some(index) = table.index_sql() {
                assert!(index.starts_with("CREATE INDEX IF NOT EXISTS"));
            }
        }
        assert!(DAILY_FORECAST.create_sql().contains(LOCATION_FK));
    }

    #[test]
    fn test_frame_columns_exist() {
        // Every column copied from a frame must be produced by the transformer.
        let pairs = [
            (&CURRENT_WEATHER, FragmentKind::Current),
            (&HOURLY_FORECAST, FragmentKind::Hourly),
            (&DAILY_FORECAST, FragmentKind::Daily),
        ];
        for (table, kind) in pairs {
            let frame_columns = kind.column_names();
            for column in table.insert_columns() {
                if column.source != ColumnSource::LocationId {
                    assert!(
                        frame_columns.contains(&column.name),
                        "{} missing from {} frame",
                        column.name,
                        kind
                    );
                }
            }
        }
    }

    #[test]
    fn test_time_of_day() {
        assert_eq!(time_of_day("2024-06-01T05:30"), "05:30");
        assert_eq!(time_of_day("05:30"), "05:30");
        assert_eq!(time_of_day(""), "");
    }
}
