//! Defines the three table kinds produced by the transformer and the column layout
//! each of them carries.

use polars::prelude::{DataType, Field, Schema};
use std::fmt;

/// Represents the granularity of a transformed weather table.
///
/// Each kind corresponds to one block of the Open-Meteo response and to one
/// destination table in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// A single point-in-time reading per location (the `current` block).
    Current,
    /// One predicted row per location per hour (the `hourly` block).
    Hourly,
    /// One predicted row per location per day (the `daily` block).
    Daily,
}

/// Storage type of a frame column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnType {
    Text,
    Float,
    Int,
}

impl ColumnType {
    fn dtype(self) -> DataType {
        match self {
            ColumnType::Text => DataType::String,
            ColumnType::Float => DataType::Float64,
            ColumnType::Int => DataType::Int64,
        }
    }
}

/// Location metadata columns shared by every fragment, in frame order.
pub(crate) const LOCATION_COLUMNS: [(&str, ColumnType); 5] = [
    ("city", ColumnType::Text),
    ("country", ColumnType::Text),
    ("latitude", ColumnType::Float),
    ("longitude", ColumnType::Float),
    ("timezone", ColumnType::Text),
];

const CURRENT_COLUMNS: [(&str, ColumnType); 12] = [
    ("temperature", ColumnType::Float),
    ("feels_like", ColumnType::Float),
    ("humidity", ColumnType::Float),
    ("pressure", ColumnType::Float),
    ("wind_speed", ColumnType::Float),
    ("wind_direction", ColumnType::Float),
    ("weather_code", ColumnType::Int),
    ("weather_description", ColumnType::Text),
    ("uv_index", ColumnType::Float),
    ("visibility", ColumnType::Float),
    ("recorded_at", ColumnType::Text),
    ("extraction_time", ColumnType::Text),
];

const HOURLY_COLUMNS: [(&str, ColumnType); 10] = [
    ("forecast_time", ColumnType::Text),
    ("temperature", ColumnType::Float),
    ("feels_like", ColumnType::Float),
    ("humidity", ColumnType::Float),
    ("precipitation_probability", ColumnType::Float),
    ("precipitation", ColumnType::Float),
    ("weather_code", ColumnType::Int),
    ("weather_description", ColumnType::Text),
    ("wind_speed", ColumnType::Float),
    ("wind_direction", ColumnType::Float),
];

const DAILY_COLUMNS: [(&str, ColumnType); 10] = [
    ("forecast_date", ColumnType::Text),
    ("weather_code", ColumnType::Int),
    ("weather_description", ColumnType::Text),
    ("temperature_max", ColumnType::Float),
    ("temperature_min", ColumnType::Float),
    ("sunrise", ColumnType::Text),
    ("sunset", ColumnType::Text),
    ("precipitation_sum", ColumnType::Float),
    ("precipitation_probability_max", ColumnType::Float),
    ("wind_speed_max", ColumnType::Float),
];

impl FragmentKind {
    pub(crate) fn block_name(&self) -> &'static str {
        match self {
            FragmentKind::Current => "current",
            FragmentKind::Hourly => "hourly",
            FragmentKind::Daily => "daily",
        }
    }

    /// Name of the destination table in the store.
    pub fn table_name(&self) -> &'static str {
        match self {
            FragmentKind::Current => "current_weather",
            FragmentKind::Hourly => "hourly_forecast",
            FragmentKind::Daily => "daily_forecast",
        }
    }

    fn measurement_columns(&self) -> &'static [(&'static str, ColumnType)] {
        match self {
            FragmentKind::Current => &CURRENT_COLUMNS,
            FragmentKind::Hourly => &HOURLY_COLUMNS,
            FragmentKind::Daily => &DAILY_COLUMNS,
        }
    }

    /// Column names of a frame of this kind, location metadata first.
    pub fn column_names(&self) -> Vec<&'static str> {
        LOCATION_COLUMNS
            .iter()
            .chain(self.measurement_columns())
            .map(|(name, _)| *name)
            .collect()
    }

    /// The polars schema of a frame of this kind; used for zero-row tables.
    pub fn schema(&self) -> Schema {
        Schema::from_iter(
            LOCATION_COLUMNS
                .iter()
                .chain(self.measurement_columns())
                .map(|(name, dtype)| Field::new((*name).into(), dtype.dtype())),
        )
    }
}

/// Formats a `FragmentKind` using the name of its response block.
///
/// ```
/// use weather_etl::FragmentKind;
///
/// assert_eq!(FragmentKind::Hourly.to_string(), "hourly");
/// ```
impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.block_name())
    }
}
