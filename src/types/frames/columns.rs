//! Helpers for moving typed rows in and out of polars columns.

use crate::types::location::LocationInfo;
use polars::prelude::*;

pub(crate) fn float_column(name: &str, values: Vec<f64>) -> Column {
    Column::new(name.into(), values)
}

pub(crate) fn int_column(name: &str, values: Vec<i64>) -> Column {
    Column::new(name.into(), values)
}

pub(crate) fn text_column(name: &str, values: Vec<&str>) -> Column {
    Column::new(name.into(), values)
}

/// Builds the five location metadata columns, in frame order.
pub(crate) fn location_columns(locations: &[&LocationInfo]) -> Vec<Column> {
    vec![
        text_column("city", locations.iter().map(|l| l.city.as_str()).collect()),
        text_column(
            "country",
            locations.iter().map(|l| l.country.as_str()).collect(),
        ),
        float_column("latitude", locations.iter().map(|l| l.latitude).collect()),
        float_column("longitude", locations.iter().map(|l| l.longitude).collect()),
        text_column(
            "timezone",
            locations.iter().map(|l| l.timezone.as_str()).collect(),
        ),
    ]
}

// Nulls never leave the transformer, but frames can also be built by callers.
pub(crate) fn float_at(ca: &Float64Chunked, idx: usize) -> f64 {
    ca.get(idx).unwrap_or_default()
}

pub(crate) fn int_at(ca: &Int64Chunked, idx: usize) -> i64 {
    ca.get(idx).unwrap_or_default()
}

pub(crate) fn text_at(ca: &StringChunked, idx: usize) -> String {
    ca.get(idx).unwrap_or_default().to_string()
}

/// Reads the location metadata columns of a frame row by row.
pub(crate) struct LocationReader<'a> {
    city: &'a StringChunked,
    country: &'a StringChunked,
    latitude: &'a Float64Chunked,
    longitude: &'a Float64Chunked,
    timezone: &'a StringChunked,
}

impl<'a> LocationReader<'a> {
    pub(crate) fn new(df: &'a DataFrame) -> PolarsResult<Self> {
        Ok(Self {
            city: df.column("city")?.str()?,
            country: df.column("country")?.str()?,
            latitude: df.column("latitude")?.f64()?,
            longitude: df.column("longitude")?.f64()?,
            timezone: df.column("timezone")?.str()?,
        })
    }

    pub(crate) fn at(&self, idx: usize) -> LocationInfo {
        LocationInfo {
            city: text_at(self.city, idx),
            country: text_at(self.country, idx),
            latitude: float_at(self.latitude, idx),
            longitude: float_at(self.longitude, idx),
            timezone: text_at(self.timezone, idx),
        }
    }
}
