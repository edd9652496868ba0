use crate::types::fragment::FragmentKind;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Invalid database URL '{0}'")]
    InvalidDatabaseUrl(String),

    #[error("Cannot connect to database '{url}'")]
    Connectivity {
        url: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to create table '{table}'")]
    Schema {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("No stored location for ({latitude}, {longitude}) while loading {kind} rows")]
    UnresolvedLocation {
        kind: FragmentKind,
        latitude: f64,
        longitude: f64,
    },

    #[error("Database operation failed")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed reading DataFrame column")]
    Frame(#[from] PolarsError),
}
