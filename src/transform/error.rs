use crate::types::fragment::FragmentKind;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Failed to build {kind} table for {city}")]
    FrameBuild {
        kind: FragmentKind,
        city: String,
        #[source]
        source: PolarsError,
    },

    #[error("Failed to concatenate {kind} tables")]
    Concat {
        kind: FragmentKind,
        #[source]
        source: PolarsError,
    },
}
