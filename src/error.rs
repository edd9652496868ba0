use crate::config::ConfigError;
use crate::extract::error::ExtractError;
use crate::load::error::LoadError;
use crate::transform::error::TransformError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("No data extracted from any location")]
    NoDataExtracted,
}
