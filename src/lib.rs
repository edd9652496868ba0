//! Weather ETL: pulls current conditions and forecasts from the Open-Meteo API for a
//! set of locations, reshapes them into three tables and appends them to SQLite.
//!
//! ```no_run
//! use weather_etl::{PipelineConfig, PipelineError, WeatherPipeline};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), PipelineError> {
//! let mut pipeline = WeatherPipeline::new(PipelineConfig::default())?;
//! let summary = pipeline.run().await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod extract;
mod load;
mod pipeline;
mod transform;
mod types;
mod utils;

pub use config::{
    ConfigError, PipelineConfig, WeatherParams, DEFAULT_BASE_URL, DEFAULT_DATABASE_URL,
};
pub use error::PipelineError;
pub use pipeline::*;

pub use extract::error::ExtractError;
pub use extract::extractor::WeatherExtractor;

pub use transform::error::TransformError;
pub use transform::transformer::*;

pub use load::error::LoadError;
pub use load::loader::{LoadSummary, LocationIds, WeatherLoader};
pub use load::queries::{DailyForecastRow, LatestObservation, TableCounts, WeatherStore};

pub use types::fragment::FragmentKind;
pub use types::location::{CoordinateKey, LatLon, Location, LocationInfo};
pub use types::raw_weather::*;
pub use types::weather_code::{describe, describe_opt, WeatherCode, UNKNOWN_WEATHER};

pub use types::frames::current_frame::CurrentFrame;
pub use types::frames::daily_frame::DailyFrame;
pub use types::frames::hourly_frame::HourlyFrame;
pub use types::frames::WeatherFrame;

pub use types::weather_data::current::CurrentObservation;
pub use types::weather_data::daily::DailyForecastPoint;
pub use types::weather_data::hourly::HourlyForecastPoint;

pub use utils::DatabaseTarget;
