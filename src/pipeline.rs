//! Runs extraction, transformation and loading in sequence and records how far a
//! run got.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::extract::extractor::WeatherExtractor;
use crate::load::loader::WeatherLoader;
use crate::transform::transformer::WeatherTransformer;
use chrono::{DateTime, Utc};
use log::{error, info};
use std::fmt;
use std::time::{Duration, Instant};

/// The stage a pipeline is in, or the outcome of its last run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineStage {
    #[default]
    Idle,
    Extracting,
    Transforming,
    Loading,
    Succeeded,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Extracting => "extracting",
            PipelineStage::Transforming => "transforming",
            PipelineStage::Loading => "loading",
            PipelineStage::Succeeded => "succeeded",
            PipelineStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    /// Locations that returned a usable response.
    pub cities_processed: usize,
    pub current_records: usize,
    pub hourly_records: usize,
    pub daily_records: usize,
    pub duration: Duration,
    pub completed_at: DateTime<Utc>,
}

impl fmt::Display for PipelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status: SUCCESS")?;
        writeln!(f, "Duration: {:.2} seconds", self.duration.as_secs_f64())?;
        writeln!(
            f,
            "Completed at: {}",
            self.completed_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(f, "Cities processed: {}", self.cities_processed)?;
        write!(
            f,
            "Records loaded: {} current, {} hourly, {} daily",
            self.current_records, self.hourly_records, self.daily_records
        )
    }
}

/// Extract → transform → load over one configuration.
///
/// A pipeline can be run repeatedly; every run starts again from extraction and
/// appends to the store.
pub struct WeatherPipeline {
    extractor: WeatherExtractor,
    transformer: WeatherTransformer,
    loader: WeatherLoader,
    stage: PipelineStage,
}

impl WeatherPipeline {
    /// Validates the configuration and builds the three stages.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            extractor: WeatherExtractor::new(&config)?,
            transformer: WeatherTransformer::new(),
            loader: WeatherLoader::new(config.database_url),
            stage: PipelineStage::Idle,
        })
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// The loader, for querying what previous runs stored.
    pub fn loader_mut(&mut self) -> &mut WeatherLoader {
        &mut self.loader
    }

    pub async fn run(&mut self) -> Result<PipelineSummary, PipelineError> {
        info!("Starting weather data pipeline");
        let started = Instant::now();
        match self.execute(started).await {
            Ok(summary) => {
                self.stage = PipelineStage::Succeeded;
                info!("Pipeline executed successfully\n{}", summary);
                Ok(summary)
            }
            Err(e) => {
                error!("Pipeline failed during {}: {}", self.stage, e);
                self.stage = PipelineStage::Failed;
                Err(e)
            }
        }
    }

    async fn execute(&mut self, started: Instant) -> Result<PipelineSummary, PipelineError> {
        self.stage = PipelineStage::Extracting;
        info!("Step 1: extraction");
        let raw_data = self.extractor.extract_all().await;
        if raw_data.is_empty() {
            return Err(PipelineError::NoDataExtracted);
        }

        self.stage = PipelineStage::Transforming;
        info!("Step 2: transformation");
        let tables = self.transformer.transform_all(&raw_data)?;

        self.stage = PipelineStage::Loading;
        info!("Step 3: loading");
        let loaded = self.loader.load_all(&tables)?;

        Ok(PipelineSummary {
            cities_processed: raw_data.len(),
            current_records: loaded.current_records,
            hourly_records: loaded.hourly_records,
            daily_records: loaded.daily_records,
            duration: started.elapsed(),
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::types::location::Location;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PipelineConfig {
            locations: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            WeatherPipeline::new(config),
            Err(PipelineError::Config(ConfigError::NoLocations))
        ));
    }

    #[tokio::test]
    async fn test_no_data_leaves_store_untouched() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let db_path = dir.path().join("weather.db");
        let config = PipelineConfig {
            base_url: "http://127.0.0.1:9/v1/forecast".to_string(),
            locations: vec![Location::new("Testville", "Nowhere", 10.0, 20.0)],
            database_url: format!("sqlite://{}", db_path.display()),
            request_delay_ms: 0,
            timeout_secs: 2,
            ..Default::default()
        };
        let mut pipeline = WeatherPipeline::new(config)?;
        assert_eq!(pipeline.stage(), PipelineStage::Idle);

        let result = pipeline.run().await;
        assert!(matches!(result, Err(PipelineError::NoDataExtracted)));
        assert_eq!(pipeline.stage(), PipelineStage::Failed);
        assert!(!db_path.exists());
        Ok(())
    }
}
