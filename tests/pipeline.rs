//! End-to-end runs against a mocked provider and a temporary SQLite file.

mod common;

use common::{config_for, failtown, forecast_body, testville, FORECAST_PATH};
use weather_etl::{PipelineError, PipelineStage, WeatherPipeline};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn provider() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("latitude", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(10.0, 20.0, 21.5)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("latitude", "30"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn run_loads_all_tables() -> Result<(), Box<dyn std::error::Error>> {
    let server = provider().await;
    let dir = tempfile::tempdir()?;
    let db = format!("sqlite://{}", dir.path().join("weather.db").display());
    let config = config_for(&server, vec![testville(), failtown()], &db);
    let mut pipeline = WeatherPipeline::new(config)?;

    let summary = pipeline.run().await?;
    assert_eq!(pipeline.stage(), PipelineStage::Succeeded);
    assert_eq!(summary.cities_processed, 1);
    assert_eq!(summary.current_records, 1);
    assert_eq!(summary.hourly_records, 3);
    assert_eq!(summary.daily_records, 2);

    let store = pipeline.loader_mut().store()?;
    let latest = store.latest_current_weather()?;
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].city, "Testville");
    assert_eq!(latest[0].temperature, 21.5);
    assert_eq!(latest[0].weather_description, "Overcast");

    let days = store.daily_forecast_for(10.0, 20.0)?;
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].sunrise, "05:30");
    assert_eq!(days[1].weather_description, "Thunderstorm");
    Ok(())
}

#[tokio::test]
async fn repeated_runs_append_without_duplicating_locations(
) -> Result<(), Box<dyn std::error::Error>> {
    let server = provider().await;
    let dir = tempfile::tempdir()?;
    let db = format!("sqlite://{}", dir.path().join("weather.db").display());
    let mut pipeline = WeatherPipeline::new(config_for(&server, vec![testville()], &db))?;

    pipeline.run().await?;
    pipeline.run().await?;

    let counts = pipeline.loader_mut().store()?.table_counts()?;
    assert_eq!(counts.locations, 1);
    assert_eq!(counts.current_weather, 2);
    assert_eq!(counts.hourly_forecast, 6);
    assert_eq!(counts.daily_forecast, 4);
    Ok(())
}

#[tokio::test]
async fn all_locations_failing_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let server = provider().await;
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("weather.db");
    let db = format!("sqlite://{}", db_path.display());
    let mut pipeline = WeatherPipeline::new(config_for(&server, vec![failtown()], &db))?;

    let result = pipeline.run().await;
    assert!(matches!(result, Err(PipelineError::NoDataExtracted)));
    assert_eq!(pipeline.stage(), PipelineStage::Failed);
    assert!(!db_path.exists());
    Ok(())
}

#[tokio::test]
async fn unreachable_database_fails_the_load() -> Result<(), Box<dyn std::error::Error>> {
    let server = provider().await;
    let dir = tempfile::tempdir()?;
    let db = format!(
        "sqlite://{}",
        dir.path().join("missing").join("weather.db").display()
    );
    let mut pipeline = WeatherPipeline::new(config_for(&server, vec![testville()], &db))?;

    let result = pipeline.run().await;
    assert!(matches!(
        result,
        Err(PipelineError::Load(weather_etl::LoadError::Connectivity { .. }))
    ));
    assert_eq!(pipeline.stage(), PipelineStage::Failed);
    Ok(())
}
