use anyhow::Context;
use argh::FromArgs;
use std::path::PathBuf;
use weather_etl::{PipelineConfig, WeatherLoader, WeatherPipeline};

#[derive(FromArgs)]
/// Extract weather data from Open-Meteo, transform it and load it into SQLite.
struct Args {
    /// path to a YAML configuration file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// database URL, overriding the configuration (e.g. sqlite://weather_data.db)
    #[argh(option, short = 'd')]
    database: Option<String>,

    #[argh(subcommand)]
    command: Option<Command>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Run(RunArgs),
    Summary(SummaryArgs),
}

#[derive(FromArgs)]
/// Run the full pipeline once (default).
#[argh(subcommand, name = "run")]
struct RunArgs {}

#[derive(FromArgs)]
/// Print the latest stored observation of every location.
#[argh(subcommand, name = "summary")]
struct SummaryArgs {}

fn load_config(args: &Args) -> anyhow::Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(database) = &args.database {
        config.database_url = database.clone();
    }
    Ok(config)
}

async fn run(config: PipelineConfig) -> anyhow::Result<()> {
    let mut pipeline = WeatherPipeline::new(config)?;
    let summary = pipeline.run().await.context("Pipeline failed")?;
    println!("{summary}");
    Ok(())
}

fn summary(config: PipelineConfig) -> anyhow::Result<()> {
    let mut loader = WeatherLoader::new(config.database_url);
    loader.check_connection()?;
    loader.create_tables()?;
    let store = loader.store()?;

    let counts = store.table_counts()?;
    println!(
        "{} locations, {} current, {} hourly, {} daily records",
        counts.locations, counts.current_weather, counts.hourly_forecast, counts.daily_forecast
    );
    println!(
        "{:<20} {:<14} {:>8} {:>10} {:>9}  {}",
        "City", "Country", "Temp", "Feels", "Humidity", "Conditions"
    );
    for obs in store.latest_current_weather()? {
        println!(
            "{:<20} {:<14} {:>6.1}°C {:>8.1}°C {:>8.0}%  {} ({})",
            obs.city,
            obs.country,
            obs.temperature,
            obs.feels_like,
            obs.humidity,
            obs.weather_description,
            obs.recorded_at
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args: Args = argh::from_env();
    let config = load_config(&args)?;

    match args.command {
        None | Some(Command::Run(_)) => run(config).await,
        Some(Command::Summary(_)) => summary(config),
    }
}
