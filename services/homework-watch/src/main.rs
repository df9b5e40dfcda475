//! Homework Watch CLI
//!
//! Command-line interface for the homework review status notifier.

use std::path::PathBuf;

use clap::Parser;
use homework_watch::{load_config, Config, Credentials, WatcherBuilder};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-watch")]
#[command(about = "Telegram notifier for homework review status changes")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Homework status endpoint (overrides config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Seconds between polls (overrides config file)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    retry_period: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info", value_parser = parse_log_level)]
    log_level: Level,
}

fn parse_log_level(s: &str) -> Result<Level, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid log level: {}. Use: trace, debug, info, warn, error",
            s
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, endpoint={:?}, retry_period={:?}, log_level={:?}",
        args.config,
        args.endpoint,
        args.retry_period,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(endpoint) = args.endpoint {
        config.api.endpoint = endpoint;
    }
    if let Some(retry_period) = args.retry_period {
        config.polling.retry_period_seconds = retry_period;
    }

    tracing::info!("Starting homework watcher");
    tracing::info!("Retry period: {}s", config.polling.retry_period_seconds);

    WatcherBuilder::new(config, Credentials::from_env())
        .build()?
        .start()
        .await?;

    Ok(())
}
