//! Wolt Watch CLI
//!
//! Starts restaurant watches on a Home Assistant instance from the command line.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::Level;
use wolt_watch::{load_config, Config, DurationSpec, StartOutcome, WatchCard, WoltWatch};

#[derive(Parser)]
#[command(name = "wolt-watch")]
#[command(about = "Start Wolt restaurant watches on Home Assistant")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info", value_parser = clap::value_parser!(Level))]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notification devices
    Targets,

    /// Start watching a restaurant
    Watch {
        /// Restaurant slug from the Wolt URL (e.g. "taizu")
        #[arg(long)]
        slug: String,

        /// Notification entity (e.g. "notify.mobile_app_phone")
        #[arg(long)]
        device: String,

        /// Watch duration (e.g. "2h", "90m", "1h 30m")
        #[arg(long, value_parser = humantime::parse_duration, conflicts_with_all = ["hours", "minutes", "seconds"])]
        duration: Option<Duration>,

        #[arg(long)]
        hours: Option<u64>,

        #[arg(long)]
        minutes: Option<u64>,

        #[arg(long)]
        seconds: Option<u64>,
    },

    /// Print the card catalog entry and stub configuration
    Card,
}

fn duration_from_args(
    duration: Option<Duration>,
    hours: Option<u64>,
    minutes: Option<u64>,
    seconds: Option<u64>,
) -> DurationSpec {
    if let Some(duration) = duration {
        return DurationSpec::from_duration(duration);
    }
    if hours.is_none() && minutes.is_none() && seconds.is_none() {
        return DurationSpec::default();
    }
    DurationSpec {
        hours,
        minutes,
        seconds,
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::info!("wolt-watch v{}", env!("CARGO_PKG_VERSION"));

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Commands::Card = args.command {
        let app = WoltWatch::new(&config)?;
        let entry = serde_json::json!({
            "cards": app.registry().catalog(),
            "stub_config": WatchCard::stub_config(),
        });
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(ExitCode::SUCCESS);
    }

    config.resolve_secrets()?;

    tracing::debug!(
        "Home Assistant at {}, service {}",
        config.home_assistant.url,
        config.service
    );

    let app = WoltWatch::new(&config)?;

    match args.command {
        Commands::Targets => {
            for target in app.targets().await? {
                println!("{}\t{}", target.id, target.display_name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Watch {
            slug,
            device,
            duration,
            hours,
            minutes,
            seconds,
        } => {
            let duration = duration_from_args(duration, hours, minutes, seconds);
            match app.start_watch(&slug, &device, duration).await {
                StartOutcome::Submitted(outcome) if outcome.is_success() => Ok(ExitCode::SUCCESS),
                _ => Ok(ExitCode::FAILURE),
            }
        }
        Commands::Card => Ok(ExitCode::SUCCESS),
    }
}
