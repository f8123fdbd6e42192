//! refwatch CLI - Remote Repository Change Tracker

use clap::{Parser, Subcommand};
use refwatch::config::{Overrides, CONFIG_FILE_NAME};
use refwatch::schedule::{Scheduler, Trigger};
use refwatch::{EventSink, JsonLinesSink, Tracker, TrackerConfig};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "refwatch")]
#[command(about = "Track a remote git repository and report what changed", long_about = None)]
struct Cli {
    /// Config file (defaults to ./refwatch.yaml)
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Remote repository URL
    #[arg(short, long)]
    repository: Option<String>,

    /// Local mirror location
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Time between periodic checks (e.g. 30m, 12h)
    #[arg(short, long, value_parser = humantime_serde::re::humantime::parse_duration)]
    interval: Option<Duration>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one check and print the report
    Check,

    /// Check periodically; JSON lines on stdin trigger extra checks
    Watch,

    /// Print the existing mirror's branches and tags without cloning or syncing
    Snapshot,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries reports
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Check => check(config).await,
        Commands::Watch => watch(config).await,
        Commands::Snapshot => snapshot(config).await,
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<TrackerConfig> {
    let mut config = TrackerConfig::load(&cli.config)?.unwrap_or_default();
    config = config.with_overrides(&Overrides {
        repository: cli.repository.clone(),
        path: cli.path.clone(),
    });
    if let Some(interval) = cli.interval {
        config = config.with_interval(interval);
    }
    Ok(config)
}

async fn check(config: TrackerConfig) -> anyhow::Result<()> {
    let mut sink = JsonLinesSink::new(std::io::stdout());
    match refwatch::schedule::run_blocking(config).await {
        Ok(report) => {
            sink.emit(&report)?;
            Ok(())
        }
        Err(err) => {
            sink.report_failure(&err.to_string())?;
            if let Some(suggestion) = err.suggestion() {
                eprintln!("hint: {}", suggestion);
            }
            Err(err.into())
        }
    }
}

async fn watch(config: TrackerConfig) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Overrides>(line) {
                Ok(overrides) => {
                    if tx.send(Trigger::new(overrides)).await.is_err() {
                        break;
                    }
                }
                Err(err) => tracing::warn!(error = %err, "Ignoring malformed trigger"),
            }
        }
    });

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    let mut scheduler = Scheduler::new(config, JsonLinesSink::new(std::io::stdout()));
    scheduler.run(rx, true, shutdown).await?;
    Ok(())
}

async fn snapshot(config: TrackerConfig) -> anyhow::Result<()> {
    let snapshot = tokio::task::spawn_blocking(move || {
        let tracker = Tracker::new(config)?;
        tracker.snapshot()
    })
    .await??;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
