//! Pegwatch CLI
//!
//! Command-line entry point for the DUSD peg monitor. Scheduling lives
//! here, outside the core: `check` runs one cycle, `watch` drives the same
//! cycle on a timer.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;

use pegwatch::monitor::Monitor;
use pegwatch::Config;

/// Pegwatch - DUSD peg monitoring and alerting
#[derive(Parser)]
#[command(name = "pegwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single monitoring cycle and exit
    Check,

    /// Run monitoring cycles on a fixed interval
    Watch {
        /// Time between cycles (e.g. "5m", "30s")
        #[arg(
            long,
            default_value = "5m",
            value_parser = humantime::parse_duration,
            env = "PEGWATCH_INTERVAL"
        )]
        interval: Duration,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let monitor = Monitor::new(config);

    let result = match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => run_check(&monitor).await,
        Commands::Watch { interval } => run_watch(&monitor, interval).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_check(monitor: &Monitor) -> anyhow::Result<()> {
    monitor.run_cycle().await;
    Ok(())
}

async fn run_watch(monitor: &Monitor, interval: Duration) -> anyhow::Result<()> {
    info!(
        "Watching DUSD peg every {}",
        humantime::format_duration(interval)
    );

    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => monitor.run_cycle().await,
            res = tokio::signal::ctrl_c() => {
                res?;
                info!("Shutting down");
                return Ok(());
            }
        }
    }
}
