//! Storefront - catalog manager for a small marketplace of apps
//!
//! Main entry point wiring the clap command surface to the core catalog.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod app_cli;
mod dev_cli;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "storefront",
    about = "Catalog manager for a small marketplace of apps",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Directory holding the catalog and developer snapshot files
    #[clap(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,
}

#[derive(Parser, Debug)]
enum Command {
    /// Manage and query the app catalog
    App {
        #[clap(subcommand)]
        command: app_cli::AppCommand,
    },

    /// Manage the developer registry
    Dev {
        #[clap(subcommand)]
        command: dev_cli::DevCommand,
    },
}

/// Initialize tracing from the --log-level flag. Logs go to stderr so
/// command output on stdout stays clean.
fn initialize_tracing(log_level: &LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_filter_directive()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the data directory: the --data-dir flag wins, otherwise the
/// platform data dir.
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    let data_dir = match flag {
        Some(dir) => dir,
        None => directories::ProjectDirs::from("dev", "storefront", "storefront")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .or_else(|| dirs::data_dir().map(|d| d.join("storefront")))
            .context("Could not determine data directory")?,
    };

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    Ok(data_dir)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let data_dir = resolve_data_dir(cli.data_dir)?;
    tracing::debug!("Using data directory: {}", data_dir.display());

    match cli.command {
        Command::App { command } => command.execute(&data_dir),
        Command::Dev { command } => command.execute(&data_dir),
    }
}
