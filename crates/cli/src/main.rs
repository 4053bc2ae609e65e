//! Command-line frontend for the overhead map engine.
//!
//! Run with: `overmap <command>`

mod commands;
mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Battlefield, Look, Session};
use config::CliConfig;
use overmap_content::ContentFactory;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Overhead maps and battlefields over a room graph
#[derive(Parser)]
#[command(name = "overmap")]
#[command(about = "Render overhead maps and build battlefields", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory (overrides OVERMAP_DATA_DIR)
    #[arg(short, long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Render the overhead map around an observer
    Look(Look),

    /// Build a battlefield from a template
    Battlefield(Battlefield),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_file.as_deref())?;

    let env = CliConfig::from_env();
    let data_dir = cli.data_dir.unwrap_or_else(|| env.data_dir());
    let factory = ContentFactory::new(data_dir);

    let mut config = factory.load_config().context("Failed to load config.toml")?;
    env.apply(&mut config);
    let session = Session { factory, config };

    match cli.command {
        Command::Look(cmd) => cmd.execute(&session),
        Command::Battlefield(cmd) => cmd.execute(&session),
    }
}

/// Logs go to stderr, and to `log_file` as well when one is given.
fn setup_logging(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
            std::fs::create_dir_all(directory)
                .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
