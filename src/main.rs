//! Event manager HTTP server.

use anyhow::Context;
use clap::{Parser, Subcommand};
use event_manager::config::AppConfig;
use event_manager::{server, telemetry};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// TOML configuration file; defaults to `config/default.toml` if present.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, Default)]
enum Command {
    /// Serve the REST API.
    #[default]
    Serve,
    /// Apply pending database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    telemetry::init_tracing(&config.logging).context("initialising tracing")?;

    match cli.command.unwrap_or_default() {
        Command::Serve => {
            info!(version = env!("CARGO_PKG_VERSION"), "Starting event manager");
            server::serve(&config).await.context("serving")?;
        }
        Command::Migrate => {
            server::migrate(&config).await.context("migrating")?;
        }
    }

    info!("Shut down cleanly");
    Ok(())
}
