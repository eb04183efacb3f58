//! Aegis Sync: replicate one appliance's configuration onto its replicas.
//!
//! Usage:
//!   aegis-sync run [--env-file .env] [--verbose]
//!
//! All settings come from the environment (see `config`); `--env-file`
//! loads a dotenv file into the environment first. Without a `CRON`
//! schedule the sync runs once and the process exits non-zero on failure;
//! with one it keeps running and logs failures.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use aegis_cli::{Config, Service};

#[derive(Parser, Debug)]
#[command(name = "aegis-sync", version)]
#[command(about = "Configuration replication for network-filtering appliances")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the sync, once or on the configured schedule
    Run {
        /// Read environment variables from a dotenv file
        #[arg(long, value_name = "FILE")]
        env_file: Option<PathBuf>,

        /// Enable verbose debug logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { env_file, verbose } => {
            let log_level = if verbose { Level::DEBUG } else { Level::INFO };
            FmtSubscriber::builder()
                .with_max_level(log_level)
                .with_target(false)
                .compact()
                .init();

            if let Some(path) = &env_file {
                dotenvy::from_path(path)
                    .with_context(|| format!("error loading env file {}", path.display()))?;
            }

            let conf = Config::load().context("loading configuration")?;
            let service = Service::new(conf)?;
            service.run().await
        }
    }
}
