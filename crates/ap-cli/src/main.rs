//! Asset Pulse CLI
//!
//! Command-line interface for the Asset Pulse record-management backend.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

mod commands;
mod config;

use ap_observability::{init_logging_with_config, LoggingConfig};
use commands::ServeSettings;
use config::AppConfig;

#[derive(Parser)]
#[command(name = "asset-pulse")]
#[command(version)]
#[command(about = "Asset and performance-metric record management backend", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Disable Swagger UI
        #[arg(long)]
        no_swagger: bool,
    },

    /// Hash a password for out-of-band identity provisioning
    HashPassword {
        /// Password to hash; read from stdin when omitted
        password: Option<String>,
    },

    /// Show the effective configuration
    Config {
        /// Show secrets (redacted by default)
        #[arg(long)]
        show_secrets: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let mut config = match path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply_env();
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Serve {
            port,
            host,
            no_swagger,
        } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }

            let level = if cli.verbose {
                Level::DEBUG
            } else {
                config.logging.level.parse().unwrap_or(Level::INFO)
            };
            init_logging_with_config(LoggingConfig {
                level,
                json_format: config.logging.json,
                ..LoggingConfig::default()
            });

            commands::run_server(&config, &ServeSettings { no_swagger }).await
        }

        Commands::HashPassword { password } => commands::hash_password_command(password),

        Commands::Config { show_secrets } => commands::show_config(&config, show_secrets),
    }
}
