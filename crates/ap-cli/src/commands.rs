//! Command implementations for the Asset Pulse CLI.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use rand::RngCore;
use tracing::warn;

use ap_api::{ApiServer, ApiServerConfig, AppState};
use ap_core::ensure_default_user;

use crate::config::AppConfig;

/// Settings for the `serve` command.
#[derive(Debug, Clone)]
pub struct ServeSettings {
    /// Disable the Swagger UI.
    pub no_swagger: bool,
}

/// Starts the API server.
pub async fn run_server(config: &AppConfig, settings: &ServeSettings) -> Result<()> {
    let bind_address: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let secret = token_secret(config);

    let state = AppState::in_memory(&secret)
        .with_token_ttl(Duration::from_secs(config.auth.token_ttl_minutes * 60));

    // First-run identity bootstrap. Identities are otherwise provisioned
    // out-of-band; there is no registration endpoint.
    if let Some(password) = ensure_default_user(state.users.as_ref())
        .await
        .map_err(|e| anyhow::anyhow!("failed to seed default identity: {e}"))?
    {
        println!(
            "{} admin password: {}",
            "Generated".yellow().bold(),
            password.bold()
        );
    }

    let server_config = ApiServerConfig {
        bind_address,
        enable_swagger: !settings.no_swagger,
        ..ApiServerConfig::default()
    };

    ApiServer::new(state, server_config)
        .run()
        .await
        .context("API server failed")?;

    Ok(())
}

/// Resolves the token-signing secret, generating a per-process one when
/// the configuration leaves it empty.
fn token_secret(config: &AppConfig) -> Vec<u8> {
    if !config.auth.token_secret.is_empty() {
        return config.auth.token_secret.clone().into_bytes();
    }

    warn!("no token secret configured, generating one; tokens will not survive a restart");
    let mut secret = vec![0u8; 32];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

/// Prints the effective configuration as YAML.
pub fn show_config(config: &AppConfig, show_secrets: bool) -> Result<()> {
    let display = if show_secrets {
        config.clone()
    } else {
        config.redact_secrets()
    };
    println!("{}", serde_yaml::to_string(&display)?);
    Ok(())
}

/// Hashes a password for out-of-band identity provisioning.
pub fn hash_password_command(password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => {
            // Read a single line from stdin when no argument is given.
            let mut line = String::new();
            std::io::stdin()
                .read_line(&mut line)
                .context("failed to read password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }

    let hash = ap_core::hash_password(&password)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    println!("{hash}");
    Ok(())
}
