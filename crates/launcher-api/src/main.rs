//! Launcher API server binary.
//!
//! Settings come from flags or the environment; `RUST_LOG` controls log
//! verbosity (default `info`).

use anyhow::{Context, Result};
use clap::Parser;
use launcher_api::domain::config::{
    CorsConfig, HttpConfig, SecurityConfig, StorageConfig, DEFAULT_PORT, DEFAULT_SECRET_KEY,
};
use launcher_api::{LauncherApiService, ServerConfig};
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Launcher API: signed metadata, update checks, downloads and telemetry
#[derive(Parser, Debug)]
#[command(name = "launcher-api", version)]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory holding the JSON sources, downloads/ and logs/
    #[arg(long, env = "BASE_DIR", default_value = ".")]
    base_dir: PathBuf,

    /// HMAC secret shared with the launcher
    #[arg(long, env = "SECRET_KEY", default_value = DEFAULT_SECRET_KEY, hide_env_values = true)]
    secret_key: String,

    /// Refuse to start with the built-in default secret
    #[arg(long, env = "REQUIRE_SECRET_KEY")]
    require_secret: bool,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            http: HttpConfig {
                host: self.host,
                port: self.port,
            },
            storage: StorageConfig {
                base_dir: self.base_dir,
            },
            security: SecurityConfig {
                secret_key: self.secret_key,
                require_secret: self.require_secret,
            },
            cors: CorsConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let config = Args::parse().into_config();
    info!(version = launcher_api::VERSION, "Starting Launcher API");

    let service =
        Arc::new(LauncherApiService::new(config).context("invalid server configuration")?);

    let signal_service = Arc::clone(&service);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => signal_service.shutdown(),
            Err(e) => error!(error = %e, "failed to listen for Ctrl+C"),
        }
    });

    service.start().await.context("server failed")?;
    Ok(())
}
