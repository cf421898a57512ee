//! VERDANT - Climate indicator prediction service
//!
//! # Usage
//!
//! ```bash
//! # Serve on the default address (127.0.0.1:5000)
//! cargo run --release
//!
//! # Explicit config file and bind address
//! ./verdant --config verdant.toml --addr 0.0.0.0:8080
//!
//! curl -X POST localhost:5000/predict -d '{"co2": 100}'
//! ```
//!
//! # Environment Variables
//!
//! - `VERDANT_CONFIG`: Path to a TOML config file
//! - `VERDANT_SERVER_ADDR`: Bind address override (`--addr` wins over it)
//! - `VERDANT_CORS_ORIGINS`: Comma-separated allowed CORS origins
//! - `VERDANT_JSON_LOGS`: Emit JSON log lines
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;

use verdant::config::ServiceConfig;
use verdant::server::Server;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "verdant")]
#[command(about = "VERDANT climate indicator prediction service")]
#[command(version)]
struct CliArgs {
    /// Override the server address, taking precedence over the config file
    /// and `VERDANT_SERVER_ADDR` (default: "127.0.0.1:5000")
    #[arg(short, long, value_name = "HOST:PORT")]
    addr: Option<String>,

    /// Load configuration from this TOML file instead of the search path
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, env = "VERDANT_JSON_LOGS")]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

fn load_config(args: &CliArgs) -> Result<ServiceConfig> {
    let mut config = match &args.config {
        Some(path) => ServiceConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ServiceConfig::load(),
    };
    config.apply_env_overrides();

    if let Some(addr) = &args.addr {
        config.server.addr = addr.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.json_logs);

    let config = load_config(&args)?;

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  VERDANT - Climate Indicator Prediction Service");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!(
        addr = %config.server.addr,
        max_body_bytes = config.server.max_body_bytes,
        request_timeout_secs = config.server.request_timeout_secs,
        "Server configuration"
    );

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    Server::new(config).run(cancel_token).await?;

    info!("✓ VERDANT shutdown complete");
    Ok(())
}
