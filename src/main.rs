use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sla_engine::api::{AppState, create_router};
use sla_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// HTTP server for the attendance and ticket SLA calculators.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing workday.yaml and sla.yaml
    #[arg(short, long, value_name = "DIR", default_value = "./config/default")]
    config: PathBuf,

    /// Address to listen on
    #[arg(short, long, value_name = "ADDR", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Log every calculation step (overrides RUST_LOG)
    #[arg(long)]
    debug: bool,
}

/// Initialize tracing subscriber; RUST_LOG applies unless --debug is set
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let loader = ConfigLoader::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    let app = create_router(AppState::new(loader));

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!(addr = %cli.bind, "SLA engine listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
