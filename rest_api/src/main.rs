// rest_api/src/main.rs

// Entry point of the LifeFlow REST API. Parses the command line, loads the
// layered configuration and serves until Ctrl-C.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::oneshot;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rest_api::config::load_rest_api_config;
use rest_api::start_server;

#[derive(Debug, Parser)]
#[clap(name = "lifeflow-api", version, about = "LifeFlow blood donation dashboard API")]
struct Args {
    /// Config file (yaml, toml or json). Defaults to ./lifeflow.* when present.
    #[clap(long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[clap(long, env = "LIFEFLOW_HOST")]
    host: Option<String>,

    #[clap(short, long, env = "LIFEFLOW_PORT")]
    port: Option<u16>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = load_rest_api_config(args.config.as_deref())
        .context("Failed to load REST API configuration")?
        .with_overrides(args.host, args.port);
    info!(
        host = %config.host,
        port = config.port,
        delay_ms = config.submission_delay.as_millis() as u64,
        auxiliary_routes = config.auxiliary_routes,
        "Starting LifeFlow API"
    );

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            // Dropping the sender would stop the server, so keep it alive.
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Ctrl-C received, shutting down");
        let _ = shutdown_tx.send(());
    });

    start_server(config, shutdown_rx).await
}
