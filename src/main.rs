use anyhow::Result;
use axum::Router;
use clap::Parser;
use heatpump_contribution::{api, config, state::AppState, telemetry};
use config::Config;
use std::path::PathBuf;
use telemetry::init_tracing;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "heatpump-api", version, about = "Heat Pump Contribution API")]
struct Args {
    /// Configuration file (defaults to config/default.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset to serve, overriding `dataset.path`
    #[arg(long)]
    data: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data) = args.data {
        cfg.dataset.path = data;
    }

    let app_state = AppState::load(&cfg).await?;

    #[allow(unused_mut)]
    let mut app: Router = api::router(app_state, &cfg);

    #[cfg(feature = "swagger")]
    {
        app = api::with_swagger(app);
    }

    #[cfg(feature = "metrics")]
    {
        app = api::with_metrics(app);
    }

    let listener = tokio::net::TcpListener::bind(cfg.server.socket_addr()?).await?;
    let addr = listener.local_addr()?;

    if addr.ip().is_unspecified() {
        warn!("Server binding to all interfaces - service will be accessible from the network");
    }

    for (method, path, description) in api::manual::ENDPOINTS {
        info!(%method, %path, "{description}");
    }
    info!(%addr, "starting Heat Pump Contribution API at http://{addr}/");

    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
