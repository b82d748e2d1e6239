use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

mod config;
mod scoreboard;
mod server;

use config::Config;
use scoreboard::{EspnScoreboard, ScoreboardSource};
use server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.default_log_filter())),
        )
        .init();

    config.validate()?;

    if config.debug {
        info!("Debug mode enabled");
    }

    let source: Arc<dyn ScoreboardSource> = Arc::new(EspnScoreboard::new(
        &config.upstream_url,
        config.upstream_timeout(),
    )?);
    info!(
        "Upstream {}: {} (timeout {:?})",
        source.name(),
        config.upstream_url,
        config.upstream_timeout()
    );

    let app = server::router(AppState { source });
    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Scoreboard relay listening on http://{}", addr);

    // Run until Ctrl-C, letting in-flight requests finish
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Scoreboard relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
