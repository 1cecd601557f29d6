// src/bin/api_server.rs

use homehub_ingest::infra::config::GatewayConfig;
use homehub_ingest::infra::logging;
use homehub_ingest::{storage, Attendant, Backend, HttpAttendant};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::load();
    logging::init();

    // --- Backend Initialization ---
    info!(driver = %config.driver, "initializing storage backend");
    let backend = storage::connect(&config.driver, &config.source)
        .await
        .map_err(|e| anyhow::anyhow!("unable to initialize database: {e}"))?;

    // --- Attendant Initialization ---
    let attendant = match HttpAttendant::start(config.http()).await {
        Ok(attendant) => attendant,
        Err(e) => {
            backend.stop().await;
            return Err(anyhow::anyhow!("unable to initialize attendant: {e}"));
        }
    };
    attendant.bind(backend.clone()).await;
    info!(addr = %attendant.local_addr(), "press Ctrl+C to shut down");

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    // Stop accepting before releasing storage so in-flight requests can finish.
    attendant.stop().await;
    backend.stop().await;
    info!("shutdown complete");

    Ok(())
}
