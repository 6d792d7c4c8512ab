use std::net::SocketAddr;

use server::config::{load_catalog, load_settings};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let catalog = load_catalog(&settings)?;
    info!(
        cities = catalog.cities.len(),
        foods = catalog.foods.len(),
        distances = catalog.distances.len(),
        "catalog ready"
    );
    let app = server::app(catalog);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
