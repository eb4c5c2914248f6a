use std::net::SocketAddr;

use acquisitions::acquisitions_config::ServerConfig;
use acquisitions::acquisitions_guard::SlidingWindowStore;
use acquisitions::logging::init_tracing;
use acquisitions::metrics::init_metrics;
use acquisitions::router::init_router;
use acquisitions::state::init_app_state;
use anyhow::Context;
use dotenvy::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    if let Err(err) = run().await {
        tracing::error!(error = %format!("{:#}", err), "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let metrics_handle = init_metrics();

    let windows = SlidingWindowStore::new();
    let state = init_app_state(windows.clone())
        .await
        .map_err(|err| err.error)?;

    if state.security_config.is_dry_run() {
        tracing::warn!("Security gate running in dry-run mode, denials are logged but not enforced");
    }
    windows.spawn_cleanup_task(state.security_config.cleanup_interval);

    let app = init_router(state, metrics_handle);

    let server_config = ServerConfig::from_env();
    let address = server_config.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!(address = %address, "Server running");
    tracing::info!("Swagger UI available at http://{}/swagger-ui", address);
    tracing::info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
