//! attendance-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use attendance_gateway::api;
use attendance_gateway::app_state::AppState;
use attendance_gateway::config::{GatewayConfig, LogFormat, StorageBackend};
use attendance_gateway::domain::EventBus;
use attendance_gateway::persistence::{AttendanceStore, MemoryStore, PostgresStore};
use attendance_gateway::service::{AttendanceService, IssuancePolicy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, backend = ?config.storage_backend, "starting attendance-gateway");

    // Build storage
    let store: Arc<dyn AttendanceStore> = match config.storage_backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Postgres => {
            let store = PostgresStore::connect(&config)
                .await
                .context("connecting to postgres")?;
            store.migrate().await.context("running migrations")?;
            Arc::new(store)
        }
    };

    // Build service layer
    let event_bus = EventBus::new(config.event_bus_capacity);
    let service = AttendanceService::new(store, event_bus, IssuancePolicy::from(&config));

    // Build router
    let app = api::build_app(
        AppState::new(service),
        Duration::from_secs(config.request_timeout_secs),
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
