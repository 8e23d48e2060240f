//! Inkgate Service - HTTP API for the content-subscription platform
//!
//! This is the main entry point for the inkgate service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkgate_service::{create_router, AppState, ServiceConfig};
use inkgate_store::Store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,inkgate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting inkgate service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        content_configured = %config.content_api_url.is_some(),
        stripe_configured = %config.stripe_api_key.is_some(),
        webhook_secret_configured = %config.stripe_webhook_secret.is_some(),
        "Service configuration loaded"
    );

    #[cfg(feature = "rocksdb-backend")]
    let store: Arc<dyn Store> = {
        tracing::info!(path = %config.data_dir, "Opening RocksDB store");
        Arc::new(inkgate_store::RocksStore::open(&config.data_dir)?)
    };
    #[cfg(not(feature = "rocksdb-backend"))]
    let store: Arc<dyn Store> = {
        tracing::warn!("rocksdb-backend feature disabled - using in-memory store (state is not durable)");
        Arc::new(inkgate_store::MemStore::new())
    };

    // Build app state
    let state = AppState::new(store, config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
