//! # Flipshop API
//!
//! HTTP server for the shop.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  env ──► ShopConfig ──► tracing ──► Database::new() ──► seed inventory  │
//! │                                                              │          │
//! │                                                              ▼          │
//! │        axum::serve(listener, app) ◄── build_app ◄── AppState            │
//! │              │                                  (standard promotions)   │
//! │              ▼                                                          │
//! │        Ctrl+C / SIGTERM ──► graceful shutdown                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use flipshop_core::PromotionSet;
use flipshop_db::{seed, Database};
use shop_api::config::ShopConfig;
use shop_api::{build_app, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Flipshop API server...");

    // Load configuration
    let config = ShopConfig::load()?;
    info!(
        port = config.port,
        version = %config.version,
        custom_inventory = config.inventory_json.is_some(),
        "Configuration loaded"
    );

    // Create the store and seed it
    let db = Database::new();
    let inventory = seed::inventory_from(config.inventory_json.as_deref());
    seed::seed_inventory(&db, inventory)?;

    // Create shared state
    let promotions = PromotionSet::standard();
    info!(count = promotions.len(), "Promotions loaded");
    let state = Arc::new(AppState::new(db, promotions, config.version.clone()));

    let app = build_app(state);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
