//! # Flipshop Shop API
//!
//! HTTP adapter over the store and the promotion engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shop API Server                                  │
//! │                                                                         │
//! │  Client ───► axum Router ───► routes::{cart, items, health}             │
//! │                                    │                                    │
//! │                                    ├──► checkout::submit_cart           │
//! │                                    │         │                          │
//! │                                    │         ▼                          │
//! │                                    │    PromotionSet + CartDelegate     │
//! │                                    ▼                                    │
//! │                               Database (Arc<MemoryKvStore>)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The binary in `main.rs` only loads configuration, seeds the store and
//! serves [`build_app`]. Tests drive the same router in-process.

pub mod checkout;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use flipshop_core::PromotionSet;
use flipshop_db::Database;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    pub db: Database,
    /// Frozen at startup, applied in order on every submission.
    pub promotions: PromotionSet,
    pub version: String,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(db: Database, promotions: PromotionSet, version: impl Into<String>) -> Self {
        AppState {
            db,
            promotions,
            version: version.into(),
            started_at: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

pub type SharedState = Arc<AppState>;

/// Builds the application router.
pub fn build_app(state: SharedState) -> Router {
    routes::router().with_state(state)
}
