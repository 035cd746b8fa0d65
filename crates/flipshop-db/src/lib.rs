//! # flipshop-db: Store Layer for Flipshop
//!
//! An in-memory, snapshot-isolated key-value store and the repositories
//! that map `Item` and `Cart` onto it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Flipshop Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (PUT /cart/{id}/purchase)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                   flipshop-db (THIS CRATE)                      │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │   Database    │    │  Repositories │    │    Seed      │    │    │
//! │  │   │ (database.rs) │    │  (item.rs)    │    │  (seed.rs)   │    │    │
//! │  │   │               │    │  (cart.rs)    │    │              │    │    │
//! │  │   │ Arc<Memory    │◄───│ ItemRepo      │    │ defaults or  │    │    │
//! │  │   │   KvStore>    │    │ CartRepo      │    │ JSON catalog │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │      memdb: RwLock<collections>, copy-on-write transactions     │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`memdb`] - The transactional key-value store
//! - [`database`] - Shared store handle and repository access
//! - [`error`] - Store layer error types
//! - [`repository`] - Item and cart repositories
//! - [`seed`] - Initial inventory
//!
//! ## Usage
//!
//! ```rust
//! use flipshop_db::{seed, Database, DbResult};
//!
//! let db = Database::new();
//! seed::seed_inventory(&db, seed::default_inventory()).unwrap();
//!
//! let speaker = db
//!     .with_transaction(|tx| -> DbResult<_> {
//!         let mut item = db.items().find_by_sku(tx, "A304SD")?;
//!         item.reserve(2)?;
//!         db.items().store(tx, &item)?;
//!         Ok(item)
//!     })
//!     .unwrap();
//!
//! assert_eq!(speaker.qty_reserved, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod database;
pub mod error;
pub mod memdb;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use database::Database;
pub use error::{DbError, DbResult};
pub use memdb::{MemoryKvStore, StoreError, StoreName, Transaction, Value};

// Repository re-exports for convenience
pub use repository::cart::CartRepository;
pub use repository::item::ItemRepository;
