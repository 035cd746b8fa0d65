//! # Database Handle
//!
//! The shared store plus repository access.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Application startup                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new() ─► Arc<MemoryKvStore>                                  │
//! │       │                                                                 │
//! │       ├── db.items()  → ItemRepository  (clones the Arc)                │
//! │       ├── db.carts()  → CartRepository  (clones the Arc)                │
//! │       └── db.with_transaction(|tx| ...)                                 │
//! │                                                                         │
//! │  Every clone of Database addresses the same store.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use crate::memdb::{MemoryKvStore, StoreError, Transaction};
use crate::repository::cart::CartRepository;
use crate::repository::item::ItemRepository;

/// Main store handle providing repository access.
///
/// ## Usage
/// ```rust
/// use flipshop_core::{Item, Money};
/// use flipshop_db::{Database, DbResult};
///
/// let db = Database::new();
/// db.with_transaction(|tx| -> DbResult<()> {
///     let pi = Item::new("234234", "Raspberry Pi B", Money::from_cents(3000), 2);
///     db.items().store(tx, &pi)
/// })
/// .unwrap();
///
/// assert_eq!(db.items().list().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Database {
    store: Arc<MemoryKvStore>,
}

impl Database {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the item repository.
    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(Arc::clone(&self.store))
    }

    /// Returns the cart repository.
    pub fn carts(&self) -> CartRepository {
        CartRepository::new(Arc::clone(&self.store))
    }

    /// Runs `handler` in a store transaction. See
    /// [`MemoryKvStore::with_transaction`].
    pub fn with_transaction<T, E, F>(&self, handler: F) -> Result<T, E>
    where
        F: FnOnce(&mut Transaction) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.store.with_transaction(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbResult;
    use flipshop_core::{Item, Money};

    #[test]
    fn test_clones_share_one_store() {
        let db = Database::new();
        let other = db.clone();

        db.with_transaction(|tx| -> DbResult<()> {
            db.items()
                .store(tx, &Item::new("A", "A", Money::from_cents(1), 1))
        })
        .unwrap();

        assert!(other.items().find_by_sku_committed("A").is_ok());
    }
}
