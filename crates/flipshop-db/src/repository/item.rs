//! # Item Repository
//!
//! Inventory items, keyed by SKU in the `items` collection.

use std::sync::Arc;

use flipshop_core::Item;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::memdb::{MemoryKvStore, StoreError, StoreName, Transaction};

/// Collection holding every [`Item`].
pub const ITEMS: StoreName = StoreName::new("items");

/// Repository for inventory items.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    store: Arc<MemoryKvStore>,
}

impl ItemRepository {
    pub fn new(store: Arc<MemoryKvStore>) -> Self {
        ItemRepository { store }
    }

    /// Loads an item from the transaction snapshot.
    ///
    /// ## Errors
    /// `ItemNotFound` when no item has this SKU.
    pub fn find_by_sku(&self, tx: &Transaction, sku: &str) -> DbResult<Item> {
        tx.read_as::<Item>(ITEMS, sku).map_err(|err| not_found(err, sku))
    }

    /// Loads an item from the last committed state.
    pub fn find_by_sku_committed(&self, sku: &str) -> DbResult<Item> {
        self.store
            .read_as::<Item>(ITEMS, sku)
            .map_err(|err| not_found(err, sku))
    }

    /// Writes an item into the transaction snapshot, replacing any
    /// previous version.
    pub fn store(&self, tx: &mut Transaction, item: &Item) -> DbResult<()> {
        debug!(
            sku = %item.sku,
            qty_available = item.qty_available,
            qty_reserved = item.qty_reserved,
            "Storing item"
        );
        tx.write(ITEMS, item.sku.as_str(), item.clone());
        Ok(())
    }

    /// Writes a new item. Fails if the SKU is already taken.
    pub fn insert(&self, tx: &mut Transaction, item: &Item) -> DbResult<()> {
        if tx.contains(ITEMS, item.sku.as_str()) {
            return Err(DbError::DuplicateItem(item.sku.to_string()));
        }

        debug!(sku = %item.sku, name = %item.name, "Inserting item");
        self.store(tx, item)
    }

    /// Every committed item, sorted by SKU.
    pub fn list(&self) -> Vec<Item> {
        let mut items = self.store.list_as::<Item>(ITEMS);
        items.sort_by(|a, b| a.sku.cmp(&b.sku));

        debug!(count = items.len(), "Listed items");
        items
    }

    /// Runs `handler` in a store transaction.
    pub fn with_transaction<T, E, F>(&self, handler: F) -> Result<T, E>
    where
        F: FnOnce(&mut Transaction) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.store.with_transaction(handler)
    }
}

fn not_found(err: StoreError, sku: &str) -> DbError {
    match err {
        StoreError::NotFound { .. } => DbError::ItemNotFound(sku.to_string()),
        other => DbError::Store(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipshop_core::Money;

    fn repo() -> ItemRepository {
        ItemRepository::new(Arc::new(MemoryKvStore::new()))
    }

    fn item(sku: &str, qty: i64) -> Item {
        Item::new(sku, format!("Item {}", sku), Money::from_cents(1000), qty)
    }

    #[test]
    fn test_store_then_find() {
        let repo = repo();

        repo.with_transaction(|tx| -> DbResult<()> {
            repo.store(tx, &item("B", 3))?;
            assert_eq!(repo.find_by_sku(tx, "B")?.qty_available, 3);
            Ok(())
        })
        .unwrap();

        assert_eq!(repo.find_by_sku_committed("B").unwrap().qty_available, 3);
    }

    #[test]
    fn test_missing_item() {
        let repo = repo();
        assert_eq!(
            repo.find_by_sku_committed("NOPE"),
            Err(DbError::ItemNotFound("NOPE".to_string()))
        );
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let repo = repo();
        repo.with_transaction(|tx| repo.insert(tx, &item("A", 1)))
            .unwrap();

        let err = repo
            .with_transaction(|tx| repo.insert(tx, &item("A", 9)))
            .unwrap_err();

        assert_eq!(err, DbError::DuplicateItem("A".to_string()));
        assert_eq!(repo.find_by_sku_committed("A").unwrap().qty_available, 1);
    }

    #[test]
    fn test_list_sorted_by_sku() {
        let repo = repo();
        repo.with_transaction(|tx| -> DbResult<()> {
            for sku in ["C", "A", "B"] {
                repo.store(tx, &item(sku, 1))?;
            }
            Ok(())
        })
        .unwrap();

        let skus: Vec<_> = repo.list().into_iter().map(|i| i.sku.to_string()).collect();
        assert_eq!(skus, ["A", "B", "C"]);
    }

    #[test]
    fn test_failed_reservation_rolls_back() {
        let repo = repo();
        repo.with_transaction(|tx| repo.store(tx, &item("A", 2)))
            .unwrap();

        let result = repo.with_transaction(|tx| -> DbResult<()> {
            let mut a = repo.find_by_sku(tx, "A")?;
            a.reserve(1)?;
            repo.store(tx, &a)?;
            a.reserve(5)?;
            Ok(())
        });

        assert!(matches!(result, Err(DbError::Core(_))));
        assert_eq!(repo.find_by_sku_committed("A").unwrap().qty_reserved, 0);
    }
}
