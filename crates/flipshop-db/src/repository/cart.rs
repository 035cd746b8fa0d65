//! # Cart Repository
//!
//! Carts, keyed by id in the `carts` collection.

use std::sync::Arc;

use flipshop_core::Cart;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::memdb::{MemoryKvStore, StoreError, StoreName, Transaction};

/// Collection holding every [`Cart`].
pub const CARTS: StoreName = StoreName::new("carts");

/// Repository for carts.
#[derive(Debug, Clone)]
pub struct CartRepository {
    store: Arc<MemoryKvStore>,
}

impl CartRepository {
    pub fn new(store: Arc<MemoryKvStore>) -> Self {
        CartRepository { store }
    }

    /// Loads a cart from the last committed state.
    ///
    /// ## Errors
    /// `CartNotFound` when no cart has this id.
    pub fn find_by_id(&self, cart_id: &str) -> DbResult<Cart> {
        self.store
            .read_as::<Cart>(CARTS, cart_id)
            .map_err(|err| not_found(err, cart_id))
    }

    /// Loads a cart from the transaction snapshot.
    pub fn find_by_id_in(&self, tx: &Transaction, cart_id: &str) -> DbResult<Cart> {
        tx.read_as::<Cart>(CARTS, cart_id)
            .map_err(|err| not_found(err, cart_id))
    }

    /// Writes a cart into the transaction snapshot.
    pub fn store(&self, tx: &mut Transaction, cart: &Cart) -> DbResult<()> {
        debug!(
            cart_id = %cart.cart_id,
            status = ?cart.status,
            lines = cart.line_count(),
            "Storing cart"
        );
        tx.write(CARTS, cart.cart_id.as_str(), cart.clone());
        Ok(())
    }

    /// Creates and stores a new empty cart in its own transaction.
    pub fn create(&self) -> DbResult<Cart> {
        self.with_transaction(|tx| -> DbResult<Cart> {
            let cart = Cart::new();
            self.store(tx, &cart)?;
            Ok(cart)
        })
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

fn not_found(err: StoreError, cart_id: &str) -> DbError {
    match err {
        StoreError::NotFound { .. } => DbError::CartNotFound(cart_id.to_string()),
        other => DbError::Store(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipshop_core::{CartStatus, CoreError, Item, Money};

    fn repo() -> CartRepository {
        CartRepository::new(Arc::new(MemoryKvStore::new()))
    }

    #[test]
    fn test_create_then_find() {
        let repo = repo();
        let cart = repo.create().unwrap();

        let found = repo.find_by_id(&cart.cart_id).unwrap();
        assert_eq!(found, cart);
        assert_eq!(found.status, CartStatus::Available);
    }

    #[test]
    fn test_unknown_cart() {
        let repo = repo();
        let id = uuid::Uuid::new_v4().to_string();

        assert_eq!(repo.find_by_id(&id), Err(DbError::CartNotFound(id.clone())));
    }

    #[test]
    fn test_submitted_cart_cannot_be_resubmitted() {
        let repo = repo();
        let cart = repo.create().unwrap();

        repo.with_transaction(|tx| -> DbResult<()> {
            let mut cart = repo.find_by_id_in(tx, &cart.cart_id)?;
            cart.submit()?;
            repo.store(tx, &cart)
        })
        .unwrap();

        let err = repo
            .with_transaction(|tx| -> DbResult<()> {
                let mut cart = repo.find_by_id_in(tx, &cart.cart_id)?;
                cart.submit()?;
                repo.store(tx, &cart)
            })
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::Core(CoreError::CartNotAvailable { .. })
        ));
    }

    #[test]
    fn test_uncommitted_purchase_is_invisible() {
        let repo = repo();
        let cart = repo.create().unwrap();
        let pi = Item::new("234234", "Raspberry Pi B", Money::from_cents(3000), 2);

        let _ = repo.with_transaction(|tx| -> DbResult<()> {
            let mut open = repo.find_by_id_in(tx, &cart.cart_id)?;
            open.purchase(&pi, 1)?;
            repo.store(tx, &open)?;
            open.purchase(&pi, -5)?;
            Ok(())
        });

        assert_eq!(repo.find_by_id(&cart.cart_id).unwrap().line_count(), 0);
    }
}
