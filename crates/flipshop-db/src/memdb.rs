//! # In-Memory Transactional Store
//!
//! Named collections of opaque values, read and written through
//! snapshot transactions.
//!
//! ## Transaction Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  with_transaction(handler)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. state.write()           ← exclusive, held until step 4 returns      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. tx = live.clone()       ← per-collection maps copied,               │
//! │       │                       values shared through Arc                 │
//! │       ▼                                                                 │
//! │  3. handler(&mut tx)        ← reads/writes only touch the copy          │
//! │       │                                                                 │
//! │       ├── Ok(t)  → *live = tx      (commit: one move)                   │
//! │       │                                                                 │
//! │       └── Err(e) → drop(tx)        (rollback: nothing to undo)          │
//! │                                                                         │
//! │  Plain reads take the shared lock and see the last commit.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store knows nothing about items or carts. Values are
//! `Arc<dyn Any + Send + Sync>` and typed access happens through
//! [`Transaction::read_as`].
//!
//! Handlers must not call back into `with_transaction`: the write lock is
//! not reentrant and the nested call would deadlock.

use std::any::{self, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

// =============================================================================
// Types
// =============================================================================

/// Name of a collection inside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreName(&'static str);

impl StoreName {
    pub const fn new(name: &'static str) -> Self {
        StoreName(name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// An opaque stored value.
pub type Value = Arc<dyn Any + Send + Sync>;

type Collection = HashMap<String, Value>;
type Collections = HashMap<StoreName, Collection>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Nothing stored under `key`, or the collection does not exist.
    #[error("value not found for key {key} in {store}")]
    NotFound { store: StoreName, key: String },

    /// A value exists but is not of the requested type.
    #[error("value for key {key} in {store} is not a {expected}")]
    TypeMismatch {
        store: StoreName,
        key: String,
        expected: &'static str,
    },
}

// =============================================================================
// Transaction
// =============================================================================

/// A private snapshot of every collection, handed to a transaction handler.
pub struct Transaction {
    collections: Collections,
}

impl Transaction {
    /// Returns the raw value under `key`.
    pub fn read(&self, store: StoreName, key: &str) -> Result<&Value, StoreError> {
        lookup(&self.collections, store, key)
    }

    /// Returns a clone of the value under `key`, typed as `T`.
    pub fn read_as<T: Any + Clone>(&self, store: StoreName, key: &str) -> Result<T, StoreError> {
        downcast(self.read(store, key)?, store, key)
    }

    pub fn contains(&self, store: StoreName, key: &str) -> bool {
        self.read(store, key).is_ok()
    }

    /// Inserts or replaces the value under `key`. Creates the collection on
    /// first write.
    pub fn write<T: Any + Send + Sync>(&mut self, store: StoreName, key: impl Into<String>, value: T) {
        self.write_value(store, key, Arc::new(value));
    }

    /// Like [`write`](Self::write) for a value that is already shared.
    pub fn write_value(&mut self, store: StoreName, key: impl Into<String>, value: Value) {
        self.collections
            .entry(store)
            .or_default()
            .insert(key.into(), value);
    }

    /// Every value of type `T` in a collection. Empty when the collection
    /// does not exist.
    pub fn list_as<T: Any + Clone>(&self, store: StoreName) -> Vec<T> {
        collect_typed(&self.collections, store)
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("collections", &summary(&self.collections))
            .finish()
    }
}

// =============================================================================
// Memory KV Store
// =============================================================================

/// The store. Construct one per application and share it behind an `Arc`.
#[derive(Default)]
pub struct MemoryKvStore {
    state: RwLock<Collections>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `handler` against a snapshot and commits it if the handler
    /// returns `Ok`.
    ///
    /// At most one transaction runs at any instant. An `Err` from the
    /// handler is returned unchanged after the snapshot is discarded.
    ///
    /// A panicking handler poisons the lock but never leaves a partial
    /// commit behind, so later calls recover the untouched state.
    pub fn with_transaction<T, E, F>(&self, handler: F) -> Result<T, E>
    where
        F: FnOnce(&mut Transaction) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut live = self.state.write().unwrap_or_else(PoisonError::into_inner);

        let mut tx = Transaction {
            collections: live.clone(),
        };

        let output = handler(&mut tx)?;
        *live = tx.collections;

        Ok(output)
    }

    /// Reads the last committed value under `key`.
    pub fn read(&self, store: StoreName, key: &str) -> Result<Value, StoreError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        lookup(&state, store, key).map(Arc::clone)
    }

    /// Typed variant of [`read`](Self::read).
    pub fn read_as<T: Any + Clone>(&self, store: StoreName, key: &str) -> Result<T, StoreError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        downcast(lookup(&state, store, key)?, store, key)
    }

    /// Every committed value in a collection, in no particular order.
    pub fn list(&self, store: StoreName) -> Vec<Value> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .get(&store)
            .map(|collection| collection.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Every committed value of type `T` in a collection.
    pub fn list_as<T: Any + Clone>(&self, store: StoreName) -> Vec<T> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        collect_typed(&state, store)
    }

    /// Number of committed values in a collection.
    pub fn len(&self, store: StoreName) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.get(&store).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self, store: StoreName) -> bool {
        self.len(store) == 0
    }
}

impl fmt::Debug for MemoryKvStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("MemoryKvStore")
            .field("collections", &summary(&state))
            .finish()
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn lookup<'a>(
    collections: &'a Collections,
    store: StoreName,
    key: &str,
) -> Result<&'a Value, StoreError> {
    collections
        .get(&store)
        .and_then(|collection| collection.get(key))
        .ok_or_else(|| StoreError::NotFound {
            store,
            key: key.to_string(),
        })
}

fn downcast<T: Any + Clone>(value: &Value, store: StoreName, key: &str) -> Result<T, StoreError> {
    (**value)
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| StoreError::TypeMismatch {
            store,
            key: key.to_string(),
            expected: any::type_name::<T>(),
        })
}

fn collect_typed<T: Any + Clone>(collections: &Collections, store: StoreName) -> Vec<T> {
    collections
        .get(&store)
        .map(|collection| {
            collection
                .values()
                .filter_map(|value| (**value).downcast_ref::<T>().cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Collection sizes, for `Debug` output.
fn summary(collections: &Collections) -> Vec<(StoreName, usize)> {
    let mut sizes: Vec<_> = collections
        .iter()
        .map(|(name, collection)| (*name, collection.len()))
        .collect();
    sizes.sort();
    sizes
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::thread;

    const THINGS: StoreName = StoreName::new("things");
    const COUNTERS: StoreName = StoreName::new("counters");

    #[derive(Debug, Clone, PartialEq)]
    struct Thing {
        name: String,
    }

    fn thing(name: &str) -> Thing {
        Thing {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_commit_is_visible_to_later_reads() {
        let store = MemoryKvStore::new();

        store
            .with_transaction(|tx| -> Result<(), StoreError> {
                tx.write(THINGS, "a", thing("apple"));
                Ok(())
            })
            .unwrap();

        assert_eq!(store.read_as::<Thing>(THINGS, "a").unwrap(), thing("apple"));
    }

    #[test]
    fn test_handler_sees_its_own_writes() {
        let store = MemoryKvStore::new();

        let seen = store
            .with_transaction(|tx| -> Result<Thing, StoreError> {
                tx.write(THINGS, "a", thing("apple"));
                tx.read_as(THINGS, "a")
            })
            .unwrap();

        assert_eq!(seen, thing("apple"));
    }

    #[test]
    fn test_failed_handler_rolls_back() {
        let store = MemoryKvStore::new();

        let result = store.with_transaction(|tx| -> Result<(), StoreError> {
            tx.write(THINGS, "key", thing("never"));
            Err(StoreError::NotFound {
                store: THINGS,
                key: "boom".to_string(),
            })
        });

        assert!(result.is_err());
        assert!(matches!(
            store.read(THINGS, "key"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_rollback_keeps_previous_value() {
        let store = MemoryKvStore::new();
        store
            .with_transaction(|tx| -> Result<(), StoreError> {
                tx.write(THINGS, "a", thing("first"));
                Ok(())
            })
            .unwrap();

        let _ = store.with_transaction(|tx| -> Result<(), StoreError> {
            tx.write(THINGS, "a", thing("second"));
            tx.read(THINGS, "missing")?;
            Ok(())
        });

        assert_eq!(store.read_as::<Thing>(THINGS, "a").unwrap(), thing("first"));
    }

    #[test]
    fn test_missing_and_mistyped_reads() {
        let store = MemoryKvStore::new();
        store
            .with_transaction(|tx| -> Result<(), StoreError> {
                tx.write(THINGS, "a", thing("apple"));
                Ok(())
            })
            .unwrap();

        assert!(matches!(
            store.read(StoreName::new("nope"), "a"),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.read_as::<String>(THINGS, "a"),
            Err(StoreError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_list_of_absent_collection_is_empty() {
        let store = MemoryKvStore::new();
        assert!(store.list(THINGS).is_empty());
        assert!(store.list_as::<Thing>(THINGS).is_empty());
        assert!(store.is_empty(THINGS));
    }

    #[test]
    fn test_concurrent_transactions_serialize() {
        let store = Arc::new(MemoryKvStore::new());
        store
            .with_transaction(|tx| -> Result<(), StoreError> {
                tx.write(COUNTERS, "n", 0i64);
                Ok(())
            })
            .unwrap();

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..50 {
                        store
                            .with_transaction(|tx| -> Result<(), StoreError> {
                                let n: i64 = tx.read_as(COUNTERS, "n")?;
                                tx.write(COUNTERS, "n", n + 1);
                                Ok(())
                            })
                            .unwrap();
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(store.read_as::<i64>(COUNTERS, "n").unwrap(), 200);
    }

    #[test]
    fn test_panicking_handler_leaves_state_intact() {
        let store = MemoryKvStore::new();
        store
            .with_transaction(|tx| -> Result<(), StoreError> {
                tx.write(THINGS, "a", thing("kept"));
                Ok(())
            })
            .unwrap();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let _ = store.with_transaction(|tx| -> Result<(), StoreError> {
                tx.write(THINGS, "a", thing("lost"));
                panic!("handler blew up");
            });
        }));
        assert!(outcome.is_err());

        assert_eq!(store.read_as::<Thing>(THINGS, "a").unwrap(), thing("kept"));
        store
            .with_transaction(|tx| -> Result<(), StoreError> {
                tx.write(THINGS, "b", thing("after"));
                Ok(())
            })
            .unwrap();
        assert_eq!(store.len(THINGS), 2);
    }
}
