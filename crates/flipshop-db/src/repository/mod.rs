//! # Repository Module
//!
//! Typed access to the store for each entity.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  db.with_transaction(|tx| {                                     │
//! │       │      let mut item = db.items().find_by_sku(tx, sku)?;           │
//! │       │      item.reserve(qty)?;                                        │
//! │       │      db.items().store(tx, &item)                                │
//! │       │  })                                                             │
//! │       ▼                                                                 │
//! │  ItemRepository / CartRepository                                        │
//! │  ├── find_*(tx, key)     → clone out of the snapshot                    │
//! │  ├── store(tx, &entity)  → write back into the snapshot                 │
//! │  └── *_committed / list  → read the last commit, no transaction         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MemoryKvStore (one collection per entity)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Inventory items keyed by SKU
//! - [`cart::CartRepository`] - Carts keyed by id

pub mod cart;
pub mod item;
