//! # Inventory Seeding
//!
//! Fills an empty store with the launch inventory, or with a catalog
//! supplied as JSON.
//!
//! ## JSON Format
//! ```text
//! [
//!   { "sku": "120P90", "name": "Google Home", "price": 4999, "qty": 10 },
//!   ...
//! ]
//! ```
//! Rows with an empty SKU, a negative price or a negative quantity are
//! skipped. A document that fails to parse falls back to the defaults.

use flipshop_core::{catalog, Item, Money};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::database::Database;
use crate::error::DbResult;

/// One row of a seed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedItem {
    pub sku: String,
    pub name: String,
    /// Unit price in cents.
    pub price: i64,
    pub qty: i64,
}

impl SeedItem {
    fn is_valid(&self) -> bool {
        !self.sku.trim().is_empty() && self.price >= 0 && self.qty >= 0
    }

    fn into_item(self) -> Item {
        Item::new(self.sku.trim(), self.name, Money::from_cents(self.price), self.qty)
    }
}

/// The launch inventory.
pub fn default_inventory() -> Vec<Item> {
    catalog::DEFAULT_INVENTORY
        .iter()
        .map(|&(sku, name, price, qty)| Item::new(sku, name, Money::from_cents(price), qty))
        .collect()
}

/// Parses a JSON catalog, dropping invalid rows.
///
/// Falls back to [`default_inventory`] when the document does not parse.
pub fn parse_inventory(json: &str) -> Vec<Item> {
    let rows: Vec<SeedItem> = match serde_json::from_str(json) {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "Invalid inventory JSON, using default inventory");
            return default_inventory();
        }
    };

    rows.into_iter()
        .filter(|row| {
            let keep = row.is_valid();
            if !keep {
                debug!(sku = %row.sku, price = row.price, qty = row.qty, "Skipping seed row");
            }
            keep
        })
        .map(SeedItem::into_item)
        .collect()
}

/// Inventory from an optional JSON document, defaults when absent or blank.
pub fn inventory_from(json: Option<&str>) -> Vec<Item> {
    match json.map(str::trim) {
        Some(json) if !json.is_empty() => parse_inventory(json),
        _ => default_inventory(),
    }
}

/// Stores `items` in one transaction. Later rows with a repeated SKU
/// replace earlier ones.
///
/// ## Returns
/// The number of rows written.
pub fn seed_inventory(db: &Database, items: Vec<Item>) -> DbResult<usize> {
    let repo = db.items();
    let count = items.len();

    db.with_transaction(|tx| -> DbResult<()> {
        for item in &items {
            repo.store(tx, item)?;
        }
        Ok(())
    })?;

    info!(count, "Seeded inventory");
    Ok(count)
}
