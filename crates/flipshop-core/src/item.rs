//! # Inventory Items
//!
//! An `Item` tracks how many units exist and how many are held against
//! open carts, in the same record.
//!
//! ## Quantity Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  qty_available = 10                                                     │
//! │  ├───────────── qty_reserved = 4 ──┤├──── unreserved = 6 ────┤          │
//! │                                                                         │
//! │  reserve(q)   q ≤ unreserved   →  reserved += q                         │
//! │  release(q)   q ≤ reserved     →  reserved −= q                         │
//! │  remove(q)    q ≤ reserved     →  available −= q, reserved −= q         │
//! │  restock(q)                    →  available += q                        │
//! │                                                                         │
//! │  INVARIANT: 0 ≤ qty_reserved ≤ qty_available                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items are never deleted; removal only decrements the counters. There is
//! no locking here: exclusivity comes from the enclosing store transaction.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// SKU
// =============================================================================

/// Stock Keeping Unit, the opaque unique identifier of an item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sku(String);

impl Sku {
    pub fn new(sku: impl Into<String>) -> Self {
        Sku(sku.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sku {
    fn from(sku: &str) -> Self {
        Sku(sku.to_string())
    }
}

impl From<String> for Sku {
    fn from(sku: String) -> Self {
        Sku(sku)
    }
}

impl Borrow<str> for Sku {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Item
// =============================================================================

/// An item available for purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    pub sku: Sku,

    /// Display name.
    pub name: String,

    /// Unit price in cents.
    pub price: Money,

    /// Units ever stocked minus units permanently removed.
    pub qty_available: i64,

    /// Units currently held against open carts.
    pub qty_reserved: i64,
}

impl Item {
    /// Creates an item with nothing reserved.
    pub fn new(sku: impl Into<Sku>, name: impl Into<String>, price: Money, qty: i64) -> Self {
        Item {
            sku: sku.into(),
            name: name.into(),
            price,
            qty_available: qty,
            qty_reserved: 0,
        }
    }

    /// Units that can still be reserved.
    #[inline]
    pub fn unreserved(&self) -> i64 {
        self.qty_available - self.qty_reserved
    }

    /// Holds `qty` units against a cart.
    ///
    /// ## Errors
    /// `ReservationUnavailable` when `qty` exceeds the unreserved stock.
    /// The item is left unchanged.
    pub fn reserve(&mut self, qty: i64) -> CoreResult<()> {
        non_negative(qty)?;
        if qty > self.unreserved() {
            return Err(CoreError::ReservationUnavailable {
                sku: self.sku.clone(),
                requested: qty,
                available: self.unreserved(),
            });
        }

        self.qty_reserved += qty;
        Ok(())
    }

    /// Gives back `qty` previously reserved units.
    pub fn release(&mut self, qty: i64) -> CoreResult<()> {
        non_negative(qty)?;
        if qty > self.qty_reserved {
            return Err(CoreError::InvalidRelease {
                sku: self.sku.clone(),
                requested: qty,
                reserved: self.qty_reserved,
            });
        }

        self.qty_reserved -= qty;
        Ok(())
    }

    /// Permanently takes `qty` reserved units out of stock (fulfilment).
    ///
    /// Only reserved stock can be removed, which keeps
    /// `qty_reserved ≤ qty_available` intact.
    pub fn remove(&mut self, qty: i64) -> CoreResult<()> {
        non_negative(qty)?;
        if qty > self.qty_reserved {
            return Err(CoreError::InvalidRemoval {
                sku: self.sku.clone(),
                requested: qty,
                reserved: self.qty_reserved,
            });
        }

        self.qty_available -= qty;
        self.qty_reserved -= qty;
        Ok(())
    }

    /// Adds stock. The caller rejects negative quantities.
    pub fn restock(&mut self, qty: i64) {
        self.qty_available = self.qty_available.saturating_add(qty);
    }

    /// Sets a new unit price. The caller rejects negative prices.
    pub fn adjust_price(&mut self, price: Money) {
        self.price = price;
    }
}

/// A negative count would run the counters backwards.
fn non_negative(qty: i64) -> CoreResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "qty".to_string(),
            min: 0,
            max: i64::MAX,
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
