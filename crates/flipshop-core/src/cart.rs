//! # Cart
//!
//! The purchase ledger of a single shopper.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌────────────┐        submit()         ┌────────────┐                  │
//! │  │ Available  │ ──────────────────────► │ Submitted  │  (read only)     │
//! │  └────────────┘                         └────────────┘                  │
//! │     │  ▲                                                                │
//! │     │  │ purchase(item, ±qty)                                           │
//! │     │  │ discount(sku, amount)                                          │
//! │     └──┘                                                                │
//! │                                                                         │
//! │  One Purchase line per SKU. A line exists iff its net qty ≠ 0.          │
//! │  Total stays 0 until submit() computes it.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::item::{Item, Sku};
use crate::money::Money;

// =============================================================================
// Cart Status
// =============================================================================

/// Two-state lifecycle. `Available → Submitted` is the only transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CartStatus {
    /// Cart accepts purchases.
    #[default]
    Available,
    /// Cart is submitted and does not accept purchases.
    Submitted,
}

// =============================================================================
// Purchase Line
// =============================================================================

/// One cart entry aggregating all purchased quantity of a SKU.
///
/// Uses the snapshot pattern: name and price are frozen when the SKU is
/// first purchased, later price adjustments don't touch open carts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Purchase {
    pub sku: Sku,
    pub name: String,
    /// Unit price at the time of the first purchase of this SKU.
    pub price: Money,
    /// Net quantity, always ≥ 1 while the line exists.
    pub qty: i64,
    /// Accumulated promotion discount.
    pub discount: Money,
}

impl Purchase {
    fn from_item(item: &Item) -> Self {
        Purchase {
            sku: item.sku.clone(),
            name: item.name.clone(),
            price: item.price,
            qty: 0,
            discount: Money::zero(),
        }
    }

    /// `price × qty − discount`, saturating and floored at zero.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.qty) - self.discount
    }
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// UUID v4, immutable once assigned.
    pub cart_id: String,

    pub status: CartStatus,

    /// Ordered by SKU so totals and JSON output are deterministic.
    pub purchases: BTreeMap<Sku, Purchase>,

    /// Computed by `submit()`; zero before that.
    pub total: Money,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "Option<String>")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Cart {
    /// Creates an empty `Available` cart with a fresh id.
    pub fn new() -> Self {
        Cart {
            cart_id: Uuid::new_v4().to_string(),
            status: CartStatus::Available,
            purchases: BTreeMap::new(),
            total: Money::zero(),
            created_at: Utc::now(),
            submitted_at: None,
        }
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == CartStatus::Available
    }

    /// Number of purchase lines (unique SKUs).
    #[inline]
    pub fn line_count(&self) -> usize {
        self.purchases.len()
    }

    /// Returns the purchase line for a SKU, if any.
    pub fn purchase_for(&self, sku: &str) -> Option<&Purchase> {
        self.purchases.get(sku)
    }

    fn ensure_available(&self) -> CoreResult<()> {
        if !self.is_available() {
            return Err(CoreError::CartNotAvailable {
                cart_id: self.cart_id.clone(),
            });
        }
        Ok(())
    }

    /// Adds `qty` units of `item` to the ledger. A negative `qty` reduces
    /// the line.
    ///
    /// ## Behavior
    /// ```text
    /// final = existing + qty
    ///   overflow    → InvalidQuantity, line unchanged
    ///   final < 0   → InvalidQuantity, line unchanged
    ///   final == 0  → line deleted
    ///   final > 0   → line upserted (new lines snapshot the item)
    /// ```
    ///
    /// Stock reservation is NOT done here; callers reserve on the item
    /// in the same transaction.
    pub fn purchase(&mut self, item: &Item, qty: i64) -> CoreResult<()> {
        self.ensure_available()?;

        let existing = self.purchases.get(&item.sku).map_or(0, |p| p.qty);
        let final_qty = existing
            .checked_add(qty)
            .ok_or_else(|| CoreError::InvalidQuantity {
                sku: item.sku.clone(),
                resulting: if qty < 0 { i64::MIN } else { i64::MAX },
            })?;

        match final_qty {
            q if q < 0 => Err(CoreError::InvalidQuantity {
                sku: item.sku.clone(),
                resulting: q,
            }),
            0 => {
                self.purchases.remove(&item.sku);
                Ok(())
            }
            q => {
                self.purchases
                    .entry(item.sku.clone())
                    .or_insert_with(|| Purchase::from_item(item))
                    .qty = q;
                Ok(())
            }
        }
    }

    /// Accumulates a discount on an existing line.
    ///
    /// No clamping against the line cost happens here; `submit()` floors
    /// each line at zero.
    pub fn discount(&mut self, sku: &Sku, amount: Money) -> CoreResult<()> {
        let line = self
            .purchases
            .get_mut(sku)
            .ok_or_else(|| CoreError::ItemNotInCart(sku.clone()))?;

        line.discount += amount;
        Ok(())
    }

    /// Computes the total and moves the cart to `Submitted`.
    ///
    /// Not idempotent: a second call fails with `CartNotAvailable`.
    pub fn submit(&mut self) -> CoreResult<()> {
        self.ensure_available()?;

        self.total = self
            .purchases
            .values()
            .fold(Money::zero(), |total, line| total + line.line_total());
        self.status = CartStatus::Submitted;
        self.submitted_at = Some(Utc::now());

        Ok(())
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sku: &str, price: i64) -> Item {
        Item::new(sku, format!("Item {}", sku), Money::from_cents(price), 100)
    }

    #[test]
    fn test_new_cart_is_available_and_empty() {
        let cart = Cart::new();
        assert!(cart.is_available());
        assert_eq!(cart.line_count(), 0);
        assert!(cart.total.is_zero());
        assert!(Uuid::parse_str(&cart.cart_id).is_ok());
    }

    #[test]
    fn test_purchase_same_sku_accumulates() {
        let mut cart = Cart::new();
        let speaker = item("A304SD", 10950);

        cart.purchase(&speaker, 2).unwrap();
        cart.purchase(&speaker, 1).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.purchase_for("A304SD").unwrap().qty, 3);
    }

    #[test]
    fn test_purchase_then_reverse_removes_line() {
        let mut cart = Cart::new();
        let pi = item("234234", 3000);

        cart.purchase(&pi, 4).unwrap();
        cart.purchase(&pi, -4).unwrap();

        assert!(cart.purchase_for("234234").is_none());
        assert_eq!(cart.line_count(), 0);
    }

    #[test]
    fn test_purchase_below_zero_leaves_line() {
        let mut cart = Cart::new();
        let pi = item("234234", 3000);
        cart.purchase(&pi, 1).unwrap();

        let err = cart.purchase(&pi, -2).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidQuantity {
                sku: Sku::from("234234"),
                resulting: -1,
            }
        );
        assert_eq!(cart.purchase_for("234234").unwrap().qty, 1);
    }

    #[test]
    fn test_purchase_overflowing_line_qty_fails() {
        let mut cart = Cart::new();
        let pi = item("234234", 3000);
        cart.purchase(&pi, 5).unwrap();

        let err = cart.purchase(&pi, i64::MAX).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidQuantity {
                sku: Sku::from("234234"),
                resulting: i64::MAX,
            }
        );
        assert_eq!(cart.purchase_for("234234").unwrap().qty, 5);
    }

    #[test]
    fn test_price_snapshot_taken_on_first_purchase() {
        let mut cart = Cart::new();
        let mut home = item("120P90", 4999);
        cart.purchase(&home, 1).unwrap();

        home.adjust_price(Money::from_cents(1));
        cart.purchase(&home, 1).unwrap();

        let line = cart.purchase_for("120P90").unwrap();
        assert_eq!(line.price.cents(), 4999);
        assert_eq!(line.qty, 2);
    }

    #[test]
    fn test_discount_requires_line() {
        let mut cart = Cart::new();
        let err = cart
            .discount(&Sku::from("NOPE"), Money::from_cents(100))
            .unwrap_err();
        assert_eq!(err, CoreError::ItemNotInCart(Sku::from("NOPE")));
    }

    #[test]
    fn test_discount_accumulates() {
        let mut cart = Cart::new();
        let sku = Sku::from("120P90");
        cart.purchase(&item("120P90", 4999), 3).unwrap();

        cart.discount(&sku, Money::from_cents(100)).unwrap();
        cart.discount(&sku, Money::from_cents(250)).unwrap();

        assert_eq!(cart.purchase_for("120P90").unwrap().discount.cents(), 350);
    }

    #[test]
    fn test_submit_computes_total() {
        let mut cart = Cart::new();
        cart.purchase(&item("A304SD", 10950), 3).unwrap();

        cart.submit().unwrap();

        assert_eq!(cart.total.cents(), 32850);
        assert_eq!(cart.status, CartStatus::Submitted);
        assert!(cart.submitted_at.is_some());
    }

    #[test]
    fn test_submit_subtracts_discounts_and_floors_lines() {
        let mut cart = Cart::new();
        cart.purchase(&item("120P90", 4999), 3).unwrap();
        cart.purchase(&item("234234", 3000), 1).unwrap();
        cart.discount(&Sku::from("120P90"), Money::from_cents(4999))
            .unwrap();
        // Over-discounted line counts as zero, not negative.
        cart.discount(&Sku::from("234234"), Money::from_cents(9000))
            .unwrap();

        cart.submit().unwrap();
        assert_eq!(cart.total.cents(), 9998);
    }

    #[test]
    fn test_submit_twice_fails() {
        let mut cart = Cart::new();
        cart.submit().unwrap();

        assert!(matches!(
            cart.submit(),
            Err(CoreError::CartNotAvailable { .. })
        ));
    }

    #[test]
    fn test_submitted_cart_rejects_purchases() {
        let mut cart = Cart::new();
        cart.submit().unwrap();

        assert!(matches!(
            cart.purchase(&item("120P90", 4999), 1),
            Err(CoreError::CartNotAvailable { .. })
        ));
    }

    #[test]
    fn test_submit_saturates_instead_of_wrapping() {
        let mut cart = Cart::new();
        cart.purchase(&item("BIG", i64::MAX / 2), 3).unwrap();
        cart.purchase(&item("MORE", 1000), 1).unwrap();

        cart.submit().unwrap();
        assert_eq!(cart.total, Money::MAX);
    }

    #[test]
    fn test_status_serializes_by_name() {
        let json = serde_json::to_string(&CartStatus::Submitted).unwrap();
        assert_eq!(json, "\"Submitted\"");
    }
}
