//! # Promotion Engine
//!
//! Promotion rules look at what a cart has purchased and react by adding
//! free items or discounts. Rules never see the cart, the items or the
//! store: everything goes through a [`PromotionDelegate`] supplied by the
//! caller that holds the active transaction.
//!
//! ## Delegate Capabilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Promotion ─► Delegate ─► Cart/Store                 │
//! │                                                                         │
//! │  Promotion::apply(&mut delegate)                                        │
//! │       │                                                                 │
//! │       ├── purchased(sku)            → Option<PurchasedItem>   (lookup)  │
//! │       │                                                                 │
//! │       ├── add_purchase(sku, qty)    → reserve stock, THEN add to cart   │
//! │       │                                                                 │
//! │       └── add_discount(sku, amount) → accumulate on existing line       │
//! │                                                                         │
//! │  Absent SKU       → silent no-op, no callback invoked                   │
//! │  Callback failure → returned at once, rest of the rule skipped          │
//! │  Rule failure     → apply_all stops, remaining rules never run          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rule Variants
//! - [`FreeItemPromotion`] - buy X, get Y free
//! - [`QtyFreePromotion`] - buy N, get one free
//! - [`PercentageDiscountPromotion`] - percentage off above a quantity

mod free_item;
mod percentage;
mod qty_free;

pub use free_item::FreeItemPromotion;
pub use percentage::PercentageDiscountPromotion;
pub use qty_free::QtyFreePromotion;

use crate::catalog;
use crate::item::Sku;
use crate::money::Money;

// =============================================================================
// Delegate Contract
// =============================================================================

/// Read view of a purchase line as a rule sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchasedItem {
    pub sku: Sku,
    pub name: String,
    pub price: Money,
    pub qty: i64,
    pub discount: Money,
}

/// Capabilities a rule may use against the cart being submitted.
///
/// Implementations run inside the caller's store transaction and must not
/// open a nested one.
pub trait PromotionDelegate {
    type Error;

    /// Looks up the cart's current line for `sku`.
    fn purchased(&self, sku: &Sku) -> Option<PurchasedItem>;

    /// Reserves `qty` units of `sku` and adds them to the cart.
    ///
    /// Stock must be reserved before the cart is touched, so an
    /// unavailable free item aborts with no partial mutation.
    fn add_purchase(&mut self, sku: &Sku, qty: i64) -> Result<(), Self::Error>;

    /// Adds `amount` to the discount of an existing line.
    fn add_discount(&mut self, sku: &Sku, amount: Money) -> Result<(), Self::Error>;
}

// =============================================================================
// Promotion
// =============================================================================

/// The closed set of promotion rules.
///
/// A new kind of promotion is a new variant here plus its `apply`.
#[derive(Debug, Clone, PartialEq)]
pub enum Promotion {
    FreeItem(FreeItemPromotion),
    BuyNGetOneFree(QtyFreePromotion),
    PercentageDiscount(PercentageDiscountPromotion),
}

impl Promotion {
    pub fn apply<D: PromotionDelegate>(&self, delegate: &mut D) -> Result<(), D::Error> {
        match self {
            Promotion::FreeItem(rule) => rule.apply(delegate),
            Promotion::BuyNGetOneFree(rule) => rule.apply(delegate),
            Promotion::PercentageDiscount(rule) => rule.apply(delegate),
        }
    }
}

impl From<FreeItemPromotion> for Promotion {
    fn from(rule: FreeItemPromotion) -> Self {
        Promotion::FreeItem(rule)
    }
}

impl From<QtyFreePromotion> for Promotion {
    fn from(rule: QtyFreePromotion) -> Self {
        Promotion::BuyNGetOneFree(rule)
    }
}

impl From<PercentageDiscountPromotion> for Promotion {
    fn from(rule: PercentageDiscountPromotion) -> Self {
        Promotion::PercentageDiscount(rule)
    }
}

/// Applies `promotions` in order, stopping at the first failure.
pub fn apply_all<'a, D, I>(promotions: I, delegate: &mut D) -> Result<(), D::Error>
where
    D: PromotionDelegate,
    I: IntoIterator<Item = &'a Promotion>,
{
    for promotion in promotions {
        promotion.apply(delegate)?;
    }
    Ok(())
}

// =============================================================================
// Promotion Set
// =============================================================================

/// The promotions in force, fixed when the application is composed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromotionSet {
    rules: Vec<Promotion>,
}

impl PromotionSet {
    pub fn new(rules: Vec<Promotion>) -> Self {
        PromotionSet { rules }
    }

    /// The shop's standard promotions.
    ///
    /// ```text
    /// MacBook Pro      → free Raspberry Pi B with each one
    /// Google Home      → buy 3, get one free
    /// Alexa Speaker    → 10% off when buying more than 3
    /// ```
    pub fn standard() -> Self {
        PromotionSet::new(vec![
            FreeItemPromotion::new(
                catalog::MACBOOK_PRO_SKU,
                catalog::RASPBERRY_PI_SKU,
                Money::from_cents(catalog::RASPBERRY_PI_PRICE),
            )
            .into(),
            QtyFreePromotion::new(catalog::GOOGLE_HOME_SKU, 3).into(),
            PercentageDiscountPromotion::new(catalog::ALEXA_SPEAKER_SKU, 3, 0.1).into(),
        ])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Promotion> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Applies every rule in order, stopping at the first failure.
    pub fn apply_all<D: PromotionDelegate>(&self, delegate: &mut D) -> Result<(), D::Error> {
        apply_all(&self.rules, delegate)
    }
}

impl<'a> IntoIterator for &'a PromotionSet {
    type Item = &'a Promotion;
    type IntoIter = std::slice::Iter<'a, Promotion>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;

    /// Records callbacks against an in-memory view of purchased lines.
    #[derive(Debug, Default)]
    pub struct RecordingDelegate {
        pub lines: HashMap<Sku, PurchasedItem>,
        pub purchases: Vec<(Sku, i64)>,
        pub discounts: Vec<(Sku, Money)>,
        /// SKUs whose `add_purchase` fails.
        pub out_of_stock: Vec<Sku>,
    }

    impl RecordingDelegate {
        pub fn with_line(mut self, sku: &str, price: i64, qty: i64) -> Self {
            let sku = Sku::from(sku);
            self.lines.insert(
                sku.clone(),
                PurchasedItem {
                    sku,
                    name: "TEST".to_string(),
                    price: Money::from_cents(price),
                    qty,
                    discount: Money::zero(),
                },
            );
            self
        }

        pub fn total_discount(&self) -> i64 {
            self.discounts.iter().map(|(_, d)| d.cents()).sum()
        }
    }

    impl PromotionDelegate for RecordingDelegate {
        type Error = String;

        fn purchased(&self, sku: &Sku) -> Option<PurchasedItem> {
            self.lines.get(sku).cloned()
        }

        fn add_purchase(&mut self, sku: &Sku, qty: i64) -> Result<(), String> {
            if self.out_of_stock.contains(sku) {
                return Err(format!("{} out of stock", sku));
            }
            self.purchases.push((sku.clone(), qty));
            Ok(())
        }

        fn add_discount(&mut self, sku: &Sku, amount: Money) -> Result<(), String> {
            self.discounts.push((sku.clone(), amount));
            Ok(())
        }
    }
}
