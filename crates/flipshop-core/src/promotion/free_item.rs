//! Buy one item, get another one free.

use crate::item::Sku;
use crate::money::Money;

use super::PromotionDelegate;

/// Purchasing `trigger_sku` adds the same quantity of `free_sku` to the
/// cart and discounts it entirely.
///
/// ```text
/// cart: 2 × MacBook Pro
///   add_purchase(Raspberry Pi, 2)          ← reserves stock first
///   add_discount(Raspberry Pi, 3000 × 2)   ← line cost offset to zero
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeItemPromotion {
    pub trigger_sku: Sku,
    pub free_sku: Sku,
    /// Unit price of the free item, used for the offsetting discount.
    pub free_price: Money,
}

impl FreeItemPromotion {
    pub fn new(trigger_sku: impl Into<Sku>, free_sku: impl Into<Sku>, free_price: Money) -> Self {
        FreeItemPromotion {
            trigger_sku: trigger_sku.into(),
            free_sku: free_sku.into(),
            free_price,
        }
    }

    pub fn apply<D: PromotionDelegate>(&self, delegate: &mut D) -> Result<(), D::Error> {
        let Some(trigger) = delegate.purchased(&self.trigger_sku) else {
            return Ok(());
        };

        delegate.add_purchase(&self.free_sku, trigger.qty)?;
        delegate.add_discount(&self.free_sku, self.free_price.multiply_quantity(trigger.qty))
    }
}
