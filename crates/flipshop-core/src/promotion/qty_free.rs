//! Buy N, get one free.

use crate::item::Sku;

use super::PromotionDelegate;

/// Every `threshold_qty` units of `sku` purchased makes one unit free.
///
/// ```text
/// threshold 3, qty 7  →  free = 7 ÷ 3 = 2  →  discount = price × 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QtyFreePromotion {
    pub sku: Sku,
    pub threshold_qty: i64,
}

impl QtyFreePromotion {
    pub fn new(sku: impl Into<Sku>, threshold_qty: i64) -> Self {
        QtyFreePromotion {
            sku: sku.into(),
            threshold_qty,
        }
    }

    pub fn apply<D: PromotionDelegate>(&self, delegate: &mut D) -> Result<(), D::Error> {
        let Some(line) = delegate.purchased(&self.sku) else {
            return Ok(());
        };

        if self.threshold_qty <= 0 || line.qty < self.threshold_qty {
            return Ok(());
        }

        let free_count = line.qty / self.threshold_qty;
        let discount = line.price.multiply_quantity(free_count);
        if discount.is_zero() {
            return Ok(());
        }

        delegate.add_discount(&self.sku, discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promotion::testing::RecordingDelegate;

    fn discount_for(threshold: i64, qty: i64) -> i64 {
        let mut delegate = RecordingDelegate::default().with_line("TEST", 1000, qty);
        QtyFreePromotion::new("TEST", threshold)
            .apply(&mut delegate)
            .unwrap();
        delegate.total_discount()
    }

    #[test]
    fn test_free_units_per_threshold() {
        assert_eq!(discount_for(2, 2), 1000);
        assert_eq!(discount_for(2, 4), 2000);
        assert_eq!(discount_for(2, 5), 2000);
    }

    #[test]
    fn test_below_threshold_no_callback() {
        let mut delegate = RecordingDelegate::default().with_line("TEST", 1000, 3);
        QtyFreePromotion::new("TEST", 4)
            .apply(&mut delegate)
            .unwrap();

        assert!(delegate.discounts.is_empty());
    }

    #[test]
    fn test_zero_threshold_is_ignored() {
        assert_eq!(discount_for(0, 10), 0);
    }
}
