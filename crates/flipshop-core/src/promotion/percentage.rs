//! Percentage off above a purchased quantity.

use crate::item::Sku;
use crate::money::{self, Money};

use super::PromotionDelegate;

/// Buying more than `threshold_qty` units of `sku` takes `percentage` off
/// the line.
///
/// ## Truncation
/// ```text
/// price 10950 × qty 3 = 32850 cents
///   ÷ 100            = 328       whole currency units (cents dropped)
///   × 0.10 × 100     = 3280      truncated, NOT rounded to 3285
/// ```
/// The math runs in `f32` and truncates back to cents. Sub-unit precision
/// is lost for totals that are not a multiple of 100; callers and stored
/// carts depend on exactly these values.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentageDiscountPromotion {
    pub sku: Sku,
    pub threshold_qty: i64,
    /// Fraction in `[0, 1]`; values outside are clamped.
    pub percentage: f32,
}

impl PercentageDiscountPromotion {
    pub fn new(sku: impl Into<Sku>, threshold_qty: i64, percentage: f32) -> Self {
        PercentageDiscountPromotion {
            sku: sku.into(),
            threshold_qty,
            percentage,
        }
    }

    /// Discount for `qty` units at `price`, zero at or below the threshold.
    pub fn discount_for(&self, price: Money, qty: i64) -> Money {
        if qty <= self.threshold_qty {
            return Money::zero();
        }

        let whole_units = money::saturating_mul_qty(price.cents(), qty) / 100;
        let pct = self.percentage.clamp(0.0, 1.0);

        Money::from_cents(((whole_units as f32 * pct) * 100.0) as i64)
    }

    pub fn apply<D: PromotionDelegate>(&self, delegate: &mut D) -> Result<(), D::Error> {
        let Some(line) = delegate.purchased(&self.sku) else {
            return Ok(());
        };

        let discount = self.discount_for(line.price, line.qty);
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

    fn discount_for(threshold: i64, pct: f32, price: i64, qty: i64) -> i64 {
        let mut delegate = RecordingDelegate::default().with_line("SKU", price, qty);
        PercentageDiscountPromotion::new("SKU", threshold, pct)
            .apply(&mut delegate)
            .unwrap();
        delegate.total_discount()
    }

    #[test]
    fn test_half_off_above_threshold() {
        assert_eq!(discount_for(1, 0.5, 1000, 2), 1000);
        assert_eq!(discount_for(2, 0.5, 1000, 4), 2000);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(discount_for(4, 0.5, 1000, 4), 0);
    }

    #[test]
    fn test_truncates_instead_of_rounding() {
        assert_eq!(discount_for(1, 0.10, 10950, 3), 3280);
    }

    #[test]
    fn test_percentage_is_clamped() {
        assert_eq!(discount_for(0, 1.5, 1000, 2), 2000);
        assert_eq!(discount_for(0, -0.5, 1000, 2), 0);
    }
}
