//! # Money Module
//!
//! Provides the `Money` type and the saturating arithmetic behind it.
//!
//! ## Why Saturating Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE WRAPAROUND PROBLEM                                                 │
//! │                                                                         │
//! │  Plain i64 math on a huge order:                                        │
//! │    (i64::MAX / 2) × 3  = -4611686018427387907  ❌ NEGATIVE TOTAL!       │
//! │                                                                         │
//! │  Saturating money math:                                                 │
//! │    (i64::MAX / 2) × 3  = i64::MAX              ✅ clamps at the bound   │
//! │                                                                         │
//! │  And for discounts bigger than the line:                                │
//! │    1000 - 5000         = 0                     ✅ never negative        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use flipshop_core::money::{self, Money};
//!
//! let price = Money::from_cents(10950); // $109.50
//! let line = price * 3;                 // saturating multiply
//! assert_eq!(line.cents(), 32850);
//!
//! assert_eq!(money::saturating_mul_qty(i64::MAX / 2, 3), i64::MAX);
//! assert_eq!(money::saturating_sub(1000, 5000), 0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Saturating Arithmetic
// =============================================================================

/// Returns `a + b`, clamping to `i64::MAX` / `i64::MIN` instead of wrapping.
#[inline]
pub const fn saturating_add(a: i64, b: i64) -> i64 {
    a.saturating_add(b)
}

/// Returns `a - b`, or zero when `b > a`.
///
/// This is a money rule, not an integer law: totals and discounts are
/// never allowed to go negative.
#[inline]
pub const fn saturating_sub(a: i64, b: i64) -> i64 {
    if b > a {
        return 0;
    }
    a - b
}

/// Returns `a × b`, clamping to `i64::MAX` on overflow.
///
/// Prices and quantities are non-negative. A product that comes out
/// negative is treated as zero; callers reject negative input before it
/// gets here.
pub const fn saturating_mul(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    if (a < 0) != (b < 0) {
        return 0;
    }
    match a.checked_mul(b) {
        Some(product) => product,
        None => i64::MAX,
    }
}

/// Multiplies an amount by an item count. Negative counts yield zero.
#[inline]
pub const fn saturating_mul_qty(amount: i64, count: i64) -> i64 {
    if count < 0 {
        return 0;
    }
    saturating_mul(amount, count)
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Item.price ──► Purchase.price (snapshot) ──► price × qty − discount
///                                                     │
///                Promotion discounts ──► Purchase.discount
///                                                     │
///                                                     ▼
///                                                Cart.total
/// ```
///
/// All operators saturate, see the free functions above.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// The largest representable amount.
    pub const MAX: Money = Money(i64::MAX);

    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use flipshop_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole currency units (dollars).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies by a quantity (saturating, negative quantity gives zero).
    ///
    /// ```rust
    /// use flipshop_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// assert_eq!(unit_price.multiply_quantity(-1).cents(), 0);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(saturating_mul_qty(self.0, qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Human-readable form for logs. Not a localized display format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().unsigned_abs(),
            self.cents_part()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(saturating_add(self.0, other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = saturating_add(self.0, other.0);
    }
}

/// Money subtraction floors at zero.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(saturating_sub(self.0, other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_clamps_both_directions() {
        assert_eq!(saturating_add(1, 2), 3);
        assert_eq!(saturating_add(i64::MAX, 1), i64::MAX);
        assert_eq!(saturating_add(i64::MAX - 5, 10), i64::MAX);
        assert_eq!(saturating_add(i64::MIN, -1), i64::MIN);
        assert_eq!(saturating_add(-10, 4), -6);
    }

    #[test]
    fn test_sub_never_negative() {
        assert_eq!(saturating_sub(1000, 250), 750);
        assert_eq!(saturating_sub(1000, 1000), 0);
        assert_eq!(saturating_sub(1000, 5000), 0);
    }

    #[test]
    fn test_mul_clamps_on_overflow() {
        assert_eq!(saturating_mul(0, i64::MAX), 0);
        assert_eq!(saturating_mul(1000, 3), 3000);
        assert_eq!(saturating_mul(i64::MAX, 2), i64::MAX);
        assert_eq!(saturating_mul(-5, 3), 0);
        assert_eq!(saturating_mul(5, -3), 0);
    }

    #[test]
    fn test_mul_qty_half_max_times_three() {
        assert_eq!(saturating_mul_qty(i64::MAX / 2, 3), i64::MAX);
        assert_eq!(saturating_mul_qty(1000, -2), 0);
        assert_eq!(saturating_mul_qty(10950, 3), 32850);
    }

    #[test]
    fn test_money_operators_saturate() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), 0);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!(Money::MAX + a, Money::MAX);

        let mut total = Money::zero();
        total += Money::MAX;
        total += a;
        assert_eq!(total, Money::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_cents(4999)).unwrap();
        assert_eq!(json, "4999");
    }
}
