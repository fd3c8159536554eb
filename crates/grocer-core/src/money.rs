//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    4.5 - 4.5 × 0.07 = 4.18499999999999...  ❌ rounds to 4.18           │
//! │                                                                         │
//! │  Integer cents don't help either:                                       │
//! │    450 × 7% = 31.5 cents  → sub-cent value, must not be rounded yet    │
//! │                                                                         │
//! │  OUR SOLUTION: Exact base-10 decimals                                   │
//! │    4.5 - 0.315 = 4.185 exactly, rounded ONCE at the end → 4.19         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocer_core::money::Money;
//!
//! let price = Money::from_cents(150); // 1.50
//! let line = price * 3;               // 4.50
//! assert_eq!(line, Money::from_cents(450));
//! assert_eq!(line.to_string(), "4.50");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::DiscountRate;

/// Decimal places of the single implicit currency unit.
pub const CURRENCY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the single implicit currency unit.
///
/// ## Design Decisions
/// - **Decimal**: exact for every value the discount rules can produce
/// - **Unrounded**: intermediate values keep full precision; only
///   [`Money::round_to_cents`] drops digits
/// - **Signed**: a net line value can go below zero when a pack rebate
///   exceeds the price of the pack
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  unit price ──► line gross ──► − discount ──► line net ──┐              │
/// │                                                          │              │
/// │                           Σ line nets ◄──────────────────┘              │
/// │                                │                                        │
/// │                                ▼                                        │
/// │                      round_to_cents() ──► OrderSummary.total            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, CURRENCY_DECIMALS))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies money by a count of discrete units.
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Multiplies by a unit count, or `None` if the product does not fit.
    #[inline]
    pub fn checked_mul_quantity(&self, qty: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Scales money by an arbitrary decimal factor. No rounding.
    #[inline]
    pub fn scale(&self, factor: Decimal) -> Self {
        Money(self.0 * factor)
    }

    /// Scales by `factor`, or `None` if the product does not fit.
    #[inline]
    pub fn checked_scale(&self, factor: Decimal) -> Option<Self> {
        self.0.checked_mul(factor).map(Money)
    }

    /// Adds, or `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Sums `values`, or `None` as soon as the running total overflows.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(values: I) -> Option<Self> {
        values
            .into_iter()
            .try_fold(Money::zero(), |total, value| total.checked_add(value))
    }

    /// Returns `rate` of this amount. No rounding.
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::money::Money;
    /// use grocer_core::types::DiscountRate;
    ///
    /// let gross = Money::from_cents(450);
    /// let discount = gross.apply_rate(DiscountRate::from_bps(700)); // 7%
    /// assert_eq!(discount.amount().to_string(), "0.315");
    /// ```
    pub fn apply_rate(&self, rate: DiscountRate) -> Money {
        Money(self.0 * rate.as_fraction())
    }

    /// Allocates this amount proportionally: `self × part / whole`.
    ///
    /// Returns zero when `whole` is zero, so an empty pool never divides.
    /// When `self × part` does not fit, the share `part / whole` is taken
    /// first; with `part ≤ whole` the result never exceeds `self`.
    pub fn prorate(&self, part: Money, whole: Money) -> Money {
        if whole.is_zero() {
            return Money::zero();
        }
        match self.0.checked_mul(part.0) {
            Some(product) => Money(product / whole.0),
            None => Money(self.0 * (part.0 / whole.0)),
        }
    }

    /// Rounds to whole cents, half up.
    ///
    /// Equivalent to "multiply by 100, round to the nearest integer with
    /// halves going up, divide by 100": `4.185 → 4.19`, `-0.125 → -0.12`.
    pub fn round_to_cents(&self) -> Money {
        let strategy = if self.0.is_sign_negative() {
            RoundingStrategy::MidpointTowardZero
        } else {
            RoundingStrategy::MidpointAwayFromZero
        };
        Money(self.0.round_dp_with_strategy(CURRENCY_DECIMALS, strategy))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount rounded to cents, always with two decimals.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self.round_to_cents().0;
        rounded.rescale(CURRENCY_DECIMALS);
        write!(f, "{}", rounded)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a unit count.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), dec!(10.99));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::new(dec!(5))), "5.00");
        assert_eq!(format!("{}", Money::new(dec!(-5.5))), "-5.50");
        assert_eq!(format!("{}", Money::zero()), "0.00");
        assert_eq!(format!("{}", Money::new(dec!(4.185))), "4.19");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(10));
        let b = Money::new(dec!(2.5));

        assert_eq!((a + b).amount(), dec!(12.5));
        assert_eq!((a - b).amount(), dec!(7.5));
        assert_eq!((b * 3).amount(), dec!(7.5));

        let mut c = a;
        c += b;
        c -= Money::new(dec!(0.5));
        assert_eq!(c.amount(), dec!(12));
    }

    #[test]
    fn test_sum() {
        let values = vec![Money::new(dec!(27)), Money::new(dec!(10)), Money::new(dec!(4.185))];
        let by_ref: Money = values.iter().sum();
        let by_value: Money = values.into_iter().sum();
        assert_eq!(by_ref, by_value);
        assert_eq!(by_value.amount(), dec!(41.185));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(Money::new(dec!(4.185)).round_to_cents().amount(), dec!(4.19));
        assert_eq!(Money::new(dec!(4.184)).round_to_cents().amount(), dec!(4.18));
        assert_eq!(Money::new(dec!(0.125)).round_to_cents().amount(), dec!(0.13));
        assert_eq!(Money::new(dec!(41.185)).round_to_cents().amount(), dec!(41.19));
        assert_eq!(Money::new(dec!(27)).round_to_cents().amount(), dec!(27));
    }

    #[test]
    fn test_round_half_up_for_negative_values() {
        // Halves move toward positive infinity, as in `floor(x * 100 + 0.5) / 100`.
        assert_eq!(Money::new(dec!(-0.125)).round_to_cents().amount(), dec!(-0.12));
        assert_eq!(Money::new(dec!(-0.126)).round_to_cents().amount(), dec!(-0.13));
    }

    #[test]
    fn test_apply_rate_keeps_sub_cent_precision() {
        let gross = Money::new(dec!(4.5));
        assert_eq!(gross.apply_rate(DiscountRate::from_bps(700)).amount(), dec!(0.315));
        assert!(gross.apply_rate(DiscountRate::zero()).is_zero());
    }

    #[test]
    fn test_prorate() {
        let pool = Money::new(dec!(0.7));
        let share = pool.prorate(Money::new(dec!(4.5)), Money::new(dec!(7)));
        assert_eq!(share.amount(), dec!(0.45));
    }

    #[test]
    fn test_prorate_large_amounts_does_not_overflow() {
        // pool × part alone is far past Decimal::MAX
        let part = Money::new(dec!(40000000000000000));
        let whole = Money::new(dec!(80000000000000000));
        let pool = Money::new(dec!(8000000000000000));
        let share = pool.prorate(part, whole);
        assert_eq!(share.amount(), dec!(4000000000000000));
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::new(Decimal::MAX);
        assert!(max.checked_mul_quantity(2).is_none());
        assert!(max.checked_add(Money::from_cents(100)).is_none());
        assert!(max.checked_scale(dec!(10)).is_none());
        assert_eq!(
            Money::from_cents(150).checked_mul_quantity(3),
            Some(Money::from_cents(450))
        );
        assert_eq!(
            Money::checked_sum(vec![Money::from_cents(100), Money::from_cents(250)]),
            Some(Money::from_cents(350))
        );
        assert!(Money::checked_sum(vec![max, max]).is_none());
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));
    }

    #[test]
    fn test_prorate_with_zero_whole_is_zero() {
        let pool = Money::new(dec!(1));
        assert!(pool.prorate(Money::zero(), Money::zero()).is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert!(!negative.is_positive());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Money::new(dec!(4.185))).unwrap();
        assert_eq!(json, "\"4.185\"");
    }
}
