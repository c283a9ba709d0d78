//! # Money Module
//!
//! Provides the `Money` type for landed-cost totals in local currency.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Itemized costs (f64, three currencies)                                 │
//! │       │                                                                 │
//! │       ▼  convert with exchange rates, sum everything                   │
//! │  Exact local total (f64)                                                │
//! │       │                                                                 │
//! │       ▼  Money::round_from() ← the ONLY rounding step                  │
//! │  Money (i64 whole units)                                                │
//! │                                                                         │
//! │  Category subtotals stay f64 and are rounded for display only.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use carimport_core::money::Money;
//!
//! let total = Money::round_from(612_999.5);
//! assert_eq!(total.units(), 613_000);
//! assert_eq!(total.to_string(), "৳613,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

/// Symbol used when formatting local currency.
pub const CURRENCY_SYMBOL: &str = "৳";

// =============================================================================
// Money Type
// =============================================================================

/// A whole-unit amount of local currency.
///
/// ## Design Decisions
/// - **i64 (signed)**: profit/loss can be negative
/// - **Whole units**: totals are rounded to the nearest unit, no minor units
/// - **Newtype serde**: stored as a plain JSON integer (`"totalCost": 613000`)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Rounds an exact amount to the nearest whole unit.
    ///
    /// Halves round away from zero (`612_999.5 → 613_000`). Non-finite input
    /// yields zero; amounts outside the `i64` range clamp to its bounds.
    ///
    /// ## Example
    /// ```rust
    /// use carimport_core::money::Money;
    ///
    /// assert_eq!(Money::round_from(10.4).units(), 10);
    /// assert_eq!(Money::round_from(10.5).units(), 11);
    /// assert_eq!(Money::round_from(-2.5).units(), -3);
    /// assert_eq!(Money::round_from(f64::NAN).units(), 0);
    /// ```
    pub fn round_from(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money(amount.round() as i64)
    }

    /// Returns the value in whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns the value as f64 for mixing with itemized amounts.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a multiplicative markup and rounds the result.
    ///
    /// ```rust
    /// use carimport_core::money::Money;
    ///
    /// let cost = Money::from_units(613_000);
    /// assert_eq!(cost.with_markup(1.2).units(), 735_600);
    /// ```
    pub fn with_markup(&self, factor: f64) -> Money {
        Money::round_from(self.as_f64() * factor)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats with the currency symbol and comma thousands separators.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}",
            sign,
            CURRENCY_SYMBOL,
            group_thousands(self.0.unsigned_abs())
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Saturates at the `i64` bounds.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
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

    #[test]
    fn test_round_from() {
        assert_eq!(Money::round_from(613_000.0).units(), 613_000);
        assert_eq!(Money::round_from(0.49).units(), 0);
        assert_eq!(Money::round_from(0.5).units(), 1);
        assert_eq!(Money::round_from(f64::INFINITY).units(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(0).to_string(), "৳0");
        assert_eq!(Money::from_units(999).to_string(), "৳999");
        assert_eq!(Money::from_units(1000).to_string(), "৳1,000");
        assert_eq!(Money::from_units(613_000).to_string(), "৳613,000");
        assert_eq!(Money::from_units(1_234_567).to_string(), "৳1,234,567");
        assert_eq!(Money::from_units(-50_000).to_string(), "-৳50,000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(400);

        assert_eq!((a + b).units(), 1400);
        assert_eq!((b - a).units(), -600);

        let mut c = a;
        c += b;
        assert_eq!(c.units(), 1400);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::round_from(1e19);
        assert_eq!(huge.units(), i64::MAX);

        assert_eq!((huge + huge).units(), i64::MAX);
        assert_eq!((Money::from_units(i64::MIN) - huge).units(), i64::MIN);

        let mut acc = huge;
        acc += Money::from_units(1);
        assert_eq!(acc.units(), i64::MAX);

        let total: Money = [huge, huge, Money::from_units(5)].iter().sum();
        assert_eq!(total.units(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_units(1), Money::from_units(2), Money::from_units(3)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.units(), 6);

        let empty: Vec<Money> = Vec::new();
        assert!(empty.into_iter().sum::<Money>().is_zero());
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Money::from_units(613_000)).unwrap();
        assert_eq!(json, "613000");

        let parsed: Money = serde_json::from_str("42").unwrap();
        assert_eq!(parsed.units(), 42);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_units(5).is_positive());
        assert!(Money::from_units(-5).is_negative());
    }
}
