//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  ₹100 discount over 3 tickets in floating point:                        │
//! │    33.333… × 3 = 99.999…, rounded per ticket = ₹99  → Lost ₹1!          │
//! │                                                                         │
//! │  OUR SOLUTION: Whole Currency Units                                     │
//! │    100 / 3 = 33 rem 1  →  [34, 33, 33]  (sum = 100, nothing lost)       │
//! │    The remainder is handed out explicitly (see allocation.rs)           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ticket prices are quoted in whole rupees, so the smallest unit here is
//! one rupee rather than one paisa.
//!
//! ## Usage
//! ```rust
//! use ticket_core::money::Money;
//!
//! let price = Money::from_units(15000);
//! let subtotal = price * 3_i64;
//! assert_eq!(subtotal.units(), 45000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never wraps silently
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as a bare number**: `{"finalPrice": 10967}`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
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

    /// Multiplies money by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Ticket class: PLUS ₹11,000
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Subtotal: ₹33,000
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns `rate` of this amount, rounded half-up to a whole unit.
    ///
    /// ## Implementation
    /// Integer math on basis points: `(amount * bps + 5000) / 10000`.
    /// The +5000 is the half-unit, so 0.5 always rounds up. Only ever
    /// called with non-negative amounts.
    ///
    /// ## Example
    /// ```rust
    /// use ticket_core::money::Money;
    /// use ticket_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_units(10000);
    /// let off = subtotal.percent_of(DiscountRate::from_percent(10));
    /// assert_eq!(off.units(), 1000);
    ///
    /// // 12.5% of 5 = 0.625 → 1
    /// let off = Money::from_units(5).percent_of(DiscountRate::from_bps(1250));
    /// assert_eq!(off.units(), 1);
    /// ```
    pub fn percent_of(&self, rate: DiscountRate) -> Money {
        // i128 keeps large subtotals from overflowing mid-calculation
        let units = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_units(units as i64)
    }

    /// Splits into `parts` as `(quotient, remainder)` using floor division.
    ///
    /// Returns `None` when `parts` is zero.
    pub fn split(&self, parts: i64) -> Option<(Money, i64)> {
        if parts == 0 {
            return None;
        }
        Some((Money(self.0.div_euclid(parts)), self.0.rem_euclid(parts)))
    }
}

// =============================================================================
// Currency Formatting
// =============================================================================

/// How digits are grouped when formatting amounts for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// Lakh/crore grouping: 1,50,00,000
    #[default]
    Indian,
    /// Thousands grouping: 150,000,000
    Western,
}

/// Display settings for amounts printed on tickets and summaries.
///
/// ## Example
/// ```rust
/// use ticket_core::money::{CurrencyFormat, DigitGrouping, Money};
///
/// let inr = CurrencyFormat::default();
/// assert_eq!(inr.format(Money::from_units(150000)), "₹1,50,000");
///
/// let usd = CurrencyFormat::new("$", DigitGrouping::Western);
/// assert_eq!(usd.format(Money::from_units(150000)), "$150,000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    pub symbol: String,
    pub grouping: DigitGrouping,
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, grouping: DigitGrouping) -> Self {
        CurrencyFormat {
            symbol: symbol.into(),
            grouping,
        }
    }

    /// Formats an amount with the symbol and digit grouping.
    pub fn format(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let digits = amount.units().unsigned_abs().to_string();
        format!("{}{}{}", sign, self.symbol, group_digits(&digits, self.grouping))
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::new("₹", DigitGrouping::Indian)
    }
}

fn group_digits(digits: &str, grouping: DigitGrouping) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let step = match grouping {
        DigitGrouping::Indian => 2,
        DigitGrouping::Western => 3,
    };

    // Chunk the head from the right so the leftmost group may be short
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the default (₹, Indian grouping) format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&CurrencyFormat::default().format(*self))
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

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
    fn test_from_units() {
        let money = Money::from_units(15000);
        assert_eq!(money.units(), 15000);
        assert!(money.is_positive());
    }

    #[test]
    fn test_display_indian_grouping() {
        assert_eq!(Money::from_units(0).to_string(), "₹0");
        assert_eq!(Money::from_units(999).to_string(), "₹999");
        assert_eq!(Money::from_units(2500).to_string(), "₹2,500");
        assert_eq!(Money::from_units(150000).to_string(), "₹1,50,000");
        assert_eq!(Money::from_units(12345678).to_string(), "₹1,23,45,678");
        assert_eq!(Money::from_units(-45000).to_string(), "-₹45,000");
    }

    #[test]
    fn test_format_western_grouping() {
        let format = CurrencyFormat::new("$", DigitGrouping::Western);
        assert_eq!(format.format(Money::from_units(1000)), "$1,000");
        assert_eq!(format.format(Money::from_units(12345678)), "$12,345,678");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((a * 3_i64).units(), 3000);
        assert_eq!(a.multiply_quantity(4).units(), 4000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.units(), 2000);
    }

    #[test]
    fn test_percent_of_rounds_half_up() {
        // 10% of 10000 = 1000 exactly
        let off = Money::from_units(10000).percent_of(DiscountRate::from_percent(10));
        assert_eq!(off.units(), 1000);

        // 15% of 15 = 2.25 → 2
        let off = Money::from_units(15).percent_of(DiscountRate::from_percent(15));
        assert_eq!(off.units(), 2);

        // 50% of 5 = 2.5 → 3 (half rounds up, not to even)
        let off = Money::from_units(5).percent_of(DiscountRate::from_percent(50));
        assert_eq!(off.units(), 3);
    }

    #[test]
    fn test_split() {
        let (base, rem) = Money::from_units(100).split(3).unwrap_or_default();
        assert_eq!(base.units(), 33);
        assert_eq!(rem, 1);

        assert!(Money::from_units(100).split(0).is_none());
    }

    /// Documents why allocation.rs hands out the remainder explicitly:
    /// naive per-ticket division loses money.
    #[test]
    fn test_division_precision_loss_documented() {
        let discount = Money::from_units(100);
        let per_ticket = Money::from_units(100 / 3);
        let reconstructed = per_ticket * 3_i64;

        assert_eq!(reconstructed.units(), 99);
        assert_eq!((discount - reconstructed).units(), 1);
    }
}
