//! # Discount Allocator
//!
//! Splits a batch-level discount across tickets with zero leakage.
//!
//! ```text
//! total = 100, quantity = 3
//!
//!   base      = 100 / 3 = 33
//!   remainder = 100 % 3 = 1   → the first 1 ticket gets +1
//!
//!   index:     0    1    2
//!   discount: 34   33   33    Σ = 100 ✓
//! ```
//!
//! The batch total is rounded once by the pricing engine before it gets
//! here. Rounding each ticket's share on its own would break the exact sum.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Allocates `total_discount` over `quantity` tickets.
///
/// ## Guarantees
/// - `result.len() == quantity`
/// - `Σ result == total_discount`
/// - every element is `base` or `base + 1`, extras going to the lowest
///   indices first
/// - no randomness: identical inputs give identical output
///
/// ## Errors
/// - [`CoreError::EmptyAllocation`] when `quantity < 1`
/// - [`CoreError::NegativeDiscount`] when `total_discount < 0`
///
/// ## Example
/// ```rust
/// use ticket_core::allocation::allocate;
/// use ticket_core::money::Money;
///
/// let shares = allocate(Money::from_units(100), 3).unwrap();
/// let units: Vec<i64> = shares.iter().map(|m| m.units()).collect();
/// assert_eq!(units, vec![34, 33, 33]);
/// ```
pub fn allocate(total_discount: Money, quantity: i64) -> CoreResult<Vec<Money>> {
    if quantity < 1 {
        return Err(CoreError::EmptyAllocation);
    }
    if total_discount.is_negative() {
        return Err(CoreError::NegativeDiscount(total_discount.units()));
    }

    let (base, remainder) = total_discount
        .split(quantity)
        .ok_or(CoreError::EmptyAllocation)?;
    let extra = Money::from_units(1);

    Ok((0..quantity)
        .map(|index| if index < remainder { base + extra } else { base })
        .collect())
}

// =============================================================================
// Unit Tests
// =============================================================================
