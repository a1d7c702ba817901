//! # Pricing Engine
//!
//! One function, [`compute_pricing`], shared by the live preview and by
//! batch generation so the two can never disagree.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal        = base_price × quantity                                │
//! │  discount (raw)  = 0                      (None)                        │
//! │                  = min(amount, subtotal)  (Flat)                        │
//! │                  = subtotal × rate        (Percent, rate ≤ 100%)        │
//! │  total_discount  = round_half_up(raw)     ← rounded ONCE, here          │
//! │  final_total     = subtotal − total_discount                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;
use crate::types::{DiscountRule, PricingInput, PricingResult};

/// Computes batch totals.
///
/// Pure and side-effect free: call it on every keystroke for the preview.
///
/// ## Example
/// ```rust
/// use ticket_core::money::Money;
/// use ticket_core::pricing::compute_pricing;
/// use ticket_core::types::{DiscountRate, DiscountRule, PricingInput};
///
/// let input = PricingInput::new(
///     Money::from_units(2500),
///     4,
///     DiscountRule::Percent(DiscountRate::from_percent(10)),
/// );
/// let result = compute_pricing(&input);
/// assert_eq!(result.subtotal.units(), 10000);
/// assert_eq!(result.total_discount.units(), 1000);
/// assert_eq!(result.final_total.units(), 9000);
/// ```
pub fn compute_pricing(input: &PricingInput) -> PricingResult {
    let subtotal = input.base_price.multiply_quantity(input.quantity);
    let total_discount = discount_amount(input.rule, subtotal);

    PricingResult {
        subtotal,
        total_discount,
        final_total: subtotal - total_discount,
    }
}

/// Whole-unit discount for `rule` against `subtotal`, never above it.
fn discount_amount(rule: DiscountRule, subtotal: Money) -> Money {
    if !subtotal.is_positive() {
        return Money::zero();
    }

    let amount = match rule {
        DiscountRule::None => Money::zero(),
        DiscountRule::Flat(amount) => amount.min(subtotal),
        // DiscountRate is capped at 100%, and percent_of rounds half-up
        DiscountRule::Percent(rate) => subtotal.percent_of(rate),
    };

    amount.max(Money::zero()).min(subtotal)
}

// =============================================================================
// Unit Tests
// =============================================================================
