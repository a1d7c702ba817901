//! # Batch Assembler
//!
//! Combines pricing, allocation and identity into the ordered list of
//! ticket records handed to the renderer.
//!
//! ## Generation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BatchRequest                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_pricing()  ── once ──►  PricingResult                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  allocate()         ── once ──►  [34, 33, 33]                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  for i in 0..quantity:                                                  │
//! │      clock.now() → ids.next_id(i) → build_payload() → TicketRecord      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Batch (immutable, replaces any previous batch wholesale)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::allocation::allocate;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::identity::{build_payload, Clock, IdGenerator};
use crate::money::{CurrencyFormat, Money};
use crate::pricing::compute_pricing;
use crate::types::{
    DiscountRule, EventProfile, PricingInput, PricingResult, TicketClass, TicketRecord,
};
use crate::MAX_BATCH_QUANTITY;

// =============================================================================
// Request
// =============================================================================

/// Everything needed to generate one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub input: PricingInput,
    pub ticket_class: TicketClass,
    pub event: EventProfile,
    /// Used for the human-readable discount label.
    pub currency: CurrencyFormat,
}

impl BatchRequest {
    pub fn new(input: PricingInput, ticket_class: TicketClass, event: EventProfile) -> Self {
        BatchRequest {
            input,
            ticket_class,
            event,
            currency: CurrencyFormat::default(),
        }
    }

    pub fn with_currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }
}

// =============================================================================
// Batch
// =============================================================================

/// The tickets from one generation request plus the totals that funded
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    ticket_class: TicketClass,
    rule: DiscountRule,
    pricing: PricingResult,
    tickets: Vec<TicketRecord>,
}

impl Batch {
    pub fn tickets(&self) -> &[TicketRecord] {
        &self.tickets
    }

    pub fn pricing(&self) -> &PricingResult {
        &self.pricing
    }

    pub fn ticket_class(&self) -> TicketClass {
        self.ticket_class
    }

    pub fn rule(&self) -> DiscountRule {
        self.rule
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Generates a batch of ticket records.
///
/// ## Errors
/// - `ValidationError::MustBePositive` for a base price below 1
/// - `CoreError::EmptyAllocation` for a quantity below 1
/// - `CoreError::QuantityTooLarge` above MAX_BATCH_QUANTITY
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use rand::{rngs::StdRng, SeedableRng};
/// use ticket_core::identity::{FixedClock, LegacyIdGenerator};
/// use ticket_core::{generate_batch, BatchRequest, DiscountRule, EventProfile, Money, PricingInput, TicketClass};
///
/// let input = PricingInput::new(Money::from_units(11000), 3, DiscountRule::flat(Money::from_units(100)));
/// let request = BatchRequest::new(input, TicketClass::Plus, EventProfile::default());
/// let mut ids = LegacyIdGenerator::new(StdRng::seed_from_u64(1));
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap());
///
/// let batch = generate_batch(&request, &mut ids, &clock).unwrap();
/// let discounts: Vec<i64> = batch.tickets().iter().map(|t| t.per_ticket_discount().units()).collect();
/// assert_eq!(discounts, vec![34, 33, 33]);
/// ```
pub fn generate_batch<I, C>(request: &BatchRequest, ids: &mut I, clock: &C) -> CoreResult<Batch>
where
    I: IdGenerator + ?Sized,
    C: Clock + ?Sized,
{
    let input = &request.input;

    if !input.base_price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "base price".to_string(),
        }
        .into());
    }
    if input.quantity > MAX_BATCH_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: input.quantity,
            max: MAX_BATCH_QUANTITY,
        });
    }

    let pricing = compute_pricing(input);
    let shares = allocate(pricing.total_discount, input.quantity)?;
    let quantity = shares.len();

    let tickets = shares
        .into_iter()
        .enumerate()
        .map(|(index, per_ticket_discount)| {
            let issued_at = clock.now();
            let ticket_id = ids.next_id(index, issued_at);
            let final_price = input.base_price - per_ticket_discount;

            TicketRecord {
                sequence_index: index,
                serial_label: format!("{}/{}", index + 1, quantity),
                verification_payload: build_payload(
                    &request.event.code,
                    request.ticket_class,
                    &ticket_id,
                    final_price,
                    issued_at,
                ),
                ticket_id,
                base_price: input.base_price,
                per_ticket_discount,
                final_price,
                discount_label: discount_label(
                    input.rule,
                    pricing.total_discount,
                    per_ticket_discount,
                    &request.currency,
                ),
                issued_at,
                ticket_class: request.ticket_class,
                event_label: request.event.name.clone(),
            }
        })
        .collect();

    debug!(
        class = %request.ticket_class,
        quantity,
        subtotal = pricing.subtotal.units(),
        total_discount = pricing.total_discount.units(),
        final_total = pricing.final_total.units(),
        "Batch generated"
    );

    Ok(Batch {
        ticket_class: request.ticket_class,
        rule: input.rule,
        pricing,
        tickets,
    })
}

/// Label printed next to a ticket's discount.
///
/// Describes the batch-level rule and this ticket's own share; it is never
/// recomputed from the ticket alone.
pub fn discount_label(
    rule: DiscountRule,
    total_discount: Money,
    ticket_discount: Money,
    currency: &CurrencyFormat,
) -> String {
    if total_discount.is_zero() {
        return "No discount".to_string();
    }

    match rule {
        DiscountRule::None => "No discount".to_string(),
        DiscountRule::Flat(_) => format!(
            "Flat {} total · you save {}",
            currency.format(total_discount),
            currency.format(ticket_discount)
        ),
        DiscountRule::Percent(rate) => format!(
            "{}% total · you save {}",
            rate,
            currency.format(ticket_discount)
        ),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{FixedClock, LegacyIdGenerator, VerificationPayload};
    use crate::types::DiscountRate;
    use chrono::{TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn generate(base: i64, qty: i64, rule: DiscountRule, class: TicketClass) -> Batch {
        let input = PricingInput::new(Money::from_units(base), qty, rule);
        let request = BatchRequest::new(input, class, EventProfile::default());
        let mut ids = LegacyIdGenerator::new(StdRng::seed_from_u64(99));
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap());
        generate_batch(&request, &mut ids, &clock).unwrap()
    }

    fn discounts(batch: &Batch) -> Vec<i64> {
        batch
            .tickets()
            .iter()
            .map(|t| t.per_ticket_discount().units())
            .collect()
    }

    #[test]
    fn test_no_discount_batch() {
        let batch = generate(15000, 3, DiscountRule::None, TicketClass::Prime);

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.pricing().subtotal.units(), 45000);
        assert_eq!(batch.pricing().final_total.units(), 45000);
        for ticket in batch.tickets() {
            assert_eq!(ticket.final_price().units(), 15000);
            assert_eq!(ticket.discount_label(), "No discount");
        }
    }

    #[test]
    fn test_flat_discount_batch() {
        let batch = generate(
            11000,
            3,
            DiscountRule::flat(Money::from_units(100)),
            TicketClass::Plus,
        );

        assert_eq!(discounts(&batch), vec![34, 33, 33]);
        let finals: Vec<i64> = batch.tickets().iter().map(|t| t.final_price().units()).collect();
        assert_eq!(finals, vec![10966, 10967, 10967]);
        assert_eq!(
            batch.tickets()[0].discount_label(),
            "Flat ₹100 total · you save ₹34"
        );
        assert_eq!(
            batch.tickets()[2].discount_label(),
            "Flat ₹100 total · you save ₹33"
        );
    }

    #[test]
    fn test_percent_discount_batch() {
        let batch = generate(
            2500,
            4,
            DiscountRule::Percent(DiscountRate::from_percent(10)),
            TicketClass::Econo,
        );

        assert_eq!(batch.pricing().total_discount.units(), 1000);
        assert_eq!(discounts(&batch), vec![250, 250, 250, 250]);
        assert_eq!(
            batch.tickets()[0].discount_label(),
            "10% total · you save ₹250"
        );
    }

    #[test]
    fn test_flat_discount_capped_batch() {
        let batch = generate(
            15000,
            1,
            DiscountRule::flat(Money::from_units(999_999)),
            TicketClass::Prime,
        );

        assert_eq!(batch.pricing().total_discount.units(), 15000);
        assert!(batch.tickets()[0].final_price().is_zero());
        assert_eq!(
            batch.tickets()[0].discount_label(),
            "Flat ₹15,000 total · you save ₹15,000"
        );
    }

    #[test]
    fn test_zero_total_with_rule_reads_no_discount() {
        let batch = generate(2500, 2, DiscountRule::flat(Money::zero()), TicketClass::Econo);
        assert_eq!(batch.tickets()[0].discount_label(), "No discount");
    }

    #[test]
    fn test_serials_and_indices() {
        let batch = generate(2500, 4, DiscountRule::None, TicketClass::Econo);
        let serials: Vec<&str> = batch.tickets().iter().map(|t| t.serial_label()).collect();
        assert_eq!(serials, vec!["1/4", "2/4", "3/4", "4/4"]);

        for (i, ticket) in batch.tickets().iter().enumerate() {
            assert_eq!(ticket.sequence_index(), i);
            assert_eq!(ticket.event_label(), "XYZ CONFERENCE");
            assert_eq!(ticket.ticket_class(), TicketClass::Econo);
        }
    }

    #[test]
    fn test_ticket_ids_unique() {
        let batch = generate(2500, 200, DiscountRule::None, TicketClass::Econo);
        let ids: HashSet<_> = batch.tickets().iter().map(|t| t.ticket_id().clone()).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_payload_matches_record() {
        let batch = generate(
            11000,
            2,
            DiscountRule::flat(Money::from_units(101)),
            TicketClass::Plus,
        );

        for ticket in batch.tickets() {
            let payload: VerificationPayload = ticket.verification_payload().parse().unwrap();
            assert_eq!(payload.event_code, "XYZ");
            assert_eq!(payload.ticket_class, TicketClass::Plus);
            assert_eq!(&payload.ticket_id, ticket.ticket_id());
            assert_eq!(payload.final_price, ticket.final_price());
            assert_eq!(payload.issued_at, ticket.issued_at());
        }
    }

    #[test]
    fn test_discounts_reconcile() {
        let batch = generate(
            11000,
            7,
            DiscountRule::Percent(DiscountRate::from_bps(1250)),
            TicketClass::Plus,
        );

        let total: Money = batch.tickets().iter().map(|t| t.per_ticket_discount()).sum();
        assert_eq!(total, batch.pricing().total_discount);

        let finals: Money = batch.tickets().iter().map(|t| t.final_price()).sum();
        assert_eq!(finals, batch.pricing().final_total);
    }

    #[test]
    fn test_rejects_bad_requests() {
        let mut ids = LegacyIdGenerator::new(StdRng::seed_from_u64(1));
        let clock = FixedClock::new(Utc::now());

        let zero_qty = BatchRequest::new(
            PricingInput::new(Money::from_units(100), 0, DiscountRule::None),
            TicketClass::Econo,
            EventProfile::default(),
        );
        assert!(matches!(
            generate_batch(&zero_qty, &mut ids, &clock),
            Err(CoreError::EmptyAllocation)
        ));

        let free = BatchRequest::new(
            PricingInput::new(Money::zero(), 1, DiscountRule::None),
            TicketClass::Econo,
            EventProfile::default(),
        );
        assert!(matches!(
            generate_batch(&free, &mut ids, &clock),
            Err(CoreError::Validation(_))
        ));

        let huge = BatchRequest::new(
            PricingInput::new(Money::from_units(100), 501, DiscountRule::None),
            TicketClass::Econo,
            EventProfile::default(),
        );
        assert!(matches!(
            generate_batch(&huge, &mut ids, &clock),
            Err(CoreError::QuantityTooLarge { .. })
        ));
    }

    #[test]
    fn test_serializes_camel_case() {
        let batch = generate(2500, 1, DiscountRule::None, TicketClass::Econo);
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["tickets"][0]["serialLabel"], "1/1");
        assert_eq!(json["tickets"][0]["finalPrice"], 2500);
        assert_eq!(json["pricing"]["finalTotal"], 2500);
        assert_eq!(json["ticketClass"], "ECONO");
    }
}
