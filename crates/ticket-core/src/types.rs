//! # Domain Types
//!
//! Core domain types used throughout Ticket Desk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  PricingInput   │   │  PricingResult  │   │  TicketRecord   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  base_price     │──►│  subtotal       │──►│  ticket_id      │       │
//! │  │  quantity       │   │  total_discount │   │  serial "i/N"   │       │
//! │  │  rule           │   │  final_total    │   │  final_price    │       │
//! │  └─────────────────┘   └─────────────────┘   │  payload        │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountRule   │   │  DiscountRate   │   │  TicketClass    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  None           │   │  bps (u32)      │   │  PRIME ₹15,000  │       │
//! │  │  Flat(Money)    │   │  1000 = 10%     │   │  PLUS  ₹11,000  │       │
//! │  │  Percent(Rate)  │   └─────────────────┘   │  ECONO  ₹2,500  │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Percentage discount represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%, so a 12.5% festival discount is exactly 1250 bps
/// and the pricing engine never touches floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// 100% in basis points.
    pub const MAX_BPS: u32 = 10_000;

    /// Creates a rate from basis points, capped at 100%.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > Self::MAX_BPS {
            DiscountRate(Self::MAX_BPS)
        } else {
            DiscountRate(bps)
        }
    }

    /// Creates a rate from a whole percentage, capped at 100%.
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        Self::from_bps(percent.saturating_mul(100))
    }

    /// Creates a rate from an operator-entered percentage.
    ///
    /// Negative and non-finite values become 0%, anything above 100
    /// becomes 100%.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return DiscountRate(0);
        }
        let bps = (pct.min(100.0) * 100.0).round() as u32;
        Self::from_bps(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Displays the percentage without trailing zeros: `10`, `12.5`, `33.33`.
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        match frac {
            0 => write!(f, "{}", whole),
            f10 if f10 % 10 == 0 => write!(f, "{}.{}", whole, f10 / 10),
            _ => write!(f, "{}.{:02}", whole, frac),
        }
    }
}

// =============================================================================
// Discount Rule
// =============================================================================

/// Discount applied to a whole batch.
///
/// Values are clamped on construction, so a rule can never carry a
/// negative amount or a rate above 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DiscountRule {
    /// No discount.
    #[default]
    None,
    /// Fixed amount off the batch subtotal.
    Flat(Money),
    /// Percentage off the batch subtotal.
    Percent(DiscountRate),
}

impl DiscountRule {
    /// Flat discount; negative amounts become zero.
    pub fn flat(amount: Money) -> Self {
        if amount.is_negative() {
            DiscountRule::Flat(Money::zero())
        } else {
            DiscountRule::Flat(amount)
        }
    }

    /// Percentage discount.
    pub fn percent(rate: DiscountRate) -> Self {
        DiscountRule::Percent(rate)
    }

    /// Which of the three discount kinds this rule is.
    pub fn kind(&self) -> DiscountKind {
        match self {
            DiscountRule::None => DiscountKind::None,
            DiscountRule::Flat(_) => DiscountKind::Flat,
            DiscountRule::Percent(_) => DiscountKind::Percent,
        }
    }
}

/// Discount type as chosen on the counter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    #[default]
    None,
    Flat,
    Percent,
}

impl DiscountKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DiscountKind::None => "none",
            DiscountKind::Flat => "flat",
            DiscountKind::Percent => "percent",
        }
    }
}

impl FromStr for DiscountKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(DiscountKind::None),
            "flat" => Ok(DiscountKind::Flat),
            "percent" | "%" => Ok(DiscountKind::Percent),
            _ => Err(ValidationError::NotAllowed {
                field: "discount type".to_string(),
                allowed: vec!["none".into(), "flat".into(), "percent".into()],
            }),
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Ticket Class
// =============================================================================

/// The fixed set of ticket classes sold at the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketClass {
    Prime,
    Plus,
    Econo,
}

impl TicketClass {
    /// Every class, in the order shown on the counter form.
    pub const ALL: [TicketClass; 3] = [TicketClass::Prime, TicketClass::Plus, TicketClass::Econo];

    /// The class name as printed on tickets and in payloads.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TicketClass::Prime => "PRIME",
            TicketClass::Plus => "PLUS",
            TicketClass::Econo => "ECONO",
        }
    }

    /// List price; the operator may override it per batch.
    pub const fn default_price(&self) -> Money {
        match self {
            TicketClass::Prime => Money::from_units(15000),
            TicketClass::Plus => Money::from_units(11000),
            TicketClass::Econo => Money::from_units(2500),
        }
    }
}

impl FromStr for TicketClass {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TicketClass::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "ticket class".to_string(),
                allowed: TicketClass::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

impl fmt::Display for TicketClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Event Profile
// =============================================================================

/// The event a batch is sold for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EventProfile {
    /// Printed on every ticket.
    pub name: String,
    /// Short code embedded in the verification payload.
    pub code: String,
}

impl Default for EventProfile {
    fn default() -> Self {
        EventProfile {
            name: "XYZ CONFERENCE".to_string(),
            code: "XYZ".to_string(),
        }
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// Validated input to the pricing engine.
///
/// ## Invariants
/// - `base_price` > 0
/// - `quantity` ≥ 1
///
/// Built by `validation::validate_form`; tests construct it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    pub base_price: Money,
    pub quantity: i64,
    pub rule: DiscountRule,
}

impl PricingInput {
    pub fn new(base_price: Money, quantity: i64, rule: DiscountRule) -> Self {
        PricingInput {
            base_price,
            quantity,
            rule,
        }
    }
}

/// Totals for one batch.
///
/// ## Invariants
/// - `subtotal = base_price × quantity`
/// - `total_discount ≤ subtotal`
/// - `final_total = subtotal − total_discount ≥ 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub subtotal: Money,
    pub total_discount: Money,
    pub final_total: Money,
}

// =============================================================================
// Ticket Identity
// =============================================================================

/// A ticket identifier such as `TCK2026-4173`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TicketId(String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        TicketId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Ticket Record
// =============================================================================

/// One printable ticket.
///
/// Uses the snapshot pattern: everything the renderer needs is frozen in
/// at generation time and there are no setters. A new batch replaces old
/// records wholesale.
///
/// ## Invariants
/// - `final_price = base_price − per_ticket_discount`
/// - Within a batch, `Σ per_ticket_discount = total_discount`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub(crate) sequence_index: usize,
    pub(crate) serial_label: String,
    pub(crate) ticket_id: TicketId,
    pub(crate) base_price: Money,
    pub(crate) per_ticket_discount: Money,
    pub(crate) final_price: Money,
    pub(crate) discount_label: String,
    pub(crate) verification_payload: String,
    #[ts(as = "String")]
    pub(crate) issued_at: DateTime<Utc>,
    pub(crate) ticket_class: TicketClass,
    pub(crate) event_label: String,
}

impl TicketRecord {
    /// 0-based position in the batch.
    pub fn sequence_index(&self) -> usize {
        self.sequence_index
    }

    /// `"i/N"`, 1-based.
    pub fn serial_label(&self) -> &str {
        &self.serial_label
    }

    pub fn ticket_id(&self) -> &TicketId {
        &self.ticket_id
    }

    pub fn base_price(&self) -> Money {
        self.base_price
    }

    pub fn per_ticket_discount(&self) -> Money {
        self.per_ticket_discount
    }

    pub fn final_price(&self) -> Money {
        self.final_price
    }

    pub fn discount_label(&self) -> &str {
        &self.discount_label
    }

    /// The exact string handed to the code-symbol encoder.
    pub fn verification_payload(&self) -> &str {
        &self.verification_payload
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn ticket_class(&self) -> TicketClass {
        self.ticket_class
    }

    pub fn event_label(&self) -> &str {
        &self.event_label
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
