//! # Validation Module
//!
//! Turns the raw counter form into a [`PricingInput`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Form Field Handling                                │
//! │                                                                         │
//! │  base price / quantity                                                  │
//! │  ├── empty, non-numeric, zero, negative → REJECT (ValidationError)      │
//! │  └── operator fixes the field and retries                               │
//! │                                                                         │
//! │  discount value                                                         │
//! │  ├── negative                  → CLAMP to 0                             │
//! │  ├── percent above 100         → CLAMP to 100                           │
//! │  ├── type "none"               → FORCED to 0                            │
//! │  └── every clamp is reported so the visible field can be corrected      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ticket_core::validation::{validate_form, TicketForm};
//!
//! let form = TicketForm::new("PLUS", "3").with_discount("percent", "150");
//! let validated = validate_form(&form).unwrap();
//!
//! let adjustment = validated.discount_adjustment.unwrap();
//! assert_eq!(adjustment.corrected, "100");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DiscountKind, DiscountRate, DiscountRule, PricingInput, TicketClass};
use crate::MAX_BATCH_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Highest base price accepted for a single ticket (one crore).
pub const MAX_TICKET_PRICE: i64 = 10_000_000;

/// Longest event code that fits the payload comfortably.
pub const MAX_EVENT_CODE_LEN: usize = 16;

// =============================================================================
// Form Types
// =============================================================================

/// The counter form exactly as the operator typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketForm {
    pub ticket_class: String,
    /// `None` means "use the class list price".
    pub base_price: Option<String>,
    pub quantity: String,
    pub discount_type: String,
    pub discount_value: String,
}

impl TicketForm {
    /// Form with no discount and the class list price.
    pub fn new(ticket_class: impl Into<String>, quantity: impl Into<String>) -> Self {
        TicketForm {
            ticket_class: ticket_class.into(),
            base_price: None,
            quantity: quantity.into(),
            discount_type: DiscountKind::None.as_str().to_string(),
            discount_value: "0".to_string(),
        }
    }

    pub fn with_base_price(mut self, base_price: impl Into<String>) -> Self {
        self.base_price = Some(base_price.into());
        self
    }

    pub fn with_discount(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.discount_type = kind.into();
        self.discount_value = value.into();
        self
    }
}

/// A discount value that was corrected on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountAdjustment {
    pub original: String,
    pub corrected: String,
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    pub ticket_class: TicketClass,
    pub input: PricingInput,
    /// Set when the discount value had to be clamped.
    pub discount_adjustment: Option<DiscountAdjustment>,
}

// =============================================================================
// Form Validation
// =============================================================================

/// Validates the whole counter form.
///
/// ## User Workflow
/// ```text
/// Operator presses "Generate"
///      │
///      ▼
/// validate_form() ← THIS FUNCTION
///      │
///      ├── bad class / price / quantity? → ValidationError, nothing generated
///      │
///      └── OK → PricingInput (+ clamp notice) → generate_batch()
/// ```
pub fn validate_form(form: &TicketForm) -> ValidationResult<ValidatedForm> {
    let ticket_class: TicketClass = form.ticket_class.parse()?;

    let base_price = match form.base_price.as_deref() {
        Some(raw) => validate_base_price(raw)?,
        None => ticket_class.default_price(),
    };
    let quantity = validate_quantity(&form.quantity)?;

    let kind: DiscountKind = form.discount_type.parse()?;
    let (rule, discount_adjustment) = clamp_discount(kind, &form.discount_value);

    if let Some(adjustment) = &discount_adjustment {
        debug!(
            original = %adjustment.original,
            corrected = %adjustment.corrected,
            kind = %kind,
            "Discount value clamped"
        );
    }

    Ok(ValidatedForm {
        ticket_class,
        input: PricingInput::new(base_price, quantity, rule),
        discount_adjustment,
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a base price field.
///
/// ## Rules
/// - Must be a whole number (no "12abc", no "12.5")
/// - Must be positive (> 0)
/// - Must not exceed MAX_TICKET_PRICE
///
/// ## Example
/// ```rust
/// use ticket_core::validation::validate_base_price;
///
/// assert_eq!(validate_base_price("15000").unwrap().units(), 15000);
/// assert!(validate_base_price("0").is_err());
/// assert!(validate_base_price("abc").is_err());
/// ```
pub fn validate_base_price(raw: &str) -> ValidationResult<Money> {
    let units = parse_positive("base price", raw)?;
    if units > MAX_TICKET_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "base price".to_string(),
            min: 1,
            max: MAX_TICKET_PRICE,
        });
    }
    Ok(Money::from_units(units))
}

/// Validates a quantity field.
///
/// ## Rules
/// - Must be a whole number
/// - Must be positive (> 0)
/// - Must not exceed MAX_BATCH_QUANTITY
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Operator enters quantity: 5                                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity("5") ← THIS FUNCTION                                 │
/// │       │                                                                 │
/// │       ├── not a number? → Error: "quantity must be a whole number"      │
/// │       ├── qty <= 0?     → Error: "quantity must be positive"            │
/// │       ├── qty > 500?    → Error: "quantity must be between 1 and 500"   │
/// │       │                                                                 │
/// │       └── OK → Proceed with pricing                                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(raw: &str) -> ValidationResult<i64> {
    let qty = parse_positive("quantity", raw)?;
    if qty > MAX_BATCH_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_BATCH_QUANTITY,
        });
    }
    Ok(qty)
}

fn parse_positive(field: &str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let value: i64 = raw.parse().map_err(|_| ValidationError::NotANumber {
        field: field.to_string(),
        value: raw.to_string(),
    })?;

    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(value)
}

// =============================================================================
// Discount Clamping
// =============================================================================

/// Builds a discount rule from the raw discount field, clamping instead of
/// failing.
///
/// ## Rules
/// - `none`: value forced to 0
/// - empty field: 0, not reported
/// - non-numeric or negative: 0
/// - percent above 100: 100
/// - flat amounts are rounded half-up to whole units here
/// - percentages are kept to 0.01% (whole basis points)
///
/// Any value that differs from what will be applied is reported, with
/// `corrected` holding the applied value for the visible field.
///
/// ## Example
/// ```rust
/// use ticket_core::types::{DiscountKind, DiscountRate, DiscountRule};
/// use ticket_core::validation::clamp_discount;
///
/// let (rule, adjustment) = clamp_discount(DiscountKind::Percent, "150");
/// assert_eq!(rule, DiscountRule::Percent(DiscountRate::from_percent(100)));
/// assert!(adjustment.is_some());
/// ```
pub fn clamp_discount(kind: DiscountKind, raw: &str) -> (DiscountRule, Option<DiscountAdjustment>) {
    let trimmed = raw.trim();
    let entered = if trimmed.is_empty() {
        Some(0.0)
    } else {
        trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
    };

    let clamped = match (kind, entered) {
        (DiscountKind::None, _) => 0.0,
        (_, None) => 0.0,
        (_, Some(v)) if v < 0.0 => 0.0,
        (DiscountKind::Percent, Some(v)) if v > 100.0 => 100.0,
        (_, Some(v)) => v,
    };

    let (rule, corrected) = match kind {
        DiscountKind::None => (DiscountRule::None, format_discount_value(clamped)),
        // Half-up to whole units; equivalent to rounding after the
        // subtotal cap because the subtotal is itself whole
        DiscountKind::Flat => {
            let amount = Money::from_units(clamped.round() as i64);
            (DiscountRule::flat(amount), amount.units().to_string())
        }
        DiscountKind::Percent => {
            let rate = DiscountRate::from_percentage(clamped);
            (DiscountRule::percent(rate), rate.to_string())
        }
    };

    let adjusted = match entered {
        Some(v) => format_discount_value(v) != corrected,
        None => true,
    };
    let adjustment = adjusted.then(|| DiscountAdjustment {
        original: trimmed.to_string(),
        corrected,
    });

    (rule, adjustment)
}

fn format_discount_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// =============================================================================
// Event Validators
// =============================================================================

/// Validates an event code for use in the verification payload.
///
/// ## Rules
/// - Must not be empty
/// - At most MAX_EVENT_CODE_LEN characters
/// - Only ASCII letters, digits, hyphens, underscores (so it can never
///   contain the payload's `|` or `=` delimiters)
///
/// ## Example
/// ```rust
/// use ticket_core::validation::validate_event_code;
///
/// assert!(validate_event_code("XYZ").is_ok());
/// assert!(validate_event_code("XYZ|2026").is_err());
/// ```
pub fn validate_event_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "event code".to_string(),
        });
    }

    if code.len() > MAX_EVENT_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "event code".to_string(),
            max: MAX_EVENT_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "event code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates the event name printed on tickets.
pub fn validate_event_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "event name".to_string(),
        });
    }

    if name.chars().count() > 80 {
        return Err(ValidationError::TooLong {
            field: "event name".to_string(),
            max: 80,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_price() {
        assert_eq!(validate_base_price("15000").unwrap().units(), 15000);
        assert_eq!(validate_base_price(" 2500 ").unwrap().units(), 2500);

        assert!(matches!(
            validate_base_price(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_base_price("0"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_base_price("-100"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_base_price("12abc"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(validate_base_price("100000001").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity("1").unwrap(), 1);
        assert_eq!(validate_quantity("500").unwrap(), 500);

        assert!(validate_quantity("0").is_err());
        assert!(validate_quantity("-1").is_err());
        assert!(validate_quantity("2.5").is_err());
        assert!(validate_quantity("501").is_err());
    }

    #[test]
    fn test_clamp_percent_above_hundred() {
        let (rule, adjustment) = clamp_discount(DiscountKind::Percent, "150");
        assert_eq!(rule, DiscountRule::Percent(DiscountRate::from_percent(100)));
        assert_eq!(
            adjustment,
            Some(DiscountAdjustment {
                original: "150".to_string(),
                corrected: "100".to_string(),
            })
        );
    }

    #[test]
    fn test_clamp_negative_to_zero() {
        let (rule, adjustment) = clamp_discount(DiscountKind::Flat, "-20");
        assert_eq!(rule, DiscountRule::Flat(Money::zero()));
        assert_eq!(adjustment.map(|a| a.corrected), Some("0".to_string()));
    }

    #[test]
    fn test_clamp_none_forces_zero() {
        let (rule, adjustment) = clamp_discount(DiscountKind::None, "25");
        assert_eq!(rule, DiscountRule::None);
        assert!(adjustment.is_some());

        let (_, adjustment) = clamp_discount(DiscountKind::None, "0");
        assert!(adjustment.is_none());
    }

    #[test]
    fn test_clamp_keeps_valid_values() {
        let (rule, adjustment) = clamp_discount(DiscountKind::Percent, "12.5");
        assert_eq!(rule, DiscountRule::Percent(DiscountRate::from_bps(1250)));
        assert!(adjustment.is_none());

        let (rule, adjustment) = clamp_discount(DiscountKind::Flat, "");
        assert_eq!(rule, DiscountRule::Flat(Money::zero()));
        assert!(adjustment.is_none());

        let (rule, adjustment) = clamp_discount(DiscountKind::Flat, "100.0");
        assert_eq!(rule, DiscountRule::Flat(Money::from_units(100)));
        assert!(adjustment.is_none());
    }

    #[test]
    fn test_clamp_reports_flat_rounding() {
        let (rule, adjustment) = clamp_discount(DiscountKind::Flat, "100.6");
        assert_eq!(rule, DiscountRule::Flat(Money::from_units(101)));
        assert_eq!(adjustment.map(|a| a.corrected), Some("101".to_string()));
    }

    #[test]
    fn test_clamp_reports_percent_precision() {
        let (rule, adjustment) = clamp_discount(DiscountKind::Percent, "12.345");
        assert_eq!(rule, DiscountRule::Percent(DiscountRate::from_bps(1235)));
        assert_eq!(
            adjustment,
            Some(DiscountAdjustment {
                original: "12.345".to_string(),
                corrected: "12.35".to_string(),
            })
        );

        let (_, adjustment) = clamp_discount(DiscountKind::Percent, "33.33");
        assert!(adjustment.is_none());
        let (_, adjustment) = clamp_discount(DiscountKind::Percent, "12.50");
        assert!(adjustment.is_none());
    }

    #[test]
    fn test_corrected_percent_prices_the_batch() {
        let form = TicketForm::new("PRIME", "1")
            .with_base_price("100000")
            .with_discount("percent", "12.345");
        let validated = validate_form(&form).unwrap();
        let corrected = validated.discount_adjustment.unwrap().corrected;

        // The discount charged is the one the corrected field shows
        let pricing = crate::pricing::compute_pricing(&validated.input);
        let shown: f64 = corrected.parse().unwrap();
        assert_eq!(pricing.total_discount.units(), (100000.0 * shown / 100.0).round() as i64);
        assert_eq!(pricing.total_discount.units(), 12350);
    }

    #[test]
    fn test_clamp_garbage_to_zero() {
        let (rule, adjustment) = clamp_discount(DiscountKind::Flat, "ten");
        assert_eq!(rule, DiscountRule::Flat(Money::zero()));
        assert_eq!(adjustment.map(|a| a.original), Some("ten".to_string()));
    }

    #[test]
    fn test_validate_form_uses_class_price() {
        let validated = validate_form(&TicketForm::new("prime", "3")).unwrap();
        assert_eq!(validated.ticket_class, TicketClass::Prime);
        assert_eq!(validated.input.base_price.units(), 15000);
        assert_eq!(validated.input.quantity, 3);
        assert_eq!(validated.input.rule, DiscountRule::None);
    }

    #[test]
    fn test_validate_form_price_override() {
        let form = TicketForm::new("ECONO", "4").with_base_price("2000");
        let validated = validate_form(&form).unwrap();
        assert_eq!(validated.input.base_price.units(), 2000);
    }

    #[test]
    fn test_validate_form_rejects_bad_input() {
        assert!(validate_form(&TicketForm::new("VIP", "1")).is_err());
        assert!(validate_form(&TicketForm::new("PLUS", "zero")).is_err());
        assert!(validate_form(&TicketForm::new("PLUS", "1").with_base_price("0")).is_err());
        assert!(validate_form(&TicketForm::new("PLUS", "1").with_discount("coupon", "5")).is_err());
    }

    #[test]
    fn test_validate_event_code() {
        assert!(validate_event_code("XYZ").is_ok());
        assert!(validate_event_code("CONF_2026-B").is_ok());

        assert!(validate_event_code("").is_err());
        assert!(validate_event_code("A=B").is_err());
        assert!(validate_event_code("XYZ|1").is_err());
        assert!(validate_event_code(&"A".repeat(17)).is_err());
    }

    #[test]
    fn test_validate_event_name() {
        assert!(validate_event_name("XYZ CONFERENCE").is_ok());
        assert!(validate_event_name("  ").is_err());
        assert!(validate_event_name(&"N".repeat(81)).is_err());
    }
}
