//! # Error Types
//!
//! Domain-specific error types for ticket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ticket-core errors (this file)                                        │
//! │  ├── CoreError        - Batch / allocation failures                    │
//! │  ├── ValidationError  - Form input failures (fix and retry)            │
//! │  └── PayloadError     - Malformed verification payload strings         │
//! │                                                                         │
//! │  ticket-desk errors (app crate)                                        │
//! │  └── ApiError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Operator               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in here is fatal: validation failures are corrected by the
//! operator, out-of-range discounts are clamped rather than reported.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A discount was split across zero tickets.
    ///
    /// ## When This Occurs
    /// Only when a caller skips validation; `validate_form` never lets a
    /// quantity of zero through.
    #[error("Cannot allocate a discount across zero tickets")]
    EmptyAllocation,

    /// A negative discount total reached the allocator.
    #[error("Discount total must not be negative, got {0}")]
    NegativeDiscount(i64),

    /// Batch quantity exceeds the maximum printable batch.
    #[error("Quantity {requested} exceeds maximum batch size ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Used for early validation before any pricing runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not a number at all.
    #[error("{field} must be a whole number, got '{value}'")]
    NotANumber { field: String, value: String },

    /// Invalid format (e.g., bad event code characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Payload Error
// =============================================================================

/// Errors raised while parsing a verification payload back into fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// Wrong number of `|`-separated fields.
    #[error("Payload must have {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// A field's key is not the one expected at that position.
    #[error("Expected key {expected} at position {position}, found '{found}'")]
    UnexpectedKey {
        position: usize,
        expected: &'static str,
        found: String,
    },

    /// A field has no `=` separator.
    #[error("Field '{0}' is not a KEY=value pair")]
    MissingSeparator(String),

    /// Ticket class is not one of the known classes.
    #[error("Unknown ticket class '{0}'")]
    UnknownClass(String),

    /// PRICE is not an integer.
    #[error("Invalid price '{0}'")]
    InvalidPrice(String),

    /// TIME is not an RFC 3339 timestamp.
    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
