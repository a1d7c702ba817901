//! # ticket-core: Pure Business Logic for Ticket Desk
//!
//! Everything needed to turn "3 × PLUS at ₹11,000 with ₹100 off" into a
//! batch of priced, identified ticket records. No I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ticket Desk Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         ticket-desk (CLI shell, renderer, export)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ TicketForm / Batch                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ticket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   validation ──► pricing ──► allocation ──► identity ──► batch │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO ENVIRONMENT • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Whole-unit money type and currency formatting
//! - [`types`] - Domain types (TicketClass, DiscountRule, TicketRecord, ...)
//! - [`validation`] - Raw form input to a validated pricing input
//! - [`pricing`] - Subtotal, discount and final total
//! - [`allocation`] - Exact split of a batch discount across tickets
//! - [`identity`] - Ticket IDs and verification payloads
//! - [`batch`] - Assembles the final ticket records
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use ticket_core::money::Money;
//! use ticket_core::pricing::compute_pricing;
//! use ticket_core::types::{DiscountRule, PricingInput};
//!
//! let input = PricingInput::new(Money::from_units(11000), 3, DiscountRule::flat(Money::from_units(100)));
//! let pricing = compute_pricing(&input);
//!
//! assert_eq!(pricing.subtotal.units(), 33000);
//! assert_eq!(pricing.total_discount.units(), 100);
//! assert_eq!(pricing.final_total.units(), 32900);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod batch;
pub mod error;
pub mod identity;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use batch::{generate_batch, Batch, BatchRequest};
pub use error::{CoreError, CoreResult, PayloadError, ValidationError};
pub use identity::{Clock, FixedClock, IdGenerator, IdScheme, SystemClock, VerificationPayload};
pub use money::{CurrencyFormat, DigitGrouping, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix carried by every ticket identifier.
pub const TICKET_ID_PREFIX: &str = "TCK";

/// Maximum tickets in a single batch.
///
/// ## Business Reason
/// A counter batch is printed in one go; a typo like 1000 instead of 10
/// should be caught before a thousand tickets hit the printer.
pub const MAX_BATCH_QUANTITY: i64 = 500;
