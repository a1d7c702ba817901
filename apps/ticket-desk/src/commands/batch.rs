//! # Batch Commands
//!
//! Preview, generate, print, export and clear.
//!
//! ## Batch Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Batch Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐  generate  ┌──────────┐  print / export  ┌──────────┐     │
//! │  │ No Batch │───────────►│ Current  │─────────────────►│ Printed  │     │
//! │  │          │◄───────────│  Batch   │◄─────────────────│ Exported │     │
//! │  └──────────┘   clear    └──────────┘    generate      └──────────┘     │
//! │       │                    ▲      │      (replaces)                     │
//! │       │ print / export     └──────┘                                     │
//! │       ▼                                                                 │
//! │  EMPTY_BATCH guard, nothing printed or written                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `preview_pricing` and `generate_tickets` both go through
//! `ticket_core::pricing::compute_pricing`, so the preview shown before
//! generating always equals the generated totals.

use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use ticket_core::pricing::compute_pricing;
use ticket_core::validation::{validate_form, DiscountAdjustment, TicketForm};
use ticket_core::{
    generate_batch, BatchRequest, Clock, IdGenerator, Money, PricingResult, TicketClass,
};

use crate::error::ApiError;
use crate::render::TextTicketRenderer;
use crate::state::{BatchSession, ConfigState};

/// Guard message when printing with no batch.
pub const PRINT_GUARD_MESSAGE: &str = "Please generate tickets first.";

/// Guard message when exporting with no batch.
pub const EXPORT_GUARD_MESSAGE: &str = "Generate tickets before exporting.";

/// Summary shown beside the form (live preview and after generating).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSummary {
    pub ticket_class: TicketClass,
    pub base_price: Money,
    pub quantity: i64,
    pub subtotal: Money,
    pub total_discount: Money,
    pub final_total: Money,
    /// Set when the discount field was clamped and must be redisplayed
    pub discount_adjustment: Option<DiscountAdjustment>,
}

impl PricingSummary {
    /// Formats the summary as display lines.
    pub fn lines(&self, config: &ConfigState) -> Vec<String> {
        let mut lines = vec![
            format!("Type:      {}", self.ticket_class),
            format!("Base:      {}", config.format_currency(self.base_price)),
            format!("Qty:       {}", self.quantity),
            format!("Subtotal:  {}", config.format_currency(self.subtotal)),
            format!("Discount:  {}", config.format_currency(self.total_discount)),
            format!("Final:     {}", config.format_currency(self.final_total)),
        ];
        if let Some(adjustment) = &self.discount_adjustment {
            lines.push(format!(
                "Note:      discount value '{}' corrected to {}",
                adjustment.original, adjustment.corrected
            ));
        }
        lines
    }

    fn new(
        ticket_class: TicketClass,
        base_price: Money,
        quantity: i64,
        pricing: &PricingResult,
        discount_adjustment: Option<DiscountAdjustment>,
    ) -> Self {
        PricingSummary {
            ticket_class,
            base_price,
            quantity,
            subtotal: pricing.subtotal,
            total_discount: pricing.total_discount,
            final_total: pricing.final_total,
            discount_adjustment,
        }
    }
}

/// Computes the live preview without generating anything.
///
/// Safe to call on every form change; the session is not touched.
pub fn preview_pricing(form: &TicketForm) -> Result<PricingSummary, ApiError> {
    let validated = validate_form(form)?;
    let pricing = compute_pricing(&validated.input);

    Ok(PricingSummary::new(
        validated.ticket_class,
        validated.input.base_price,
        validated.input.quantity,
        &pricing,
        validated.discount_adjustment,
    ))
}

/// Validates the form, generates a batch and makes it the current batch.
///
/// ## User Workflow
/// ```text
/// Operator presses "Generate"
///      │
///      ▼
/// generate_tickets() ← THIS FUNCTION
///      │
///      ├── invalid form? → VALIDATION_ERROR, current batch untouched
///      │
///      └── OK → new batch replaces the old one → summary returned
/// ```
pub fn generate_tickets<I, C>(
    config: &ConfigState,
    session: &BatchSession,
    form: &TicketForm,
    ids: &mut I,
    clock: &C,
) -> Result<PricingSummary, ApiError>
where
    I: IdGenerator + ?Sized,
    C: Clock + ?Sized,
{
    let validated = validate_form(form)?;
    let request = BatchRequest::new(validated.input, validated.ticket_class, config.event.clone())
        .with_currency(config.currency.clone());

    let batch = generate_batch(&request, ids, clock)?;
    let summary = PricingSummary::new(
        validated.ticket_class,
        validated.input.base_price,
        validated.input.quantity,
        batch.pricing(),
        validated.discount_adjustment,
    );

    let replaced = session.replace(batch);
    info!(
        class = %summary.ticket_class,
        quantity = summary.quantity,
        final_total = summary.final_total.units(),
        replaced = replaced.is_some(),
        "Tickets generated"
    );

    Ok(summary)
}

/// Prints every ticket in the current batch to `out`.
///
/// ## Returns
/// Number of tickets printed, or an EMPTY_BATCH error when nothing has
/// been generated.
pub fn print_batch<W: Write>(
    session: &BatchSession,
    renderer: &TextTicketRenderer,
    out: &mut W,
) -> Result<usize, ApiError> {
    session.with_batch(|batch| {
        let batch = match batch {
            Some(batch) if !batch.is_empty() => batch,
            _ => {
                warn!("Print requested with no batch");
                return Err(ApiError::empty_batch(PRINT_GUARD_MESSAGE));
            }
        };

        for ticket in batch.tickets() {
            out.write_all(renderer.render(ticket).as_bytes())
                .map_err(|e| ApiError::internal(format!("Failed to print tickets: {}", e)))?;
        }
        debug!(count = batch.len(), "Batch printed");
        Ok(batch.len())
    })
}

/// Writes the current batch to `path` as pretty JSON.
///
/// The file is only created once a batch is known to exist, and only
/// appears at `path` once it has been written in full.
pub fn export_batch(session: &BatchSession, path: &Path) -> Result<usize, ApiError> {
    session.with_batch(|batch| {
        let batch = match batch {
            Some(batch) if !batch.is_empty() => batch,
            _ => {
                warn!("Export requested with no batch");
                return Err(ApiError::empty_batch(EXPORT_GUARD_MESSAGE));
            }
        };

        write_json(path, batch)?;
        info!(path = %path.display(), count = batch.len(), "Batch exported");
        Ok(batch.len())
    })
}

/// Serializes `value` into a temp file beside `path`, then renames it over
/// `path`. On any failure the temp file is dropped and `path` is untouched.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ApiError> {
    let write_err = |e: &dyn std::fmt::Display| {
        ApiError::export(format!("Cannot write {}: {}", path.display(), e))
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(dir).map_err(|e| {
        ApiError::export(format!("Cannot create {}: {}", path.display(), e))
    })?;

    let mut writer = BufWriter::new(temp);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| write_err(&e))?;
    let temp = writer.into_inner().map_err(|e| write_err(e.error()))?;
    temp.persist(path).map_err(|e| write_err(&e.error))?;
    Ok(())
}

/// Discards the current batch.
///
/// ## Returns
/// Number of tickets discarded (0 when there was no batch).
pub fn clear_batch(session: &BatchSession) -> usize {
    let cleared = session.clear().map_or(0, |batch| batch.len());
    debug!(cleared, "Batch cleared");
    cleared
}
