//! # Text Ticket Renderer
//!
//! Plain-text ticket layout for the counter printer. The scannable code
//! itself is drawn by the printer's encoder from the payload line.
//!
//! ```text
//! ==================================================
//! PLUS                                 TCK2026-4171
//! XYZ CONFERENCE · 1/3
//! --------------------------------------------------
//! Base:      ₹11,000
//! Discount:  ₹34 (Flat ₹100 total · you save ₹34)
//! Final:     ₹10,966
//! ID:        TCK2026-4171
//! Code:      EVENT=XYZ|TYPE=PLUS|ID=TCK2026-4171|...
//! --------------------------------------------------
//! Valid for single entry only. Duplicate tickets will be rejected.
//! ==================================================
//! ```

use ticket_core::{CurrencyFormat, TicketRecord};

/// Printed at the foot of every ticket.
pub const SINGLE_ENTRY_WARNING: &str =
    "Valid for single entry only. Duplicate tickets will be rejected.";

/// Characters per line on the counter printer.
pub const TICKET_WIDTH: usize = 50;

/// Renders ticket records as fixed-width text.
#[derive(Debug, Clone)]
pub struct TextTicketRenderer {
    currency: CurrencyFormat,
}

impl TextTicketRenderer {
    pub fn new(currency: CurrencyFormat) -> Self {
        TextTicketRenderer { currency }
    }

    /// Renders one ticket, trailing newline included.
    pub fn render(&self, ticket: &TicketRecord) -> String {
        let heavy = "=".repeat(TICKET_WIDTH);
        let light = "-".repeat(TICKET_WIDTH);

        let class = ticket.ticket_class().as_str();
        let id = ticket.ticket_id().as_str();
        let gap = TICKET_WIDTH
            .saturating_sub(class.chars().count() + id.chars().count())
            .max(1);

        let lines = [
            heavy.clone(),
            format!("{}{}{}", class, " ".repeat(gap), id),
            format!("{} · {}", ticket.event_label(), ticket.serial_label()),
            light.clone(),
            field("Base", &self.currency.format(ticket.base_price())),
            field(
                "Discount",
                &format!(
                    "{} ({})",
                    self.currency.format(ticket.per_ticket_discount()),
                    ticket.discount_label()
                ),
            ),
            field("Final", &self.currency.format(ticket.final_price())),
            field("ID", id),
            field("Code", ticket.verification_payload()),
            light,
            SINGLE_ENTRY_WARNING.to_string(),
            heavy,
        ];

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn field(label: &str, value: &str) -> String {
    format!("{:<11}{}", format!("{}:", label), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ticket_core::identity::{FixedClock, LegacyIdGenerator};
    use ticket_core::{
        generate_batch, BatchRequest, DiscountRule, EventProfile, Money, PricingInput, TicketClass,
    };

    #[test]
    fn test_render_ticket() {
        let request = BatchRequest::new(
            PricingInput::new(
                Money::from_units(11000),
                3,
                DiscountRule::flat(Money::from_units(100)),
            ),
            TicketClass::Plus,
            EventProfile::default(),
        );
        let mut ids = LegacyIdGenerator::new(StdRng::seed_from_u64(8));
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap());
        let batch = generate_batch(&request, &mut ids, &clock).unwrap();
        let ticket = &batch.tickets()[0];

        let text = TextTicketRenderer::new(CurrencyFormat::default()).render(ticket);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=".repeat(TICKET_WIDTH));
        assert_eq!(lines[1].chars().count(), TICKET_WIDTH);
        assert!(lines[1].starts_with("PLUS"));
        assert!(lines[1].ends_with(ticket.ticket_id().as_str()));
        assert_eq!(lines[2], "XYZ CONFERENCE · 1/3");
        assert_eq!(lines[4], "Base:      ₹11,000");
        assert_eq!(
            lines[5],
            "Discount:  ₹34 (Flat ₹100 total · you save ₹34)"
        );
        assert_eq!(lines[6], "Final:     ₹10,966");
        assert_eq!(lines[8], format!("Code:      {}", ticket.verification_payload()));
        assert_eq!(lines[10], SINGLE_ENTRY_WARNING);
        assert!(text.ends_with('\n'));
    }
}
