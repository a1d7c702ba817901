//! # Ticket Identity
//!
//! Ticket identifiers and the verification payload carried in each
//! ticket's scannable code.
//!
//! ## Identifier Schemes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LEGACY (default)    TCK2026-4173                                       │
//! │                      │   │    │  └─ 1-based position in the batch       │
//! │                      │   │    └──── random 100..=999                    │
//! │                      │   └───────── issue year                          │
//! │                      └───────────── prefix                              │
//! │                                                                         │
//! │  STRONG (opt-in)     TCK2026-9F1C2A7B44E0D315-3                         │
//! │                              └─ 16 hex chars from a UUID v4             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Weakness of the Legacy Scheme
//! The random part has only 900 values and nothing records IDs already
//! issued. Inside one batch IDs cannot collide (fixed-width random part,
//! distinct positions), but two batches sold in the same year collide on
//! a given position with probability 1/900. Treat legacy IDs as
//! best-effort unique. The verifier already reads legacy IDs, so the
//! scheme stays the default; `IdScheme::Strong` is the upgrade path.
//!
//! ## Payload Contract
//! ```text
//! EVENT=XYZ|TYPE=PLUS|ID=TCK2026-4173|PRICE=10967|TIME=2026-10-19T08:30:00.000Z
//! ```
//! Field order, `|` delimiter and key names are read by the external
//! verifier. Changing any of them invalidates tickets already printed.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, SecondsFormat, SubsecRound, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PayloadError, ValidationError};
use crate::money::Money;
use crate::types::{TicketClass, TicketId};
use crate::TICKET_ID_PREFIX;

// =============================================================================
// Clock
// =============================================================================

/// Source of issue timestamps.
///
/// Timestamps are truncated to milliseconds, the precision the payload
/// carries, so a parsed payload compares equal to the record.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// Always returns the same instant. Used by tests and reprints.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        FixedClock(at.trunc_subsecs(3))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// =============================================================================
// Identifier Generation
// =============================================================================

/// Produces one identifier per ticket.
pub trait IdGenerator {
    /// Identifier for the ticket at `sequence_index` (0-based).
    fn next_id(&mut self, sequence_index: usize, issued_at: DateTime<Utc>) -> TicketId;
}

/// Which identifier scheme a counter uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// `TCK<year>-<100..=999><position>`, compatible with printed stock.
    #[default]
    Legacy,
    /// `TCK<year>-<16 hex>-<position>`, ~60 random bits per ticket.
    Strong,
}

impl IdScheme {
    /// A generator for this scheme seeded from OS entropy.
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            IdScheme::Legacy => Box::new(LegacyIdGenerator::new(StdRng::from_entropy())),
            IdScheme::Strong => Box::new(StrongIdGenerator),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            IdScheme::Legacy => "legacy",
            IdScheme::Strong => "strong",
        }
    }
}

impl FromStr for IdScheme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(IdScheme::Legacy),
            "strong" => Ok(IdScheme::Strong),
            _ => Err(ValidationError::NotAllowed {
                field: "id scheme".to_string(),
                allowed: vec!["legacy".into(), "strong".into()],
            }),
        }
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Year + 3-digit random + position.
#[derive(Debug)]
pub struct LegacyIdGenerator<R> {
    rng: R,
}

impl<R: Rng> LegacyIdGenerator<R> {
    pub fn new(rng: R) -> Self {
        LegacyIdGenerator { rng }
    }
}

impl<R: Rng> IdGenerator for LegacyIdGenerator<R> {
    fn next_id(&mut self, sequence_index: usize, issued_at: DateTime<Utc>) -> TicketId {
        let random_part: u16 = self.rng.gen_range(100..=999);
        TicketId::new(format!(
            "{}{}-{}{}",
            TICKET_ID_PREFIX,
            issued_at.year(),
            random_part,
            sequence_index + 1
        ))
    }
}

/// Year + UUID v4 token + position.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrongIdGenerator;

impl IdGenerator for StrongIdGenerator {
    fn next_id(&mut self, sequence_index: usize, issued_at: DateTime<Utc>) -> TicketId {
        let token = Uuid::new_v4().simple().to_string().to_ascii_uppercase();
        TicketId::new(format!(
            "{}{}-{}-{}",
            TICKET_ID_PREFIX,
            issued_at.year(),
            &token[..16],
            sequence_index + 1
        ))
    }
}

// =============================================================================
// Verification Payload
// =============================================================================

/// Payload keys, in contract order.
pub const PAYLOAD_KEYS: [&str; 5] = ["EVENT", "TYPE", "ID", "PRICE", "TIME"];

/// Separator between payload fields.
pub const PAYLOAD_DELIMITER: char = '|';

/// Structured form of the string encoded into a ticket's code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPayload {
    pub event_code: String,
    pub ticket_class: TicketClass,
    pub ticket_id: TicketId,
    pub final_price: Money,
    pub issued_at: DateTime<Utc>,
}

/// Builds the payload string for one ticket.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use ticket_core::identity::build_payload;
/// use ticket_core::money::Money;
/// use ticket_core::types::{TicketClass, TicketId};
///
/// let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
/// let payload = build_payload("XYZ", TicketClass::Plus, &TicketId::new("TCK2026-4171"), Money::from_units(10966), at);
/// assert_eq!(
///     payload,
///     "EVENT=XYZ|TYPE=PLUS|ID=TCK2026-4171|PRICE=10966|TIME=2026-10-19T08:30:00.000Z"
/// );
/// ```
pub fn build_payload(
    event_code: &str,
    ticket_class: TicketClass,
    ticket_id: &TicketId,
    final_price: Money,
    issued_at: DateTime<Utc>,
) -> String {
    VerificationPayload {
        event_code: event_code.to_string(),
        ticket_class,
        ticket_id: ticket_id.clone(),
        final_price,
        issued_at,
    }
    .to_string()
}

/// ISO 8601 / RFC 3339 with milliseconds and a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl fmt::Display for VerificationPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EVENT={}|TYPE={}|ID={}|PRICE={}|TIME={}",
            self.event_code,
            self.ticket_class,
            self.ticket_id,
            self.final_price.units(),
            format_timestamp(self.issued_at)
        )
    }
}

impl FromStr for VerificationPayload {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(PAYLOAD_DELIMITER).collect();
        if fields.len() != PAYLOAD_KEYS.len() {
            return Err(PayloadError::FieldCount {
                expected: PAYLOAD_KEYS.len(),
                found: fields.len(),
            });
        }

        let mut values = [""; 5];
        for (position, (field, expected)) in fields.iter().zip(PAYLOAD_KEYS).enumerate() {
            let (key, value) = field
                .split_once('=')
                .ok_or_else(|| PayloadError::MissingSeparator(field.to_string()))?;
            if key != expected {
                return Err(PayloadError::UnexpectedKey {
                    position,
                    expected,
                    found: key.to_string(),
                });
            }
            values[position] = value;
        }
        let [event, class, id, price, time] = values;

        let ticket_class = class
            .parse::<TicketClass>()
            .map_err(|_| PayloadError::UnknownClass(class.to_string()))?;
        let final_price = price
            .parse::<i64>()
            .map(Money::from_units)
            .map_err(|_| PayloadError::InvalidPrice(price.to_string()))?;
        let issued_at = DateTime::parse_from_rfc3339(time)
            .map(|at| at.with_timezone(&Utc))
            .map_err(|_| PayloadError::InvalidTimestamp(time.to_string()))?;

        Ok(VerificationPayload {
            event_code: event.to_string(),
            ticket_class,
            ticket_id: TicketId::new(id),
            final_price,
            issued_at,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_legacy_id_format() {
        let mut ids = LegacyIdGenerator::new(StdRng::seed_from_u64(7));
        let id = ids.next_id(11, at());
        let id = id.as_str();

        assert!(id.starts_with("TCK2026-"), "unexpected id {id}");
        let suffix = &id["TCK2026-".len()..];
        let random_part: u16 = suffix[..3].parse().unwrap();
        assert!((100..=999).contains(&random_part));
        assert_eq!(&suffix[3..], "12");
    }

    #[test]
    fn test_legacy_ids_distinct_within_batch() {
        let mut ids = LegacyIdGenerator::new(StdRng::seed_from_u64(42));
        let seen: HashSet<TicketId> = (0..500).map(|i| ids.next_id(i, at())).collect();
        assert_eq!(seen.len(), 500);
    }

    #[test]
    fn test_seeded_generators_repeat() {
        let mut a = LegacyIdGenerator::new(StdRng::seed_from_u64(3));
        let mut b = LegacyIdGenerator::new(StdRng::seed_from_u64(3));
        assert_eq!(a.next_id(0, at()), b.next_id(0, at()));
    }

    #[test]
    fn test_strong_id_format() {
        let id = StrongIdGenerator.next_id(2, at());
        let parts: Vec<&str> = id.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TCK2026");
        assert_eq!(parts[1].len(), 16);
        assert!(parts[1].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(parts[2], "3");
    }

    #[test]
    fn test_scheme_parse() {
        assert_eq!("Strong".parse::<IdScheme>(), Ok(IdScheme::Strong));
        assert_eq!("legacy".parse::<IdScheme>(), Ok(IdScheme::Legacy));
        assert!("sequential".parse::<IdScheme>().is_err());
    }

    #[test]
    fn test_payload_format() {
        let payload = build_payload(
            "XYZ",
            TicketClass::Prime,
            &TicketId::new("TCK2026-5551"),
            Money::from_units(15000),
            at(),
        );
        assert_eq!(
            payload,
            "EVENT=XYZ|TYPE=PRIME|ID=TCK2026-5551|PRICE=15000|TIME=2026-10-19T08:30:00.000Z"
        );
    }

    #[test]
    fn test_payload_round_trip() {
        let issued_at = FixedClock::new(Utc::now()).now();
        let original = VerificationPayload {
            event_code: "XYZ".to_string(),
            ticket_class: TicketClass::Econo,
            ticket_id: TicketId::new("TCK2026-1234"),
            final_price: Money::from_units(2250),
            issued_at,
        };

        let parsed: VerificationPayload = original.to_string().parse().unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_payload_rejects_reordered_fields() {
        let err = "TYPE=PLUS|EVENT=XYZ|ID=A|PRICE=1|TIME=2026-10-19T08:30:00.000Z"
            .parse::<VerificationPayload>()
            .unwrap_err();
        assert!(matches!(err, PayloadError::UnexpectedKey { position: 0, .. }));
    }

    #[test]
    fn test_payload_rejects_bad_fields() {
        assert!(matches!(
            "EVENT=XYZ|TYPE=PLUS".parse::<VerificationPayload>(),
            Err(PayloadError::FieldCount { expected: 5, found: 2 })
        ));
        assert!(matches!(
            "EVENT=XYZ|TYPE=VIP|ID=A|PRICE=1|TIME=2026-10-19T08:30:00.000Z"
                .parse::<VerificationPayload>(),
            Err(PayloadError::UnknownClass(_))
        ));
        assert!(matches!(
            "EVENT=XYZ|TYPE=PLUS|ID=A|PRICE=ten|TIME=2026-10-19T08:30:00.000Z"
                .parse::<VerificationPayload>(),
            Err(PayloadError::InvalidPrice(_))
        ));
        assert!(matches!(
            "EVENT=XYZ|TYPE=PLUS|ID=A|PRICE=1|TIME=yesterday".parse::<VerificationPayload>(),
            Err(PayloadError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            "EVENT=XYZ|TYPE=PLUS|ID|PRICE=1|TIME=x".parse::<VerificationPayload>(),
            Err(PayloadError::MissingSeparator(_))
        ));
    }

    #[test]
    fn test_fixed_clock_truncates_to_millis() {
        let precise = Utc.timestamp_opt(1_792_000_000, 123_456_789).unwrap();
        let clock = FixedClock::new(precise);
        assert_eq!(clock.now().timestamp_subsec_nanos(), 123_000_000);
    }
}
