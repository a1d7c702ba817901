//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TICKET_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use ticket_core::validation::{validate_event_code, validate_event_name};
use ticket_core::{CurrencyFormat, DigitGrouping, EventProfile, IdScheme, Money};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Event printed on tickets and coded into payloads
    pub event: EventProfile,

    /// How amounts are shown on tickets and summaries
    pub currency: CurrencyFormat,

    /// Ticket identifier scheme
    pub id_scheme: IdScheme,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Event: "XYZ CONFERENCE" (code "XYZ")
    /// - Currency: ₹ with lakh/crore grouping
    /// - IDs: legacy scheme (readable by the existing verifier)
    fn default() -> Self {
        ConfigState {
            event: EventProfile::default(),
            currency: CurrencyFormat::default(),
            id_scheme: IdScheme::Legacy,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TICKET_EVENT_NAME`: Event name printed on tickets
    /// - `TICKET_EVENT_CODE`: Short code in the verification payload
    /// - `TICKET_CURRENCY_SYMBOL`: e.g. "₹", "Rs."
    /// - `TICKET_DIGIT_GROUPING`: "indian" or "western"
    /// - `TICKET_ID_SCHEME`: "legacy" or "strong"
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from any key lookup (environment, test map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("TICKET_EVENT_NAME") {
            validate_event_name(&name)
                .map_err(|_| ConfigError::InvalidValue("TICKET_EVENT_NAME".to_string()))?;
            config.event.name = name.trim().to_string();
        }

        if let Some(code) = lookup("TICKET_EVENT_CODE") {
            validate_event_code(&code)
                .map_err(|_| ConfigError::InvalidValue("TICKET_EVENT_CODE".to_string()))?;
            config.event.code = code.trim().to_string();
        }

        if let Some(symbol) = lookup("TICKET_CURRENCY_SYMBOL") {
            config.currency.symbol = symbol;
        }

        if let Some(grouping) = lookup("TICKET_DIGIT_GROUPING") {
            config.currency.grouping = match grouping.trim().to_ascii_lowercase().as_str() {
                "indian" => DigitGrouping::Indian,
                "western" => DigitGrouping::Western,
                _ => return Err(ConfigError::InvalidValue("TICKET_DIGIT_GROUPING".to_string())),
            };
        }

        if let Some(scheme) = lookup("TICKET_ID_SCHEME") {
            config.id_scheme = scheme
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TICKET_ID_SCHEME".to_string()))?;
        }

        Ok(config)
    }

    /// Formats an amount as a currency string.
    pub fn format_currency(&self, amount: Money) -> String {
        self.currency.format(amount)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ConfigState::default());
        assert_eq!(config.event.code, "XYZ");
        assert_eq!(config.id_scheme, IdScheme::Legacy);
    }

    #[test]
    fn test_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            ("TICKET_EVENT_NAME", "RUSTCONF INDIA"),
            ("TICKET_EVENT_CODE", "RCI26"),
            ("TICKET_CURRENCY_SYMBOL", "$"),
            ("TICKET_DIGIT_GROUPING", "western"),
            ("TICKET_ID_SCHEME", "strong"),
        ]))
        .unwrap();

        assert_eq!(config.event.name, "RUSTCONF INDIA");
        assert_eq!(config.event.code, "RCI26");
        assert_eq!(config.id_scheme, IdScheme::Strong);
        assert_eq!(config.format_currency(Money::from_units(150000)), "$150,000");
    }

    #[test]
    fn test_rejects_payload_breaking_event_code() {
        let err = ConfigState::from_lookup(lookup(&[("TICKET_EVENT_CODE", "XYZ|EVIL")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for TICKET_EVENT_CODE");
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(ConfigState::from_lookup(lookup(&[("TICKET_ID_SCHEME", "uuid")])).is_err());
        assert!(ConfigState::from_lookup(lookup(&[("TICKET_DIGIT_GROUPING", "roman")])).is_err());
    }

    #[test]
    fn test_format_currency_default() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_units(45000)), "₹45,000");
        assert_eq!(config.format_currency(Money::zero()), "₹0");
    }
}
