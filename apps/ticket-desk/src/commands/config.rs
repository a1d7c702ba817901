//! # Config Commands
//!
//! Read-only views of the startup configuration and the ticket catalogue.

use serde::Serialize;
use tracing::debug;
use ticket_core::{Money, TicketClass};

use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// ## When Used
/// - `ticket-desk config`
/// - Shell `status`
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// One row of the class picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub ticket_class: TicketClass,
    pub default_price: Money,
    /// Default price in the configured currency format
    pub display_price: String,
}

/// Lists the ticket classes with their default base prices.
///
/// The class picker pre-fills the base price from this; the operator can
/// still override it per batch.
pub fn list_classes(config: &ConfigState) -> Vec<ClassEntry> {
    debug!("list_classes command");
    TicketClass::ALL
        .iter()
        .map(|&ticket_class| ClassEntry {
            ticket_class,
            default_price: ticket_class.default_price(),
            display_price: config.format_currency(ticket_class.default_price()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_classes() {
        let classes = list_classes(&ConfigState::default());
        let rows: Vec<(&str, &str)> = classes
            .iter()
            .map(|c| (c.ticket_class.as_str(), c.display_price.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![("PRIME", "₹15,000"), ("PLUS", "₹11,000"), ("ECONO", "₹2,500")]
        );
    }

    #[test]
    fn test_get_config_is_a_copy() {
        let config = ConfigState::default();
        assert_eq!(get_config(&config), config);
    }
}
