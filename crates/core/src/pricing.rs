//! Paid service catalogue and price derivation.
//!
//! The total shown to the customer is never stored: it is always computed
//! from the current selection with [`total_price`].

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Service id constants
// ---------------------------------------------------------------------------

/// Astrology based name suggestions.
pub const SERVICE_ASTRO: &str = "astro";
/// Numerology compatibility report.
pub const SERVICE_NUMEROLOGY: &str = "numerology";

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// A purchasable add-on, priced in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u32,
}

/// All services offered by the premium form.
pub const CATALOG: &[Service] = &[
    Service {
        id: SERVICE_ASTRO,
        name: "Astrology Based Naming",
        price: 399,
    },
    Service {
        id: SERVICE_NUMEROLOGY,
        name: "Numerology Report",
        price: 150,
    },
];

/// Find a catalogue entry by id.
pub fn find_service(id: &str) -> Option<&'static Service> {
    CATALOG.iter().find(|s| s.id == id)
}

/// Resolve a service id, failing for ids outside the catalogue.
pub fn require_service(id: &str) -> Result<&'static Service, CoreError> {
    find_service(id).ok_or_else(|| CoreError::NotFound {
        entity: "service",
        id: id.to_string(),
    })
}

/// Sum of the prices of every selected service.
///
/// Ids outside the catalogue contribute nothing.
pub fn total_price<'a>(selected: impl IntoIterator<Item = &'a str>) -> u32 {
    selected
        .into_iter()
        .filter_map(find_service)
        .map(|s| s.price)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_costs_nothing() {
        assert_eq!(total_price(std::iter::empty()), 0);
    }

    #[test]
    fn astro_and_numerology_cost_549() {
        assert_eq!(total_price([SERVICE_ASTRO, SERVICE_NUMEROLOGY]), 549);
    }

    #[test]
    fn catalogue_entries_have_display_names() {
        let astro = find_service(SERVICE_ASTRO).unwrap();
        assert_eq!(astro.name, "Astrology Based Naming");
        assert_eq!(astro.price, 399);
        assert!(CATALOG.iter().all(|s| !s.name.is_empty()));
    }

    #[test]
    fn unknown_ids_are_ignored_in_totals() {
        assert_eq!(total_price([SERVICE_ASTRO, "tarot"]), 399);
    }

    #[test]
    fn require_service_rejects_unknown_id() {
        assert!(require_service(SERVICE_NUMEROLOGY).is_ok());
        let err = require_service("tarot").unwrap_err();
        assert_eq!(err.to_string(), "Not found: service 'tarot'");
    }
}
