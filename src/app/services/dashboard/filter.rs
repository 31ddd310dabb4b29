//! Free-text voyage filtering

use crate::app::models::EnrichedRoute;
use serde::{Deserialize, Serialize};

/// Case-insensitive substring filter on port and ship names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoyageFilter {
    /// Matches either the departure or the arrival port
    pub port: Option<String>,

    /// Matches the ship name
    pub ship: Option<String>,
}

impl VoyageFilter {
    /// Build a filter; blank terms are ignored
    pub fn new(port: Option<&str>, ship: Option<&str>) -> Self {
        Self {
            port: normalize_term(port),
            ship: normalize_term(ship),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.port.is_none() && self.ship.is_none()
    }

    /// Whether a record passes both terms (missing names never match a term)
    pub fn matches(&self, record: &EnrichedRoute) -> bool {
        let port_ok = match &self.port {
            Some(term) => {
                contains(record.departure_port(), term) || contains(record.arrival_port(), term)
            }
            None => true,
        };
        let ship_ok = match &self.ship {
            Some(term) => contains(record.route.ship_name.as_deref(), term),
            None => true,
        };
        port_ok && ship_ok
    }

    /// Records passing the filter, in input order
    pub fn apply(&self, records: &[EnrichedRoute]) -> Vec<EnrichedRoute> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Trim and lowercase a term, dropping it when blank
fn normalize_term(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn contains(value: Option<&str>, lowered_term: &str) -> bool {
    value.is_some_and(|v| v.to_lowercase().contains(lowered_term))
}
