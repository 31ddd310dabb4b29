//! Shared fixtures for route aggregation tests

use crate::app::models::{Coordinates, EnrichedRoute, RouteRecord};

pub mod aggregate_tests;

pub fn point(lat: f64, lon: f64) -> Option<Coordinates> {
    Some(Coordinates::new(lat, lon).unwrap())
}

/// Coordinates for the test ports; `C` is deliberately unresolved
pub fn port_coords(name: &str) -> Option<Coordinates> {
    match name {
        "A" => point(60.0, 5.0),
        "B" => point(62.0, 6.0),
        "D" => point(64.0, 7.0),
        _ => None,
    }
}

/// Build an enriched voyage between two named ports
pub fn voyage(from: &str, to: &str) -> EnrichedRoute {
    EnrichedRoute {
        route: RouteRecord {
            ship_name: Some(format!("{}-{}", from, to)),
            departure_port: Some(from.to_string()),
            arrival_port: Some(to.to_string()),
            ..Default::default()
        },
        departure_coords: port_coords(from),
        arrival_coords: port_coords(to),
    }
}
