//! Shared fixtures for dashboard tests

use crate::app::models::{Coordinates, EnrichedRoute, RouteRecord};
use chrono::{DateTime, TimeZone, Utc};

pub mod summary_tests;
pub mod table_tests;

pub fn port_coords(name: &str) -> Option<Coordinates> {
    let (lat, lon) = match name {
        "Bergen" => (60.4, 5.3),
        "Tromsø" => (69.6, 19.0),
        "Ålesund" => (62.5, 6.2),
        _ => return None,
    };
    Some(Coordinates::new(lat, lon).unwrap())
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 1, day, hour, 0, 0).unwrap()
}

pub fn voyage(ship: &str, from: &str, to: &str, etd: Option<DateTime<Utc>>) -> EnrichedRoute {
    EnrichedRoute {
        route: RouteRecord {
            ship_name: Some(ship.to_string()),
            departure_port: Some(from.to_string()),
            arrival_port: Some(to.to_string()),
            scheduled_departure: etd,
            arrival: etd.map(|t| t + chrono::Duration::hours(6)),
        },
        departure_coords: port_coords(from),
        arrival_coords: port_coords(to),
    }
}

/// A small fleet: Molde is never geocoded
pub fn fleet() -> Vec<EnrichedRoute> {
    vec![
        voyage("Nordlys", "Bergen", "Tromsø", Some(at(3, 9))),
        voyage("Polarlys", "Bergen", "Tromsø", Some(at(1, 21))),
        voyage("Nordlys", "Tromsø", "Bergen", Some(at(5, 7))),
        voyage("Kong Harald", "Bergen", "Molde", None),
        voyage("Richard With", "Ålesund", "Bergen", Some(at(2, 12))),
    ]
}
