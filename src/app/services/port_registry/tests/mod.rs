//! Shared test utilities and fixtures for port registry tests

use crate::app::models::{Coordinates, RouteRecord};
use std::fs;
use std::path::{Path, PathBuf};

pub mod loader_tests;
pub mod registry_tests;

pub const BERGEN: (f64, f64) = (60.39299, 5.32415);
pub const TROMSO: (f64, f64) = (69.6489, 18.95508);

pub fn coords(pair: (f64, f64)) -> Coordinates {
    Coordinates::new(pair.0, pair.1).unwrap()
}

/// Create a route with both port names set
pub fn create_test_route(ship: &str, from: &str, to: &str) -> RouteRecord {
    RouteRecord {
        ship_name: Some(ship.to_string()),
        departure_port: Some(from.to_string()),
        arrival_port: Some(to.to_string()),
        ..Default::default()
    }
}

/// Write a lookup file with the given body under a `Port,Latitude,Longitude` header
pub fn create_lookup_file(dir: &Path, body: &str) -> std::io::Result<PathBuf> {
    let path = dir.join("port_coordinates.csv");
    fs::write(&path, format!("Port,Latitude,Longitude\n{}", body))?;
    Ok(path)
}
