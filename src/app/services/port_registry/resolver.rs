//! Coordinate join between routes and the port registry
//!
//! Attaches departure and arrival coordinates to every route. Unresolved
//! ports stay `None` all the way through; nothing here substitutes a default
//! position.

use super::PortRegistry;
use crate::app::models::{Coordinates, EnrichedRoute, RouteRecord, optional_timestamp};
use crate::constants::{ROUTE_DELIMITER, columns};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// Statistics for a coordinate join
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveStats {
    /// Routes processed
    pub total_routes: usize,

    /// Routes with both endpoints resolved
    pub fully_resolved: usize,

    /// Routes with departure coordinates
    pub departures_resolved: usize,

    /// Routes with arrival coordinates
    pub arrivals_resolved: usize,

    /// Distinct port names without coordinates, sorted
    pub unresolved_ports: Vec<String>,
}

impl ResolveStats {
    /// Percentage of routes that can be drawn on a map
    pub fn plottable_rate(&self) -> f64 {
        if self.total_routes == 0 {
            0.0
        } else {
            (self.fully_resolved as f64 / self.total_routes as f64) * 100.0
        }
    }
}

/// Distinct port names across departure and arrival columns, first-seen order
pub fn unique_port_names(routes: &[RouteRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    let departures = routes.iter().filter_map(|r| r.departure_port.as_deref());
    let arrivals = routes.iter().filter_map(|r| r.arrival_port.as_deref());

    for name in departures.chain(arrivals) {
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }

    debug!("Found {} distinct ports in {} routes", names.len(), routes.len());
    names
}

/// Join endpoint coordinates onto routes
pub fn join_coordinates(
    routes: Vec<RouteRecord>,
    registry: &PortRegistry,
) -> (Vec<EnrichedRoute>, ResolveStats) {
    let mut stats = ResolveStats {
        total_routes: routes.len(),
        ..Default::default()
    };
    let mut unresolved = BTreeSet::new();

    let mut lookup = |port: Option<&str>| -> Option<Coordinates> {
        let port = port?;
        let coords = registry.resolve(port);
        if coords.is_none() {
            unresolved.insert(port.to_string());
        }
        coords
    };

    let enriched: Vec<EnrichedRoute> = routes
        .into_iter()
        .map(|route| {
            let departure_coords = lookup(route.departure_port.as_deref());
            let arrival_coords = lookup(route.arrival_port.as_deref());
            EnrichedRoute {
                route,
                departure_coords,
                arrival_coords,
            }
        })
        .collect();

    for route in &enriched {
        stats.departures_resolved += usize::from(route.departure_coords.is_some());
        stats.arrivals_resolved += usize::from(route.arrival_coords.is_some());
        stats.fully_resolved += usize::from(route.is_plottable());
    }
    stats.unresolved_ports = unresolved.into_iter().collect();

    if !stats.unresolved_ports.is_empty() {
        warn!(
            "{} ports have no coordinates: {}",
            stats.unresolved_ports.len(),
            stats.unresolved_ports.join(", ")
        );
    }
    info!(
        "Joined coordinates onto {} routes ({:.1}% plottable)",
        stats.total_routes,
        stats.plottable_rate()
    );

    (enriched, stats)
}

/// Flat row layout of the enriched route file
#[derive(Debug, Serialize, Deserialize)]
struct EnrichedRow {
    #[serde(rename = "fartoynavn")]
    ship_name: Option<String>,
    #[serde(rename = "avgangshavn_navn")]
    departure_port: Option<String>,
    #[serde(rename = "ankomsthavn_navn")]
    arrival_port: Option<String>,
    #[serde(rename = "etd_estimert_avgangstidspunkt", with = "optional_timestamp")]
    scheduled_departure: Option<DateTime<Utc>>,
    #[serde(rename = "ankomsttidspunkt", with = "optional_timestamp")]
    arrival: Option<DateTime<Utc>>,
    dep_lat: Option<f64>,
    dep_lon: Option<f64>,
    arr_lat: Option<f64>,
    arr_lon: Option<f64>,
}

impl From<&EnrichedRoute> for EnrichedRow {
    fn from(enriched: &EnrichedRoute) -> Self {
        let route = &enriched.route;
        Self {
            ship_name: route.ship_name.clone(),
            departure_port: route.departure_port.clone(),
            arrival_port: route.arrival_port.clone(),
            scheduled_departure: route.scheduled_departure,
            arrival: route.arrival,
            dep_lat: enriched.departure_coords.map(|c| c.lat),
            dep_lon: enriched.departure_coords.map(|c| c.lon),
            arr_lat: enriched.arrival_coords.map(|c| c.lat),
            arr_lon: enriched.arrival_coords.map(|c| c.lon),
        }
    }
}

impl From<EnrichedRow> for EnrichedRoute {
    fn from(row: EnrichedRow) -> Self {
        Self {
            route: RouteRecord {
                ship_name: row.ship_name,
                departure_port: row.departure_port,
                arrival_port: row.arrival_port,
                scheduled_departure: row.scheduled_departure,
                arrival: row.arrival,
            },
            departure_coords: Coordinates::from_parts(row.dep_lat, row.dep_lon),
            arrival_coords: Coordinates::from_parts(row.arr_lat, row.arr_lon),
        }
    }
}

const ENRICHED_COLUMNS: &[&str] = &[
    columns::SHIP_NAME,
    columns::DEPARTURE_PORT,
    columns::ARRIVAL_PORT,
    columns::SCHEDULED_DEPARTURE,
    columns::ARRIVAL_TIME,
    columns::DEPARTURE_LAT,
    columns::DEPARTURE_LON,
    columns::ARRIVAL_LAT,
    columns::ARRIVAL_LON,
];

/// Write enriched routes: route columns plus `dep_lat,dep_lon,arr_lat,arr_lon`
pub fn write_enriched_routes(path: &Path, routes: &[EnrichedRoute]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(ROUTE_DELIMITER)
        .from_path(path)
        .map_err(|e| Error::csv_parsing(path.display().to_string(), "Failed to create file", Some(e)))?;

    if routes.is_empty() {
        writer.write_record(ENRICHED_COLUMNS)?;
    }

    for route in routes {
        writer.serialize(EnrichedRow::from(route)).map_err(|e| {
            Error::csv_parsing(path.display().to_string(), "Failed to write route", Some(e))
        })?;
    }

    writer
        .flush()
        .map_err(|e| Error::io(format!("Failed to flush {}", path.display()), e))?;

    info!("Wrote {} enriched routes to {}", routes.len(), path.display());
    Ok(())
}

/// Read an enriched route file
pub fn read_enriched_routes(path: &Path) -> Result<Vec<EnrichedRoute>> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(ROUTE_DELIMITER)
        .from_path(path)
        .map_err(|e| Error::csv_parsing(path.display().to_string(), "Failed to open file", Some(e)))?;

    let mut routes = Vec::new();
    for (row, result) in reader.deserialize::<EnrichedRow>().enumerate() {
        let parsed = result.map_err(|e| {
            Error::csv_parsing(
                path.display().to_string(),
                format!("Invalid enriched route at row {}", row + 1),
                Some(e),
            )
        })?;
        routes.push(EnrichedRoute::from(parsed));
    }

    info!("Read {} enriched routes from {}", routes.len(), path.display());
    Ok(routes)
}
