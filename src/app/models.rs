//! Data models for maritime route processing
//!
//! This module contains the typed records flowing through the pipeline:
//! cleaned voyages, route projections, port coordinates and the aggregated
//! route/port tables consumed by the dashboard.

use crate::constants::OUTPUT_DATETIME_FORMAT;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Coordinates
// =============================================================================

/// A validated WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees, within [-90, 90]
    pub lat: f64,

    /// Longitude in decimal degrees, within [-180, 180]
    pub lon: f64,
}

impl Coordinates {
    /// Create a coordinate pair, rejecting out-of-range values
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::data_validation(format!(
                "Invalid latitude {}: must be between -90 and 90 degrees",
                lat
            )));
        }

        if !(-180.0..=180.0).contains(&lon) {
            return Err(Error::data_validation(format!(
                "Invalid longitude {}: must be between -180 and 180 degrees",
                lon
            )));
        }

        Ok(Self { lat, lon })
    }

    /// Build coordinates from an optional latitude/longitude pair.
    ///
    /// Both halves must be present and in range; anything else is absent.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).ok(),
            _ => None,
        }
    }

    /// Position in deck.gl order (longitude first)
    pub fn position(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

// =============================================================================
// Voyage Record
// =============================================================================

/// One voyage row of the export after cleaning
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoyageRecord {
    /// Vessel name (`fartoynavn`)
    pub ship_name: Option<String>,

    /// Departure port name (`avgangshavn_navn`), encoding repaired
    pub departure_port: Option<String>,

    /// Arrival port name (`ankomsthavn_navn`), encoding repaired
    pub arrival_port: Option<String>,

    /// Estimated time of departure (`etd_estimert_avgangstidspunkt`)
    pub scheduled_departure: Option<DateTime<Utc>>,

    /// Time of arrival (`ankomsttidspunkt`)
    pub arrival: Option<DateTime<Utc>>,

    pub build_year: Option<f64>,
    pub gross_tonnage: Option<f64>,
    pub deadweight_tonnage: Option<f64>,
    pub length: Option<f64>,
    pub breadth: Option<f64>,
    pub draught: Option<f64>,
    pub actual_draught: Option<f64>,

    /// Arrival minus departure in hours; absent when either timestamp is
    pub travel_duration_hours: Option<f64>,

    /// Columns the cleaner does not interpret, in header order
    pub passthrough: Vec<String>,
}

impl VoyageRecord {
    /// Numeric vessel attributes in export column order
    pub fn numeric_fields(&self) -> [Option<f64>; 7] {
        [
            self.build_year,
            self.gross_tonnage,
            self.deadweight_tonnage,
            self.length,
            self.breadth,
            self.draught,
            self.actual_draught,
        ]
    }

    /// Mutable access to a numeric attribute by its export column name
    pub fn numeric_field_mut(&mut self, column: &str) -> Option<&mut Option<f64>> {
        use crate::constants::columns;

        match column {
            columns::BUILD_YEAR => Some(&mut self.build_year),
            columns::GROSS_TONNAGE => Some(&mut self.gross_tonnage),
            columns::DEADWEIGHT_TONNAGE => Some(&mut self.deadweight_tonnage),
            columns::LENGTH => Some(&mut self.length),
            columns::BREADTH => Some(&mut self.breadth),
            columns::DRAUGHT => Some(&mut self.draught),
            columns::ACTUAL_DRAUGHT => Some(&mut self.actual_draught),
            _ => None,
        }
    }
}

// =============================================================================
// Route Records
// =============================================================================

/// Route-relevant projection of a voyage
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteRecord {
    #[serde(rename = "fartoynavn")]
    pub ship_name: Option<String>,

    #[serde(rename = "avgangshavn_navn")]
    pub departure_port: Option<String>,

    #[serde(rename = "ankomsthavn_navn")]
    pub arrival_port: Option<String>,

    #[serde(rename = "etd_estimert_avgangstidspunkt", with = "optional_timestamp")]
    pub scheduled_departure: Option<DateTime<Utc>>,

    #[serde(rename = "ankomsttidspunkt", with = "optional_timestamp")]
    pub arrival: Option<DateTime<Utc>>,
}

/// A route with the coordinates of both endpoints joined on
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnrichedRoute {
    pub route: RouteRecord,

    /// Coordinates of the departure port, if resolved
    pub departure_coords: Option<Coordinates>,

    /// Coordinates of the arrival port, if resolved
    pub arrival_coords: Option<Coordinates>,
}

impl EnrichedRoute {
    /// Whether both endpoints can be drawn on a map
    pub fn is_plottable(&self) -> bool {
        self.departure_coords.is_some() && self.arrival_coords.is_some()
    }

    pub fn departure_port(&self) -> Option<&str> {
        self.route.departure_port.as_deref()
    }

    pub fn arrival_port(&self) -> Option<&str> {
        self.route.arrival_port.as_deref()
    }
}

// =============================================================================
// Port Coordinates
// =============================================================================

/// A port name with its geocoded position, absent when the lookup failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortCoordinate {
    pub port: String,
    pub coordinates: Option<Coordinates>,
}

impl PortCoordinate {
    pub fn new(port: impl Into<String>, coordinates: Option<Coordinates>) -> Self {
        Self {
            port: port.into(),
            coordinates,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.coordinates.is_some()
    }
}

// =============================================================================
// Aggregated Tables
// =============================================================================

/// A directed port pair with the number of voyages sailing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEdge {
    pub departure_port: String,
    pub arrival_port: String,
    pub count: usize,
    pub source: Option<Coordinates>,
    pub target: Option<Coordinates>,
}

impl RouteEdge {
    /// Whether both endpoints have coordinates
    pub fn is_plottable(&self) -> bool {
        self.source.is_some() && self.target.is_some()
    }
}

/// A port appearing in the route graph with its traffic counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortNode {
    pub name: String,
    pub coordinates: Option<Coordinates>,
    pub departure_count: usize,
    pub arrival_count: usize,
}

impl PortNode {
    pub fn new(name: impl Into<String>, coordinates: Option<Coordinates>) -> Self {
        Self {
            name: name.into(),
            coordinates,
            departure_count: 0,
            arrival_count: 0,
        }
    }

    /// Total voyages touching this port
    pub fn total_traffic(&self) -> usize {
        self.departure_count + self.arrival_count
    }
}

// =============================================================================
// Timestamp Helpers
// =============================================================================

/// Format a timestamp the way every output file stores it
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(OUTPUT_DATETIME_FORMAT).to_string()
}

/// Serde adapter storing optional timestamps as `YYYY-MM-DD HH:MM:SS` strings.
///
/// Unparseable values deserialize to `None` rather than failing the row.
pub mod optional_timestamp {
    use crate::app::services::voyage_cleaner::field_parsers::parse_timestamp;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => serializer.serialize_str(&super::format_timestamp(timestamp)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_timestamp))
    }
}
