//! Route projection of cleaned voyages
//!
//! Projects each voyage onto ship, ports and timestamps, and reads/writes the
//! comma-delimited route file.

use crate::app::models::{RouteRecord, VoyageRecord};
use crate::constants::{ROUTE_DELIMITER, columns};
use crate::{Error, Result};
use std::path::Path;
use tracing::info;

/// Project one voyage onto its route fields
pub fn extract_route_fields(record: &VoyageRecord) -> RouteRecord {
    RouteRecord {
        ship_name: record.ship_name.clone(),
        departure_port: record.departure_port.clone(),
        arrival_port: record.arrival_port.clone(),
        scheduled_departure: record.scheduled_departure,
        arrival: record.arrival,
    }
}

/// Project every voyage, preserving order and cardinality
pub fn extract_routes(records: &[VoyageRecord]) -> Vec<RouteRecord> {
    records.iter().map(extract_route_fields).collect()
}

/// Write routes to a comma-delimited file with the export's column names
pub fn write_routes(path: &Path, routes: &[RouteRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(ROUTE_DELIMITER)
        .from_path(path)
        .map_err(|e| Error::csv_parsing(path.display().to_string(), "Failed to create file", Some(e)))?;

    // serde writes the header with the first row; an empty file still needs one
    if routes.is_empty() {
        writer.write_record(columns::ROUTE_COLUMNS)?;
    }

    for route in routes {
        writer.serialize(route).map_err(|e| {
            Error::csv_parsing(path.display().to_string(), "Failed to write route", Some(e))
        })?;
    }

    writer
        .flush()
        .map_err(|e| Error::io(format!("Failed to flush {}", path.display()), e))?;

    info!("Wrote {} routes to {}", routes.len(), path.display());
    Ok(())
}

/// Read a route file written by [`write_routes`]
pub fn read_routes(path: &Path) -> Result<Vec<RouteRecord>> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(ROUTE_DELIMITER)
        .from_path(path)
        .map_err(|e| Error::csv_parsing(path.display().to_string(), "Failed to open file", Some(e)))?;

    let mut routes = Vec::new();
    for (row, result) in reader.deserialize::<RouteRecord>().enumerate() {
        let route = result.map_err(|e| {
            Error::csv_parsing(
                path.display().to_string(),
                format!("Invalid route at row {}", row + 1),
                Some(e),
            )
        })?;
        routes.push(route);
    }

    info!("Read {} routes from {}", routes.len(), path.display());
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn voyage(ship: &str, from: &str, to: &str) -> VoyageRecord {
        VoyageRecord {
            ship_name: Some(ship.to_string()),
            departure_port: Some(from.to_string()),
            arrival_port: Some(to.to_string()),
            scheduled_departure: Some(Utc.with_ymd_and_hms(2022, 1, 1, 10, 0, 0).unwrap()),
            arrival: Some(Utc.with_ymd_and_hms(2022, 1, 1, 13, 30, 0).unwrap()),
            gross_tonnage: Some(11204.0),
            travel_duration_hours: Some(3.5),
            passthrough: vec!["NO".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_route_fields_projects_route_columns() {
        let route = extract_route_fields(&voyage("Nordlys", "Bergen", "Tromsø"));

        assert_eq!(route.ship_name.as_deref(), Some("Nordlys"));
        assert_eq!(route.departure_port.as_deref(), Some("Bergen"));
        assert_eq!(route.arrival_port.as_deref(), Some("Tromsø"));
        assert_eq!(
            route.arrival,
            Some(Utc.with_ymd_and_hms(2022, 1, 1, 13, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_extract_routes_preserves_order_and_cardinality() {
        let voyages = vec![
            voyage("A", "Bergen", "Ålesund"),
            VoyageRecord::default(),
            voyage("C", "Molde", "Bergen"),
        ];
        let routes = extract_routes(&voyages);

        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0].ship_name.as_deref(), Some("A"));
        assert_eq!(routes[1], RouteRecord::default());
        assert_eq!(routes[2].departure_port.as_deref(), Some("Molde"));
    }

    #[test]
    fn test_route_file_round_trip_with_missing_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ship_routes.csv");

        let routes = vec![
            extract_route_fields(&voyage("Nordlys", "Bergen", "Tromsø")),
            RouteRecord {
                ship_name: Some("Richard With".to_string()),
                departure_port: Some("Kirkenes".to_string()),
                ..Default::default()
            },
        ];

        write_routes(&path, &routes).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "fartoynavn,avgangshavn_navn,ankomsthavn_navn,etd_estimert_avgangstidspunkt,ankomsttidspunkt"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Nordlys,Bergen,Tromsø,2022-01-01 10:00:00,2022-01-01 13:30:00"
        );
        assert_eq!(lines.next().unwrap(), "Richard With,Kirkenes,,,");

        assert_eq!(read_routes(&path).unwrap(), routes);
    }

    #[test]
    fn test_empty_route_file_keeps_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ship_routes.csv");

        write_routes(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("fartoynavn,avgangshavn_navn"));
        assert!(read_routes(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_routes_missing_file() {
        let err = read_routes(Path::new("/nonexistent/ship_routes.csv")).unwrap_err();
        assert!(err.is_file_not_found());
    }
}
