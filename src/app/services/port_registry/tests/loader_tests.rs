//! Tests for lookup file loading and persistence

use super::*;
use crate::app::models::PortCoordinate;
use crate::app::services::port_registry::PortRegistry;
use crate::app::services::port_registry::loader::{read_port_list, write_port_list};
use tempfile::TempDir;

#[test]
fn test_load_lookup_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_lookup_file(
        temp_dir.path(),
        "Bergen,60.39299,5.32415\nTromsø,69.6489,18.95508\nAtlantis,,\n",
    )
    .unwrap();

    let (registry, stats) = PortRegistry::load_from_file(&path).unwrap();

    assert_eq!(registry.port_count(), 3);
    assert_eq!(registry.resolve("Bergen"), Some(coords(BERGEN)));
    assert_eq!(registry.resolve("Tromsø"), Some(coords(TROMSO)));
    assert!(registry.contains_port("Atlantis"));
    assert_eq!(registry.resolve("Atlantis"), None);
    assert_eq!(registry.source_path(), Some(path.as_path()));

    assert_eq!(stats.rows_read, 3);
    assert_eq!(stats.ports_loaded, 3);
    assert_eq!(stats.ports_resolved, 2);
    assert!(stats.errors.is_empty());
}

#[test]
fn test_invalid_coordinates_load_as_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_lookup_file(
        temp_dir.path(),
        "Nowhere,123.0,5.0\nGarbled,abc,def\nHalf,60.0,\n",
    )
    .unwrap();

    let (registry, stats) = PortRegistry::load_from_file(&path).unwrap();

    assert_eq!(registry.port_count(), 3);
    assert_eq!(registry.resolved_count(), 0);
    assert_eq!(stats.invalid_coordinates, 3);
}

#[test]
fn test_duplicate_rows_keep_first() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_lookup_file(
        temp_dir.path(),
        "Bergen,60.39299,5.32415\nBergen,0.0,0.0\n",
    )
    .unwrap();

    let (registry, stats) = PortRegistry::load_from_file(&path).unwrap();

    assert_eq!(registry.resolve("Bergen"), Some(coords(BERGEN)));
    assert_eq!(stats.duplicates_skipped, 1);
}

#[test]
fn test_load_missing_file() {
    let err = PortRegistry::load_from_file(std::path::Path::new("/nonexistent/ports.csv"))
        .unwrap_err();
    assert!(err.is_file_not_found());
}

#[test]
fn test_load_rejects_wrong_header() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ports.csv");
    std::fs::write(&path, "Name,Lat,Lng\nBergen,60.0,5.0\n").unwrap();

    assert!(PortRegistry::load_from_file(&path).is_err());
}

#[test]
fn test_write_then_load_preserves_entries() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("port_coordinates.csv");
    let registry = PortRegistry::from_entries([
        PortCoordinate::new("Bergen", Some(coords(BERGEN))),
        PortCoordinate::new("Atlantis", None),
    ]);

    registry.write_to_file(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "Port,Latitude,Longitude\nBergen,60.39299,5.32415\nAtlantis,,\n"
    );

    let (reloaded, _) = PortRegistry::load_from_file(&path).unwrap();
    assert_eq!(reloaded.entries(), registry.entries());
}

#[test]
fn test_port_list_round_trip_skips_blank_lines() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("unique_ports.txt");

    write_port_list(&path, &["Bergen".to_string(), "Tromsø".to_string()]).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Bergen\nTromsø\n");

    std::fs::write(&path, "Bergen\n\n  \nTromsø\n").unwrap();
    assert_eq!(read_port_list(&path).unwrap(), vec!["Bergen", "Tromsø"]);
}

#[test]
fn test_lookup_names_are_kept_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_lookup_file(temp_dir.path(), " Bergen ,60.39299,5.32415\nTromsø,69.6489,18.95508\n").unwrap();

    let (registry, _) = PortRegistry::load_from_file(&path).unwrap();

    assert!(registry.is_resolved(" Bergen "));
    assert!(!registry.contains_port("Bergen"));
    assert_eq!(registry.resolve("Tromsø"), Some(coords(TROMSO)));

    let list = temp_dir.path().join("unique_ports.txt");
    std::fs::write(&list, " Bergen \r\nTromsø\n").unwrap();
    assert_eq!(read_port_list(&list).unwrap(), vec![" Bergen ", "Tromsø"]);
}
