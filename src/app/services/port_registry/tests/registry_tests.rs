//! Tests for in-memory registry operations

use super::*;
use crate::app::models::PortCoordinate;
use crate::app::services::port_registry::PortRegistry;

#[test]
fn test_resolve_is_exact_and_case_sensitive() {
    let registry = PortRegistry::from_entries([PortCoordinate::new("Bergen", Some(coords(BERGEN)))]);

    assert_eq!(registry.resolve("Bergen"), Some(coords(BERGEN)));
    assert_eq!(registry.resolve("bergen"), None);
    assert_eq!(registry.resolve(" Bergen"), None);
    assert_eq!(registry.resolve("Oslo"), None);
}

#[test]
fn test_from_entries_keeps_first_duplicate() {
    let registry = PortRegistry::from_entries([
        PortCoordinate::new("Bergen", Some(coords(BERGEN))),
        PortCoordinate::new("Bergen", Some(coords(TROMSO))),
    ]);

    assert_eq!(registry.port_count(), 1);
    assert_eq!(registry.resolve("Bergen"), Some(coords(BERGEN)));
}

#[test]
fn test_not_found_entries_are_tracked() {
    let registry = PortRegistry::from_entries([
        PortCoordinate::new("Bergen", Some(coords(BERGEN))),
        PortCoordinate::new("Atlantis", None),
    ]);

    assert!(registry.contains_port("Atlantis"));
    assert!(!registry.is_resolved("Atlantis"));
    assert_eq!(registry.unresolved_ports(), vec!["Atlantis"]);
    assert_eq!(registry.resolved_count(), 1);
}

#[test]
fn test_merge_never_downgrades_resolved_entries() {
    let mut existing = PortRegistry::from_entries([
        PortCoordinate::new("Bergen", Some(coords(BERGEN))),
        PortCoordinate::new("Tromsø", None),
    ]);
    let update = PortRegistry::from_entries([
        PortCoordinate::new("Bergen", None),
        PortCoordinate::new("Tromsø", Some(coords(TROMSO))),
        PortCoordinate::new("Molde", None),
    ]);

    existing.merge(update);

    let names: Vec<String> = existing.entries().into_iter().map(|e| e.port).collect();
    assert_eq!(names, vec!["Bergen", "Tromsø", "Molde"]);
    assert_eq!(existing.resolve("Bergen"), Some(coords(BERGEN)));
    assert_eq!(existing.resolve("Tromsø"), Some(coords(TROMSO)));
    assert!(existing.contains_port("Molde"));
}
