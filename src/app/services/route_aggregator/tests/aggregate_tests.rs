//! Tests for scoped aggregation

use super::*;
use crate::app::services::route_aggregator::{AggregationScope, aggregate};

#[test]
fn test_all_scope_keeps_unmapped_routes() {
    let records = vec![voyage("A", "B"), voyage("A", "B"), voyage("A", "C")];

    let tables = aggregate(&records, AggregationScope::All);

    assert_eq!(tables.records_used, 3);
    assert_eq!(tables.edges.len(), 2);
    assert_eq!(tables.nodes.len(), 3);
    assert_eq!(tables.nodes[0].departure_count, 3);
}

#[test]
fn test_mapped_only_scope_drops_records_before_counting() {
    let records = vec![voyage("A", "B"), voyage("A", "B"), voyage("A", "C")];

    let tables = aggregate(&records, AggregationScope::MappedOnly);

    assert_eq!(tables.records_used, 2);
    assert_eq!(tables.edges.len(), 1);
    assert_eq!(tables.edges[0].count, 2);
    // A's departures are undercounted once unmapped voyages are dropped
    assert_eq!(tables.nodes[0].departure_count, 2);
    assert!(tables.nodes.iter().all(|n| n.name != "C"));
}

#[test]
fn test_empty_input_gives_empty_tables() {
    for scope in [AggregationScope::All, AggregationScope::MappedOnly] {
        let tables = aggregate(&[], scope);
        assert!(tables.edges.is_empty());
        assert!(tables.nodes.is_empty());
        assert_eq!(tables.records_used, 0);
    }
}

#[test]
fn test_scope_serialized_kebab_case() {
    assert_eq!(
        serde_json::to_string(&AggregationScope::MappedOnly).unwrap(),
        "\"mapped-only\""
    );
    assert_eq!(AggregationScope::default(), AggregationScope::All);
    assert_eq!(AggregationScope::All.as_str(), "all");
}
