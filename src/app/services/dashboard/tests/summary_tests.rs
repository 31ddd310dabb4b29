//! Tests for headline metrics

use super::*;
use crate::app::services::dashboard::SummaryMetrics;
use crate::app::services::dashboard::summary::mode;

#[test]
fn test_summary_of_fleet() {
    let records = fleet();
    let summary = SummaryMetrics::from_records(&records);

    assert_eq!(summary.total_rows, 5);
    assert_eq!(summary.unique_ships, 4);
    assert_eq!(summary.most_frequent_departure.as_deref(), Some("Bergen"));
    assert_eq!(summary.most_frequent_arrival.as_deref(), Some("Bergen"));
}

#[test]
fn test_mode_tie_goes_to_smallest_name() {
    assert_eq!(mode(["Tromsø", "Bergen", "Tromsø", "Bergen"]), Some("Bergen".to_string()));
    assert_eq!(mode(["Molde"]), Some("Molde".to_string()));
    assert_eq!(mode(Vec::<&str>::new()), None);
}

#[test]
fn test_empty_summary() {
    let summary = SummaryMetrics::from_records(&Vec::<EnrichedRoute>::new());

    assert_eq!(summary, SummaryMetrics::default());
    assert!(summary.most_frequent_departure.is_none());
}
