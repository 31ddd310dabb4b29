//! Tests for batch geocoding and resume

use super::*;
use crate::app::models::PortCoordinate;
use crate::app::services::geocoder::{RateLimiter, geocode_into, geocode_ports, pending_ports};
use crate::app::services::port_registry::PortRegistry;
use std::time::Duration;
use tempfile::TempDir;

fn fast_limiter() -> RateLimiter {
    RateLimiter::new(Duration::from_millis(1))
}

#[tokio::test]
async fn test_batch_continues_past_failures() {
    let geocoder = FakeGeocoder::new()
        .with("Bergen", FakeAnswer::Found(60.39299, 5.32415))
        .with("Broken", FakeAnswer::Fail)
        .with("Tromsø", FakeAnswer::Found(69.6489, 18.95508));

    let (registry, stats) = geocode_ports(
        &geocoder,
        &names(&["Bergen", "Broken", "Atlantis", "Tromsø"]),
        &mut fast_limiter(),
        false,
    )
    .await
    .unwrap();

    assert_eq!(geocoder.call_names(), vec!["Bergen", "Broken", "Atlantis", "Tromsø"]);
    assert_eq!(registry.port_count(), 4);
    assert!(registry.is_resolved("Bergen"));
    assert!(registry.is_resolved("Tromsø"));
    assert!(registry.contains_port("Broken"));
    assert!(!registry.is_resolved("Broken"));
    assert!(!registry.is_resolved("Atlantis"));

    assert_eq!(stats.requested, 4);
    assert_eq!(stats.found, 2);
    assert_eq!(stats.not_found, vec!["Atlantis"]);
    assert_eq!(stats.failed.len(), 1);
    assert_eq!(stats.failed[0].0, "Broken");
    assert_eq!(stats.unresolved(), vec!["Atlantis", "Broken"]);
}

#[tokio::test]
async fn test_batch_keeps_request_order_in_registry() {
    let geocoder = FakeGeocoder::new().with("Molde", FakeAnswer::Found(62.73, 7.16));

    let (registry, _) = geocode_ports(
        &geocoder,
        &names(&["Molde", "Ålesund", "Molde"]),
        &mut fast_limiter(),
        false,
    )
    .await
    .unwrap();

    let ports: Vec<String> = registry.entries().into_iter().map(|e| e.port).collect();
    assert_eq!(ports, vec!["Molde", "Ålesund"]);
    assert_eq!(geocoder.call_names().len(), 2);
}

#[tokio::test]
async fn test_throttled_request_records_failure() {
    let geocoder = FakeGeocoder::new().with("Bergen", FakeAnswer::Throttle(0));

    let (registry, stats) =
        geocode_ports(&geocoder, &names(&["Bergen"]), &mut fast_limiter(), false)
            .await
            .unwrap();

    assert!(!registry.is_resolved("Bergen"));
    assert!(stats.failed[0].1.contains("rate limited"));
}

#[tokio::test]
async fn test_empty_batch() {
    let geocoder = FakeGeocoder::new();

    let (registry, stats) = geocode_ports(&geocoder, &[], &mut fast_limiter(), true)
        .await
        .unwrap();

    assert!(registry.is_empty());
    assert_eq!(stats.requested, 0);
    assert!(geocoder.call_names().is_empty());
}

#[tokio::test]
async fn test_resume_queries_only_missing_and_not_found() {
    let bergen = crate::app::models::Coordinates::new(60.39299, 5.32415).unwrap();
    let mut existing = PortRegistry::from_entries([
        PortCoordinate::new("Bergen", Some(bergen)),
        PortCoordinate::new("Atlantis", None),
    ]);
    let all = names(&["Bergen", "Atlantis", "Tromsø"]);

    let pending = pending_ports(&all, &existing);
    assert_eq!(pending, vec!["Atlantis", "Tromsø"]);

    let geocoder = FakeGeocoder::new().with("Tromsø", FakeAnswer::Found(69.6489, 18.95508));
    let (fresh, _) = geocode_ports(&geocoder, &pending, &mut fast_limiter(), false)
        .await
        .unwrap();
    existing.merge(fresh);

    assert_eq!(geocoder.call_names(), vec!["Atlantis", "Tromsø"]);
    assert_eq!(existing.resolve("Bergen"), Some(bergen));
    assert!(existing.is_resolved("Tromsø"));
    assert!(existing.contains_port("Atlantis"));

    // A second resume only retries the remaining not-found name
    assert_eq!(pending_ports(&all, &existing), vec!["Atlantis"]);
}

#[tokio::test]
async fn test_rejected_key_stops_batch() {
    let geocoder = FakeGeocoder::new()
        .with("Bergen", FakeAnswer::Found(60.39299, 5.32415))
        .with("Tromsø", FakeAnswer::Reject);
    let mut registry = PortRegistry::new();

    let err = geocode_into(
        &geocoder,
        &names(&["Bergen", "Tromsø", "Molde", "Ålesund"]),
        &mut fast_limiter(),
        &mut registry,
        None,
        false,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Authentication { status: 401 }));
    assert_eq!(geocoder.call_names(), vec!["Bergen", "Tromsø"]);
    assert!(registry.is_resolved("Bergen"));
    assert!(!registry.contains_port("Tromsø"));
}

#[tokio::test]
async fn test_interrupted_batch_keeps_checkpoint_for_resume() {
    let temp_dir = TempDir::new().unwrap();
    let lookup = temp_dir.path().join("port_coordinates.csv");
    let all = names(&["Bergen", "Atlantis", "Tromsø", "Molde"]);

    let stalled = FakeGeocoder::new()
        .with("Bergen", FakeAnswer::Found(60.39299, 5.32415))
        .with("Tromsø", FakeAnswer::Hang);
    let mut registry = PortRegistry::new();
    let mut limiter = fast_limiter();
    let run = geocode_into(&stalled, &all, &mut limiter, &mut registry, Some(&lookup), false);
    assert!(tokio::time::timeout(Duration::from_millis(200), run).await.is_err());

    let (saved, _) = PortRegistry::load_from_file(&lookup).unwrap();
    assert!(saved.is_resolved("Bergen"));
    assert!(saved.contains_port("Atlantis"));
    assert!(!saved.contains_port("Tromsø"));

    let pending = pending_ports(&all, &saved);
    assert_eq!(pending, vec!["Atlantis", "Tromsø", "Molde"]);

    let geocoder = FakeGeocoder::new()
        .with("Tromsø", FakeAnswer::Found(69.6489, 18.95508))
        .with("Molde", FakeAnswer::Found(62.73, 7.16));
    let mut resumed = saved;
    geocode_into(&geocoder, &pending, &mut fast_limiter(), &mut resumed, Some(&lookup), false)
        .await
        .unwrap();

    assert_eq!(geocoder.call_names(), vec!["Atlantis", "Tromsø", "Molde"]);
    let (reloaded, _) = PortRegistry::load_from_file(&lookup).unwrap();
    let ports: Vec<String> = reloaded.entries().into_iter().map(|e| e.port).collect();
    assert_eq!(ports, vec!["Bergen", "Atlantis", "Tromsø", "Molde"]);
    assert_eq!(reloaded.resolved_count(), 3);
}
