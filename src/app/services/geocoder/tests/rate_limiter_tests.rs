//! Tests for request spacing

use super::*;
use crate::app::services::geocoder::{RateLimiter, geocode_ports};
use std::time::Duration;

const INTERVAL: Duration = Duration::from_millis(200);

#[tokio::test]
async fn test_first_wait_is_immediate() {
    let mut limiter = RateLimiter::new(Duration::from_secs(5));
    let start = Instant::now();

    limiter.wait().await;

    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_consecutive_waits_are_spaced() {
    let mut limiter = RateLimiter::new(INTERVAL);
    let mut times = Vec::new();

    for _ in 0..3 {
        limiter.wait().await;
        times.push(Instant::now());
    }

    for pair in times.windows(2) {
        assert!(pair[1] - pair[0] >= INTERVAL);
    }
}

#[tokio::test]
async fn test_batch_requests_are_spaced_by_interval() {
    let geocoder = FakeGeocoder::new()
        .with("Bergen", FakeAnswer::Found(60.39, 5.32))
        .with("Tromsø", FakeAnswer::Found(69.65, 18.96));
    let mut limiter = RateLimiter::new(INTERVAL);
    let start = Instant::now();

    geocode_ports(&geocoder, &names(&["Bergen", "Tromsø", "Molde"]), &mut limiter, false)
        .await
        .unwrap();

    // N names need at least N-1 enforced gaps
    assert!(start.elapsed() >= INTERVAL * 2);
    let times = geocoder.call_times();
    assert_eq!(times.len(), 3);
    for pair in times.windows(2) {
        assert!(pair[1] - pair[0] >= INTERVAL);
    }
}

#[tokio::test]
async fn test_back_off_defers_next_slot() {
    let mut limiter = RateLimiter::new(Duration::from_millis(10));
    limiter.wait().await;
    limiter.back_off(INTERVAL);

    let start = Instant::now();
    limiter.wait().await;

    assert!(start.elapsed() >= INTERVAL - Duration::from_millis(20));
}

#[test]
fn test_default_interval_is_one_second() {
    assert_eq!(RateLimiter::default().min_interval(), Duration::from_secs(1));
}
