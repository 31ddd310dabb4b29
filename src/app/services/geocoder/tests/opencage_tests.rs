//! Tests for OpenCage response handling

use crate::Error;
use crate::app::services::geocoder::OpenCageGeocoder;
use crate::app::services::geocoder::opencage::{check_response, parse_response, parse_retry_after};
use crate::config::GeocodingConfig;

fn mock_response(status: u16) -> reqwest::Response {
    reqwest::Response::from(::http::Response::builder().status(status).body("").unwrap())
}

fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
    reqwest::Response::from(
        ::http::Response::builder()
            .status(status)
            .header("Retry-After", value)
            .body("")
            .unwrap(),
    )
}

#[test]
fn test_parse_first_result() {
    let body = r#"{
        "results": [
            {"geometry": {"lat": 60.39299, "lng": 5.32415}, "formatted": "Bergen, Norway"},
            {"geometry": {"lat": 10.0, "lng": 10.0}}
        ],
        "status": {"code": 200, "message": "OK"}
    }"#;

    let coords = parse_response("Bergen", body).unwrap().unwrap();
    assert_eq!(coords.lat, 60.39299);
    assert_eq!(coords.lon, 5.32415);
}

#[test]
fn test_parse_empty_results_is_not_found() {
    assert_eq!(parse_response("Atlantis", r#"{"results": []}"#).unwrap(), None);
    assert_eq!(parse_response("Atlantis", r#"{}"#).unwrap(), None);
}

#[test]
fn test_parse_invalid_body() {
    let err = parse_response("Bergen", "<html>").unwrap_err();
    assert!(matches!(err, Error::Geocoding { .. }));
}

#[test]
fn test_parse_out_of_range_coordinates() {
    let body = r#"{"results": [{"geometry": {"lat": 95.0, "lng": 5.0}}]}"#;
    assert!(parse_response("Bergen", body).is_err());
}

#[test]
fn test_parse_retry_after() {
    assert_eq!(parse_retry_after(&mock_response_with_retry_after(429, "120")), 120);
    assert_eq!(parse_retry_after(&mock_response(429)), 60);
    assert_eq!(
        parse_retry_after(&mock_response_with_retry_after(429, "soon")),
        60
    );
}

#[tokio::test]
async fn test_check_response_rate_limited() {
    let err = check_response("Bergen", mock_response_with_retry_after(429, "30"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RateLimited { retry_after_secs: 30 }));
}

#[tokio::test]
async fn test_check_response_server_error() {
    let err = check_response("Bergen", mock_response(500)).await.unwrap_err();
    assert!(err.to_string().contains("HTTP 500"));
}

#[tokio::test]
async fn test_check_response_rejected_key() {
    for status in [401, 403] {
        let err = check_response("Bergen", mock_response(status)).await.unwrap_err();
        assert!(matches!(err, Error::Authentication { status: s } if s == status));
    }
}

#[tokio::test]
async fn test_check_response_success() {
    assert!(check_response("Bergen", mock_response(200)).await.is_ok());
}

#[test]
fn test_missing_api_key_fails_before_any_request() {
    let config = GeocodingConfig {
        api_key: None,
        ..Default::default()
    };

    let err = OpenCageGeocoder::from_config(&config).unwrap_err();
    assert!(matches!(err, Error::MissingCredential { .. }));
}

#[test]
fn test_from_config_with_key() {
    let config = GeocodingConfig {
        api_key: Some("test-key".to_string()),
        base_url: "http://127.0.0.1:9/geocode".to_string(),
        ..Default::default()
    };

    let geocoder = OpenCageGeocoder::from_config(&config).unwrap();
    assert_eq!(geocoder.base_url(), "http://127.0.0.1:9/geocode");
}
