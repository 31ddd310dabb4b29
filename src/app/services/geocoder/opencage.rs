//! OpenCage forward geocoding client

use super::Geocoder;
use crate::app::models::Coordinates;
use crate::config::GeocodingConfig;
use crate::constants::DEFAULT_RETRY_AFTER_SECS;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

/// HTTP client for the OpenCage geocoding API
#[derive(Debug, Clone)]
pub struct OpenCageGeocoder {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenCageGeocoder {
    /// Create a client for `base_url` authenticated with `api_key`
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("maritime-routes/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Create a client from geocoding configuration.
    ///
    /// # Errors
    /// * `Error::MissingCredential` if no API key is configured
    pub fn from_config(config: &GeocodingConfig) -> Result<Self> {
        let api_key = config.require_api_key()?;
        Self::new(
            config.base_url.clone(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Geocoder for OpenCageGeocoder {
    async fn lookup(&self, query: &str) -> Result<Option<Coordinates>> {
        debug!("Geocoding '{}'", query);

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("q", query), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| Error::geocoding(query, request_failure(e)))?;

        let response = check_response(query, response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| Error::geocoding(query, request_failure(e)))?;

        parse_response(query, &body)
    }

    fn provider_name(&self) -> &str {
        "OpenCage"
    }
}

/// Describe a transport failure without echoing the request URL (it carries the key)
fn request_failure(error: reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.without_url().to_string()
    }
}

/// Check an HTTP response for rate limiting, a rejected key and other non-success statuses
pub(crate) async fn check_response(
    query: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(Error::RateLimited {
            retry_after_secs: parse_retry_after(&response),
        });
    }
    if matches!(
        response.status(),
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN
    ) {
        return Err(Error::Authentication {
            status: response.status().as_u16(),
        });
    }
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::geocoding(
            query,
            format!("HTTP {}: {}", status, body.trim()),
        ));
    }
    Ok(response)
}

/// Parse the `Retry-After` header as seconds
pub(crate) fn parse_retry_after(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Parse a response body, taking the first result's coordinates.
///
/// An empty result list is "not found", not an error.
pub(crate) fn parse_response(query: &str, body: &str) -> Result<Option<Coordinates>> {
    let parsed: GeocodeResponse = serde_json::from_str(body)
        .map_err(|e| Error::geocoding(query, format!("Invalid response body: {}", e)))?;

    match parsed.results.into_iter().next() {
        Some(result) => Coordinates::new(result.geometry.lat, result.geometry.lng)
            .map(Some)
            .map_err(|e| Error::geocoding(query, e.to_string())),
        None => Ok(None),
    }
}
