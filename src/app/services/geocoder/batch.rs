//! Sequential batch geocoding of port names

use super::{Geocoder, RateLimiter};
use crate::app::services::port_registry::PortRegistry;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Outcome of a geocoding batch
#[derive(Debug, Clone, Default)]
pub struct GeocodeStats {
    /// Names sent to the provider
    pub requested: usize,

    /// Names resolved to coordinates
    pub found: usize,

    /// Names the provider answered with no match
    pub not_found: Vec<String>,

    /// Names whose request failed, with the failure message
    pub failed: Vec<(String, String)>,

    /// Time taken for the whole batch
    pub duration: Duration,
}

impl GeocodeStats {
    /// Names without coordinates after the batch, in request order
    pub fn unresolved(&self) -> Vec<&str> {
        self.not_found
            .iter()
            .map(String::as_str)
            .chain(self.failed.iter().map(|(name, _)| name.as_str()))
            .collect()
    }

    pub fn success_rate(&self) -> f64 {
        if self.requested == 0 {
            0.0
        } else {
            (self.found as f64 / self.requested as f64) * 100.0
        }
    }
}

/// Geocode every name in order, one request at a time.
///
/// Each failure or empty answer records the port as "not found" and the batch
/// moves on. A 429 answer additionally defers the next request by the
/// provider's `Retry-After`.
///
/// # Errors
/// * `Error::Authentication` if the provider rejects the credential
pub async fn geocode_ports<G>(
    geocoder: &G,
    names: &[String],
    limiter: &mut RateLimiter,
    show_progress: bool,
) -> Result<(PortRegistry, GeocodeStats)>
where
    G: Geocoder + ?Sized,
{
    let mut registry = PortRegistry::new();
    let stats = geocode_into(geocoder, names, limiter, &mut registry, None, show_progress).await?;
    Ok((registry, stats))
}

/// Geocode `names` into an existing registry.
///
/// With a `checkpoint` path the registry is rewritten there after every
/// lookup, so an interrupted batch leaves its finished lookups on disk for a
/// resumed run. A miss never overwrites coordinates already in `registry`.
///
/// # Errors
/// * `Error::Authentication` if the provider rejects the credential; lookups
///   finished before it stay in `registry` and the checkpoint
/// * `Error::Io` / `Error::CsvParsing` if the checkpoint cannot be written
pub async fn geocode_into<G>(
    geocoder: &G,
    names: &[String],
    limiter: &mut RateLimiter,
    registry: &mut PortRegistry,
    checkpoint: Option<&Path>,
    show_progress: bool,
) -> Result<GeocodeStats>
where
    G: Geocoder + ?Sized,
{
    let start_time = Instant::now();
    let mut stats = GeocodeStats::default();
    let mut seen = HashSet::new();

    info!(
        "Geocoding {} ports via {} ({:.1}s between requests)",
        names.len(),
        geocoder.provider_name(),
        limiter.min_interval().as_secs_f64()
    );

    let progress_bar = if show_progress && !names.is_empty() {
        let pb = ProgressBar::new(names.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Geocoding ports...");
        Some(pb)
    } else {
        None
    };

    for name in names {
        if !seen.insert(name.as_str()) {
            continue;
        }

        limiter.wait().await;
        stats.requested += 1;

        if let Some(ref pb) = progress_bar {
            pb.set_message(name.clone());
        }

        let coordinates = match geocoder.lookup(name).await {
            Ok(Some(coords)) => {
                stats.found += 1;
                Some(coords)
            }
            Ok(None) => {
                warn!("No geocoding result for '{}'", name);
                stats.not_found.push(name.clone());
                None
            }
            Err(e @ Error::Authentication { .. }) => {
                if let Some(pb) = progress_bar {
                    pb.abandon_with_message("Geocoding stopped");
                }
                error!(
                    "Stopping after {} of {} ports: {}",
                    stats.requested - 1,
                    names.len(),
                    e
                );
                return Err(e);
            }
            Err(e) => {
                if let Error::RateLimited { retry_after_secs } = &e {
                    limiter.back_off(Duration::from_secs(*retry_after_secs));
                }
                warn!("Geocoding failed for '{}': {}", name, e);
                stats.failed.push((name.clone(), e.to_string()));
                None
            }
        };
        registry.record(name.clone(), coordinates);

        if let Some(path) = checkpoint {
            registry.checkpoint(path)?;
        }

        if let Some(ref pb) = progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message(format!("Geocoded {} ports", stats.requested));
    }

    stats.duration = start_time.elapsed();
    info!(
        "Geocoding complete: {}/{} found ({:.1}%) in {:.1}s",
        stats.found,
        stats.requested,
        stats.success_rate(),
        stats.duration.as_secs_f64()
    );
    if !stats.not_found.is_empty() {
        warn!("Ports not found: {}", stats.not_found.join(", "));
    }
    if !stats.failed.is_empty() {
        let failed: Vec<&str> = stats.failed.iter().map(|(name, _)| name.as_str()).collect();
        warn!("Ports that failed to geocode: {}", failed.join(", "));
    }

    Ok(stats)
}

/// Names that still need a lookup: absent from `existing` or recorded as not found
pub fn pending_ports(names: &[String], existing: &PortRegistry) -> Vec<String> {
    names
        .iter()
        .filter(|name| !existing.is_resolved(name))
        .cloned()
        .collect()
}
