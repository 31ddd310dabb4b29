//! Geocode command implementation
//!
//! Resolves every distinct port name to coordinates and writes the
//! `Port,Latitude,Longitude` lookup file. The file is rewritten after every
//! lookup, so an interrupted run can be continued with `--resume`, which only
//! queries ports that are missing or unresolved in the existing file.

use super::shared::{PipelineStats, load_configuration, print_stage, setup_logging};
use crate::app::services::geocoder::{
    Geocoder, OpenCageGeocoder, RateLimiter, geocode_into, pending_ports,
};
use crate::app::services::port_registry::PortRegistry;
use crate::app::services::port_registry::loader::read_port_list;
use crate::cli::args::GeocodeArgs;
use crate::config::Config;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Run the geocode command
pub async fn run_geocode(args: GeocodeArgs) -> Result<PipelineStats> {
    setup_logging(&args.common)?;
    let mut config = load_configuration(&args.common)?;
    if let Some(interval_ms) = args.interval_ms {
        config = config.with_min_interval_ms(interval_ms);
        config.validate()?;
    }

    let input = args.input.clone().unwrap_or_else(|| config.paths.unique_ports.clone());
    let output = args.output.clone().unwrap_or_else(|| config.paths.port_coordinates.clone());

    let start_time = Instant::now();
    let mut stats = PipelineStats::default();

    // Fails on a missing credential before any request is made
    let geocoder = OpenCageGeocoder::from_config(&config.geocoding)?;
    geocode_stage(
        &geocoder,
        &config,
        &input,
        &output,
        args.resume,
        args.common.show_progress(),
        &mut stats,
    )
    .await?;

    stats.processing_time = start_time.elapsed();
    Ok(stats)
}

/// Geocode the port list at `input` into the lookup file at `output`
pub async fn geocode_stage<G>(
    geocoder: &G,
    config: &Config,
    input: &Path,
    output: &Path,
    resume: bool,
    show_progress: bool,
    stats: &mut PipelineStats,
) -> Result<PortRegistry>
where
    G: Geocoder + ?Sized,
{
    print_stage("Geocoding ports", input, output);

    let names = read_port_list(input)
        .with_context(|| format!("Failed to read port list {}", input.display()))?;

    let (mut registry, to_query) = if resume && output.exists() {
        let (existing, _) = PortRegistry::load_from_file(output)
            .with_context(|| format!("Failed to load existing lookup file {}", output.display()))?;
        let pending = pending_ports(&names, &existing);
        info!(
            "Resuming: {} of {} ports still need coordinates",
            pending.len(),
            names.len()
        );
        (existing, pending)
    } else {
        if resume {
            warn!("No existing lookup file at {}, geocoding every port", output.display());
        }
        (PortRegistry::new(), names.clone())
    };

    let mut limiter = RateLimiter::new(config.geocoding.min_interval());
    let geocode_stats = geocode_into(
        geocoder,
        &to_query,
        &mut limiter,
        &mut registry,
        Some(output),
        show_progress,
    )
    .await
    .context("Geocoding stopped before every port was looked up")?;

    registry
        .write_to_file(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "  {} {}/{} ports ({:.1}%) in {:.1}s",
        "Geocoded:".bright_cyan(),
        geocode_stats.found.to_string().bright_white().bold(),
        geocode_stats.requested,
        geocode_stats.success_rate(),
        geocode_stats.duration.as_secs_f64()
    );
    let unresolved = geocode_stats.unresolved();
    if !unresolved.is_empty() {
        println!(
            "  {} {}",
            "Not found:".bright_cyan(),
            unresolved.join(", ").yellow()
        );
    }

    stats.ports_found = names.len();
    stats.ports_geocoded = registry.resolved_count();
    stats.record_stage("geocode");
    Ok(registry)
}
