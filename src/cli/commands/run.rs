//! Run command implementation
//!
//! Chains every stage from the raw export to the dashboard, with all
//! intermediate files placed under one data directory.

use super::clean::clean_stage;
use super::dashboard::dashboard_stage;
use super::enrich::enrich_stage;
use super::geocode::geocode_stage;
use super::routes::routes_stage;
use super::shared::{PipelineStats, build_query, load_configuration, setup_logging};
use crate::app::services::geocoder::{Geocoder, OpenCageGeocoder};
use crate::app::services::port_registry::PortRegistry;
use crate::cli::args::{RunArgs, ViewArgs};
use crate::config::Config;
use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// How the run obtains port coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeMode {
    /// Query every port
    Full,
    /// Query only ports missing from the existing lookup file
    Resume,
    /// Reuse the existing lookup file as is
    Skip,
}

impl GeocodeMode {
    pub fn from_flags(skip_geocode: bool, resume: bool) -> Self {
        match (skip_geocode, resume) {
            (true, _) => Self::Skip,
            (false, true) => Self::Resume,
            (false, false) => Self::Full,
        }
    }
}

/// Run the full pipeline
pub async fn run_pipeline(args: RunArgs) -> Result<PipelineStats> {
    setup_logging(&args.common)?;
    let config = apply_run_paths(load_configuration(&args.common)?, &args);

    let mode = GeocodeMode::from_flags(args.skip_geocode, args.resume);
    let show_progress = args.common.show_progress();

    println!("{}", "Maritime Route Pipeline".bright_green().bold());
    println!(
        "  {} {}",
        "Raw export:".bright_cyan(),
        config.paths.raw_input.display()
    );

    match mode {
        GeocodeMode::Skip => {
            run_stages::<OpenCageGeocoder>(None, &config, &args.view, mode, show_progress).await
        }
        GeocodeMode::Full | GeocodeMode::Resume => {
            let geocoder = OpenCageGeocoder::from_config(&config.geocoding)?;
            run_stages(Some(&geocoder), &config, &args.view, mode, show_progress).await
        }
    }
}

/// Run every stage in order using the paths in `config`.
///
/// `geocoder` may be `None` only when `mode` is [`GeocodeMode::Skip`].
pub async fn run_stages<G>(
    geocoder: Option<&G>,
    config: &Config,
    view: &ViewArgs,
    mode: GeocodeMode,
    show_progress: bool,
) -> Result<PipelineStats>
where
    G: Geocoder + ?Sized,
{
    let start_time = Instant::now();
    let mut stats = PipelineStats::default();
    let paths = &config.paths;
    let query = build_query(config, view)?;

    for dir in parent_dirs(&[&paths.dashboard_output, &paths.routes_with_coords]) {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let table = clean_stage(
        &paths.raw_input,
        &paths.cleaned_output,
        config.cleaning.input_encoding,
        &mut stats,
    )?;

    let routes = routes_stage(
        &table.records,
        &paths.cleaned_output,
        &paths.routes_output,
        &paths.unique_ports,
        &mut stats,
    )?;
    drop(table);

    let registry = match (mode, geocoder) {
        (GeocodeMode::Skip, _) => {
            info!("Skipping geocoding, using {}", paths.port_coordinates.display());
            let (registry, _) = PortRegistry::load_from_file(&paths.port_coordinates)
                .with_context(|| {
                    format!(
                        "Failed to load port coordinates {}",
                        paths.port_coordinates.display()
                    )
                })?;
            stats.ports_geocoded = registry.resolved_count();
            registry
        }
        (_, Some(geocoder)) => {
            geocode_stage(
                geocoder,
                config,
                &paths.unique_ports,
                &paths.port_coordinates,
                mode == GeocodeMode::Resume,
                show_progress,
                &mut stats,
            )
            .await?
        }
        (_, None) => anyhow::bail!("A geocoder is required unless geocoding is skipped"),
    };

    let enriched = enrich_stage(
        routes,
        &registry,
        &paths.routes_output,
        &paths.routes_with_coords,
        &mut stats,
    )?;

    dashboard_stage(
        &enriched,
        &query,
        &paths.routes_with_coords,
        &paths.dashboard_output,
        &mut stats,
    )?;

    stats.processing_time = start_time.elapsed();
    Ok(stats)
}

/// Place every file under `--data-dir`; `--input` is taken as given, relative
/// to the working directory
pub fn apply_run_paths(mut config: Config, args: &RunArgs) -> Config {
    if let Some(dir) = &args.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(input) = &args.input {
        config.paths.raw_input = input.clone();
    }
    config
}

fn parent_dirs(paths: &[&PathBuf]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = paths
        .iter()
        .filter_map(|path| path.parent())
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(PathBuf::from)
        .collect();
    dirs.dedup();
    dirs
}
