//! Enrich command implementation

use super::shared::{PipelineStats, load_configuration, print_stage, setup_logging};
use crate::app::models::{EnrichedRoute, RouteRecord};
use crate::app::services::port_registry::PortRegistry;
use crate::app::services::port_registry::join_coordinates;
use crate::app::services::port_registry::resolver::write_enriched_routes;
use crate::app::services::route_extractor::read_routes;
use crate::cli::args::EnrichArgs;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;
use std::time::Instant;

/// Run the enrich command
pub async fn run_enrich(args: EnrichArgs) -> Result<PipelineStats> {
    setup_logging(&args.common)?;
    let config = load_configuration(&args.common)?;

    let input = args.input.unwrap_or(config.paths.routes_output);
    let ports = args.ports.unwrap_or(config.paths.port_coordinates);
    let output = args.output.unwrap_or(config.paths.routes_with_coords);

    let start_time = Instant::now();
    let mut stats = PipelineStats::default();

    let routes = read_routes(&input)
        .with_context(|| format!("Failed to read routes {}", input.display()))?;
    let (registry, _) = PortRegistry::load_from_file(&ports)
        .with_context(|| format!("Failed to load port coordinates {}", ports.display()))?;
    enrich_stage(routes, &registry, &input, &output, &mut stats)?;

    stats.processing_time = start_time.elapsed();
    Ok(stats)
}

/// Join coordinates onto routes and write the enriched route file
pub fn enrich_stage(
    routes: Vec<RouteRecord>,
    registry: &PortRegistry,
    input: &Path,
    output: &Path,
    stats: &mut PipelineStats,
) -> Result<Vec<EnrichedRoute>> {
    print_stage("Resolving port coordinates", input, output);

    let (enriched, resolve_stats) = join_coordinates(routes, registry);
    write_enriched_routes(output, &enriched)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "  {} {}/{} routes plottable ({:.1}%)",
        "Resolved:".bright_cyan(),
        resolve_stats.fully_resolved.to_string().bright_white().bold(),
        resolve_stats.total_routes,
        resolve_stats.plottable_rate()
    );
    if !resolve_stats.unresolved_ports.is_empty() {
        println!(
            "  {} {}",
            "No coordinates:".bright_cyan(),
            resolve_stats.unresolved_ports.join(", ").yellow()
        );
    }

    stats.routes_plottable = resolve_stats.fully_resolved;
    stats.record_stage("enrich");
    Ok(enriched)
}
