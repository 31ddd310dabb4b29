//! Routes command implementation

use super::shared::{PipelineStats, load_configuration, print_stage, setup_logging};
use crate::app::models::{RouteRecord, VoyageRecord};
use crate::app::services::port_registry::loader::write_port_list;
use crate::app::services::port_registry::unique_port_names;
use crate::app::services::route_extractor::{extract_routes, write_routes};
use crate::app::services::voyage_cleaner::{InputEncoding, VoyageCleaner};
use crate::cli::args::RoutesArgs;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;
use std::time::Instant;

/// Run the routes command
pub async fn run_routes(args: RoutesArgs) -> Result<PipelineStats> {
    setup_logging(&args.common)?;
    let config = load_configuration(&args.common)?;

    let input = args.input.unwrap_or(config.paths.cleaned_output);
    let output = args.output.unwrap_or(config.paths.routes_output);
    let ports = args.ports.unwrap_or(config.paths.unique_ports);

    let start_time = Instant::now();
    let mut stats = PipelineStats::default();

    let cleaned = VoyageCleaner::new(InputEncoding::Utf8)
        .clean_file(&input)
        .with_context(|| format!("Failed to read cleaned file {}", input.display()))?;
    routes_stage(&cleaned.table.records, &input, &output, &ports, &mut stats)?;

    stats.processing_time = start_time.elapsed();
    Ok(stats)
}

/// Project voyages onto routes and write the route file and distinct port list
pub fn routes_stage(
    voyages: &[VoyageRecord],
    input: &Path,
    output: &Path,
    ports_output: &Path,
    stats: &mut PipelineStats,
) -> Result<Vec<RouteRecord>> {
    print_stage("Extracting routes", input, output);

    let routes = extract_routes(voyages);
    write_routes(output, &routes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let ports = unique_port_names(&routes);
    write_port_list(ports_output, &ports)
        .with_context(|| format!("Failed to write {}", ports_output.display()))?;

    println!(
        "  {} {} routes, {} distinct ports",
        "Extracted:".bright_cyan(),
        routes.len().to_string().bright_white().bold(),
        ports.len().to_string().bright_white().bold()
    );
    println!("  {} {}", "Port list:".bright_cyan(), ports_output.display());

    stats.routes_extracted = routes.len();
    stats.ports_found = ports.len();
    stats.record_stage("routes");
    Ok(routes)
}
