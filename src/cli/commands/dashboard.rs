//! Dashboard command implementation
//!
//! Builds one dashboard view (summary metrics, route statistics, the table
//! page and map layers) from the enriched route file and writes it as JSON.

use super::shared::{PipelineStats, build_query, load_configuration, print_stage, setup_logging};
use crate::app::models::EnrichedRoute;
use crate::app::services::dashboard::{DashboardDocument, DashboardQuery};
use crate::app::services::port_registry::resolver::read_enriched_routes;
use crate::cli::args::DashboardArgs;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;
use std::time::Instant;

/// Route statistics rows printed to the terminal
const TOP_ROUTES: usize = 10;

/// Run the dashboard command
pub async fn run_dashboard(args: DashboardArgs) -> Result<PipelineStats> {
    setup_logging(&args.common)?;
    let config = load_configuration(&args.common)?;

    let input = args.input.clone().unwrap_or_else(|| config.paths.routes_with_coords.clone());
    let output = args.output.clone().unwrap_or_else(|| config.paths.dashboard_output.clone());
    let query = build_query(&config, &args.view)?;

    let start_time = Instant::now();
    let mut stats = PipelineStats::default();

    let records = read_enriched_routes(&input)
        .with_context(|| format!("Failed to read enriched routes {}", input.display()))?;
    dashboard_stage(&records, &query, &input, &output, &mut stats)?;

    stats.processing_time = start_time.elapsed();
    Ok(stats)
}

/// Build the dashboard view for `records` and write it to `output`
pub fn dashboard_stage(
    records: &[EnrichedRoute],
    query: &DashboardQuery,
    input: &Path,
    output: &Path,
    stats: &mut PipelineStats,
) -> Result<DashboardDocument> {
    print_stage("Building dashboard", input, output);

    let document = DashboardDocument::build(records, query);
    document
        .write_json(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    print_document(&document);

    stats.dashboard_rows = document.summary.total_rows;
    stats.record_stage("dashboard");
    Ok(document)
}

fn print_document(document: &DashboardDocument) {
    let summary = &document.summary;
    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    println!("\n{}", "Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Total voyages:".bright_cyan(),
        summary.total_rows.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Unique ships:".bright_cyan(),
        summary.unique_ships.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Busiest departure port:".bright_cyan(),
        or_dash(&summary.most_frequent_departure).bright_white()
    );
    println!(
        "  {} {}",
        "Busiest arrival port:".bright_cyan(),
        or_dash(&summary.most_frequent_arrival).bright_white()
    );

    if !document.route_stats.is_empty() {
        println!("\n{}", "Top routes".bright_green().bold());
        for edge in document.route_stats.iter().take(TOP_ROUTES) {
            println!(
                "  {:>6}  {} -> {}",
                edge.count.to_string().bright_white().bold(),
                edge.departure_port,
                edge.arrival_port
            );
        }
    }

    let table = &document.table;
    println!(
        "\n  {} {} of {} ({} rows)",
        "Table page:".bright_cyan(),
        table.page.page_number + 1,
        table.total_pages.max(1),
        table.total_rows
    );
    if document.map.unmapped_routes > 0 {
        println!(
            "  {} {}",
            "Routes without coordinates:".bright_cyan(),
            document.map.unmapped_routes.to_string().yellow()
        );
    }
}
