//! Clean command implementation
//!
//! Reads the raw voyage export, repairs encoding damage, parses typed fields
//! and writes the semicolon-delimited cleaned file.

use super::shared::{PipelineStats, load_configuration, print_stage, setup_logging};
use crate::app::services::voyage_cleaner::{
    InputEncoding, VoyageCleaner, VoyageTable, write_cleaned,
};
use crate::cli::args::CleanArgs;
use crate::constants::PREVIEW_ROWS;
use crate::app::models::format_timestamp;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Run the clean command
pub async fn run_clean(args: CleanArgs) -> Result<PipelineStats> {
    setup_logging(&args.common)?;
    let mut config = load_configuration(&args.common)?;
    if let Some(encoding) = args.encoding {
        config = config.with_input_encoding(encoding.into());
    }

    let input = args.input.unwrap_or(config.paths.raw_input);
    let output = args.output.unwrap_or(config.paths.cleaned_output);

    let start_time = Instant::now();
    let mut stats = PipelineStats::default();
    let table = clean_stage(&input, &output, config.cleaning.input_encoding, &mut stats)?;

    print_preview(&table);
    print_missing_values(&table);

    stats.processing_time = start_time.elapsed();
    Ok(stats)
}

/// Clean `input` into `output`, returning the cleaned table
pub fn clean_stage(
    input: &Path,
    output: &Path,
    encoding: InputEncoding,
    stats: &mut PipelineStats,
) -> Result<VoyageTable> {
    print_stage("Cleaning voyage export", input, output);

    let result = VoyageCleaner::new(encoding)
        .clean_file(input)
        .with_context(|| format!("Failed to clean {}", input.display()))?;

    info!("{}", result.stats.summary());
    if result.stats.malformed_rows > 0 {
        warn!(
            "{} rows had the wrong number of fields and were kept with missing values",
            result.stats.malformed_rows
        );
    }
    for column in &result.stats.missing_columns {
        warn!("Expected column '{}' is absent from the export", column);
    }

    let written = write_cleaned(output, &result.table)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "  {} {} rows ({} timestamp failures, {} numeric failures, {} repaired fields)",
        "Cleaned:".bright_cyan(),
        written.to_string().bright_white().bold(),
        result.stats.timestamp_failures,
        result.stats.numeric_failures,
        result.stats.repaired_fields
    );

    stats.voyages_cleaned = written;
    stats.record_stage("clean");
    Ok(result.table)
}

fn print_preview(table: &VoyageTable) {
    if table.is_empty() {
        println!("\n{}", "No voyages in the export".yellow());
        return;
    }

    println!("\n{}", "Preview".bright_green().bold());
    for record in table.records.iter().take(PREVIEW_ROWS) {
        let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        let time = |value: &Option<chrono::DateTime<chrono::Utc>>| {
            value.as_ref().map(format_timestamp).unwrap_or_else(|| "-".to_string())
        };
        println!(
            "  {} {} -> {} ({} / {})",
            text(&record.ship_name).bright_white(),
            text(&record.departure_port),
            text(&record.arrival_port),
            time(&record.scheduled_departure),
            time(&record.arrival)
        );
    }
}

fn print_missing_values(table: &VoyageTable) {
    let missing: Vec<(String, usize)> = table
        .missing_value_summary()
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect();

    if missing.is_empty() {
        return;
    }

    println!("\n{}", "Missing values".bright_green().bold());
    for (column, count) in missing {
        println!(
            "  {} {}",
            format!("{}:", column).bright_cyan(),
            count.to_string().bright_white()
        );
    }
}
