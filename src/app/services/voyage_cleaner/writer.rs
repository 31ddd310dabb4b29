//! Cleaned voyage file output
//!
//! Writes the export's own column layout back out as UTF-8 with `.` decimals
//! and normalized timestamps, followed by the derived duration column.

use super::stats::VoyageTable;
use crate::app::models::{VoyageRecord, format_timestamp};
use crate::constants::{VOYAGE_DELIMITER, columns};
use crate::{Error, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write a cleaned table to a semicolon-delimited file, returning the row count
pub fn write_cleaned(path: &Path, table: &VoyageTable) -> Result<usize> {
    let file = std::fs::File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

    let rows = write_cleaned_to(file, table)
        .map_err(|e| Error::csv_parsing(path.display().to_string(), e.to_string(), None))?;

    info!("Wrote {} cleaned voyages to {}", rows, path.display());
    Ok(rows)
}

/// Write a cleaned table to any writer
pub fn write_cleaned_to<W: Write>(writer: W, table: &VoyageTable) -> Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(VOYAGE_DELIMITER)
        .from_writer(writer);

    // A re-cleaned file already carries the duration column; it is always
    // written last
    let output_columns: Vec<&str> = table
        .columns
        .iter()
        .map(String::as_str)
        .filter(|column| *column != columns::TRAVEL_DURATION_HOURS)
        .collect();

    let mut header = output_columns.clone();
    header.push(columns::TRAVEL_DURATION_HOURS);
    csv_writer.write_record(&header)?;

    for record in &table.records {
        csv_writer.write_record(format_row(record, &output_columns))?;
    }

    csv_writer
        .flush()
        .map_err(|e| Error::io("Failed to flush cleaned output", e))?;

    Ok(table.records.len())
}

fn format_row(record: &VoyageRecord, output_columns: &[&str]) -> Vec<String> {
    let mut passthrough = record.passthrough.iter();
    let mut row = Vec::with_capacity(output_columns.len() + 1);

    for column in output_columns {
        let value = match *column {
            columns::SHIP_NAME => record.ship_name.clone().unwrap_or_default(),
            columns::DEPARTURE_PORT => record.departure_port.clone().unwrap_or_default(),
            columns::ARRIVAL_PORT => record.arrival_port.clone().unwrap_or_default(),
            columns::SCHEDULED_DEPARTURE => record
                .scheduled_departure
                .as_ref()
                .map(format_timestamp)
                .unwrap_or_default(),
            columns::ARRIVAL_TIME => record
                .arrival
                .as_ref()
                .map(format_timestamp)
                .unwrap_or_default(),
            other => match columns::NUMERIC_COLUMNS.iter().position(|c| *c == other) {
                Some(position) => format_decimal(record.numeric_fields()[position]),
                None => passthrough.next().cloned().unwrap_or_default(),
            },
        };
        row.push(value);
    }

    row.push(format_decimal(record.travel_duration_hours));
    row
}

/// Format an optional decimal with `.` as separator, empty when missing
pub fn format_decimal(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
