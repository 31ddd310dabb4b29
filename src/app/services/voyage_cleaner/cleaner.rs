//! Core voyage export cleaner
//!
//! Handles file decoding, CSV tokenizing and the per-row assembly of
//! [`VoyageRecord`]s from the interpreted columns.

use std::path::Path;
use tracing::{debug, info, warn};

use super::column_mapping::ColumnMapping;
use super::encoding_repair::repair_optional;
use super::field_parsers::{get_optional_field, get_raw_field, parse_numeric, parse_timestamp};
use super::stats::{CleanResult, CleanStats, VoyageTable};
use crate::app::models::VoyageRecord;
use crate::constants::{VOYAGE_DELIMITER, columns};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use csv::StringRecord;
use serde::{Deserialize, Serialize};

/// Character encoding of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputEncoding {
    /// ISO-8859-1, the encoding of the raw Kystverket export
    #[default]
    Latin1,
    /// UTF-8, the encoding of every file this tool writes
    Utf8,
}

/// Decode ISO-8859-1 bytes: every byte is the code point of the same value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}

/// Travel duration in hours between two timestamps
///
/// Missing when either timestamp is missing. A negative difference is a
/// genuine (if suspicious) source value and is returned as is.
pub fn compute_duration(
    departure: Option<DateTime<Utc>>,
    arrival: Option<DateTime<Utc>>,
) -> Option<f64> {
    match (departure, arrival) {
        (Some(departure), Some(arrival)) => {
            let seconds = (arrival - departure).num_milliseconds() as f64 / 1000.0;
            Some(seconds / 3600.0)
        }
        _ => None,
    }
}

/// Cleaner for semicolon-delimited voyage exports
#[derive(Debug, Clone, Default)]
pub struct VoyageCleaner {
    encoding: InputEncoding,
}

impl VoyageCleaner {
    /// Create a cleaner reading files in the given encoding
    pub fn new(encoding: InputEncoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> InputEncoding {
        self.encoding
    }

    /// Read and clean an export file
    pub fn clean_file(&self, file_path: &Path) -> Result<CleanResult> {
        info!("Cleaning voyage export: {}", file_path.display());

        if !file_path.exists() {
            return Err(Error::file_not_found(file_path.display().to_string()));
        }

        let bytes = std::fs::read(file_path).map_err(|e| {
            Error::io(format!("Failed to read file {}", file_path.display()), e)
        })?;

        let result = self.clean_bytes(&bytes)?;
        info!("{}", result.stats.summary());
        Ok(result)
    }

    /// Decode raw bytes and clean them
    pub fn clean_bytes(&self, bytes: &[u8]) -> Result<CleanResult> {
        let content = match self.encoding {
            InputEncoding::Latin1 => decode_latin1(bytes),
            InputEncoding::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| {
                Error::data_validation(format!("Input is not valid UTF-8: {}", e))
            })?,
        };

        self.clean_str(&content)
    }

    /// Clean already-decoded export content
    pub fn clean_str(&self, content: &str) -> Result<CleanResult> {
        let mut stats = CleanStats::new();
        let mut records = Vec::new();

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(VOYAGE_DELIMITER)
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::csv_parsing("<input>", "Failed to read header row", Some(e)))?
            .clone();

        let mapping = ColumnMapping::analyze(&headers);
        let (total_cols, interpreted_cols, passthrough_cols) = mapping.stats();
        debug!(
            "Column mapping: {} total, {} interpreted, {} carried through",
            total_cols, interpreted_cols, passthrough_cols
        );

        if !mapping.missing_columns.is_empty() {
            warn!(
                "Export is missing expected columns (values will be empty): {}",
                mapping.missing_columns.join(", ")
            );
            stats.missing_columns = mapping
                .missing_columns
                .iter()
                .map(|column| column.to_string())
                .collect();
        }

        for result in csv_reader.records() {
            stats.total_rows += 1;

            match result {
                Ok(record) => {
                    if record.len() != mapping.headers.len() {
                        stats.malformed_rows += 1;
                        stats.errors.push(format!(
                            "Row {}: expected {} fields, found {}",
                            stats.total_rows,
                            mapping.headers.len(),
                            record.len()
                        ));
                    }
                    records.push(self.clean_record(&record, &mapping, &mut stats));
                }
                Err(e) => {
                    // Keep the row so downstream counts match the export
                    stats.malformed_rows += 1;
                    stats
                        .errors
                        .push(format!("CSV parse error at row {}: {}", stats.total_rows, e));
                    records.push(VoyageRecord {
                        passthrough: vec![String::new(); mapping.passthrough_indexes.len()],
                        ..Default::default()
                    });
                }
            }
        }

        Ok(CleanResult {
            table: VoyageTable {
                columns: mapping.headers.clone(),
                records,
            },
            stats,
        })
    }

    /// Build one cleaned record from a tokenized row
    pub fn clean_record(
        &self,
        record: &StringRecord,
        mapping: &ColumnMapping,
        stats: &mut CleanStats,
    ) -> VoyageRecord {
        let text = |column: &str| get_optional_field(record, mapping, column).map(str::to_string);

        let (departure_port, departure_repaired) = repair_optional(text(columns::DEPARTURE_PORT));
        let (arrival_port, arrival_repaired) = repair_optional(text(columns::ARRIVAL_PORT));
        stats.repaired_fields += usize::from(departure_repaired) + usize::from(arrival_repaired);

        let scheduled_departure =
            Self::timestamp_field(record, mapping, columns::SCHEDULED_DEPARTURE, stats);
        let arrival = Self::timestamp_field(record, mapping, columns::ARRIVAL_TIME, stats);

        let travel_duration_hours = compute_duration(scheduled_departure, arrival);
        if travel_duration_hours.is_some() {
            stats.durations_computed += 1;
        }

        let mut voyage = VoyageRecord {
            ship_name: text(columns::SHIP_NAME),
            departure_port,
            arrival_port,
            scheduled_departure,
            arrival,
            travel_duration_hours,
            passthrough: mapping
                .passthrough_indexes
                .iter()
                .map(|&index| record.get(index).unwrap_or_default().to_string())
                .collect(),
            ..Default::default()
        };

        for column in columns::NUMERIC_COLUMNS {
            let value = Self::numeric_field(record, mapping, column, stats);
            if let Some(field) = voyage.numeric_field_mut(column) {
                *field = value;
            }
        }

        voyage
    }

    fn timestamp_field(
        record: &StringRecord,
        mapping: &ColumnMapping,
        column: &str,
        stats: &mut CleanStats,
    ) -> Option<DateTime<Utc>> {
        let raw = get_optional_field(record, mapping, column)?;
        let parsed = parse_timestamp(raw);
        if parsed.is_none() {
            debug!("Failed to parse timestamp '{}' = '{}'", column, raw);
            stats.timestamp_failures += 1;
        }
        parsed
    }

    fn numeric_field(
        record: &StringRecord,
        mapping: &ColumnMapping,
        column: &str,
        stats: &mut CleanStats,
    ) -> Option<f64> {
        let raw = get_raw_field(record, mapping, column)?;
        if raw.trim().is_empty() {
            return None;
        }
        let parsed = parse_numeric(raw);
        if parsed.is_none() {
            debug!("Failed to parse numeric '{}' = '{}'", column, raw.trim());
            stats.numeric_failures += 1;
        }
        parsed
    }
}
