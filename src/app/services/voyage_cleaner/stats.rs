//! Cleaning statistics and result structures for voyage exports
//!
//! This module provides types for tracking how much of an export parsed
//! cleanly and for carrying the cleaned table to downstream stages.

use crate::app::models::VoyageRecord;
use crate::constants::columns;

/// Cleaned voyages together with the export's column layout
#[derive(Debug, Clone, Default)]
pub struct VoyageTable {
    /// Export column names in header order
    pub columns: Vec<String>,

    /// Cleaned records, one per data row
    pub records: Vec<VoyageRecord>,
}

impl VoyageTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count missing values per interpreted column, in export order.
    ///
    /// Columns absent from the header are reported as missing for every row.
    pub fn missing_value_summary(&self) -> Vec<(String, usize)> {
        let count = |is_missing: fn(&VoyageRecord) -> bool| {
            self.records.iter().filter(|record| is_missing(record)).count()
        };

        let mut summary = vec![
            (
                columns::SHIP_NAME.to_string(),
                count(|r| r.ship_name.is_none()),
            ),
            (
                columns::DEPARTURE_PORT.to_string(),
                count(|r| r.departure_port.is_none()),
            ),
            (
                columns::ARRIVAL_PORT.to_string(),
                count(|r| r.arrival_port.is_none()),
            ),
            (
                columns::SCHEDULED_DEPARTURE.to_string(),
                count(|r| r.scheduled_departure.is_none()),
            ),
            (
                columns::ARRIVAL_TIME.to_string(),
                count(|r| r.arrival.is_none()),
            ),
        ];

        for (position, column) in columns::NUMERIC_COLUMNS.iter().enumerate() {
            let missing = self
                .records
                .iter()
                .filter(|record| record.numeric_fields()[position].is_none())
                .count();
            summary.push((column.to_string(), missing));
        }

        summary.push((
            columns::TRAVEL_DURATION_HOURS.to_string(),
            count(|r| r.travel_duration_hours.is_none()),
        ));

        summary
    }
}

/// Cleaning result with the table and basic statistics
#[derive(Debug, Clone)]
pub struct CleanResult {
    pub table: VoyageTable,
    pub stats: CleanStats,
}

/// Statistics gathered during one cleaning pass
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CleanStats {
    /// Number of data rows encountered
    pub total_rows: usize,

    /// Rows whose field count did not match the header or failed to tokenize
    pub malformed_rows: usize,

    /// Non-empty timestamps that could not be parsed
    pub timestamp_failures: usize,

    /// Non-empty numeric cells that could not be parsed
    pub numeric_failures: usize,

    /// Port name cells rewritten by the encoding repair
    pub repaired_fields: usize,

    /// Records with a computed travel duration
    pub durations_computed: usize,

    /// Interpreted columns absent from the header
    pub missing_columns: Vec<String>,

    /// Row-level problems for debugging
    pub errors: Vec<String>,
}

impl CleanStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage of rows that parsed with the expected structure
    pub fn structural_success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            100.0
        } else {
            ((self.total_rows - self.malformed_rows) as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Cleaned {} rows ({} malformed) | timestamp failures: {} | numeric failures: {} | \
             repaired port names: {} | durations: {}",
            self.total_rows,
            self.malformed_rows,
            self.timestamp_failures,
            self.numeric_failures,
            self.repaired_fields,
            self.durations_computed
        )
    }
}
