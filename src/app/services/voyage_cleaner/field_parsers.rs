//! Field parsing utilities for voyage export records
//!
//! Every parser here follows the same contract: malformed input yields `None`
//! instead of an error, so one bad cell never aborts a cleaning pass.

use super::column_mapping::ColumnMapping;
use crate::constants::{NAIVE_DATETIME_FORMATS, OFFSET_DATETIME_FORMATS};
use chrono::{DateTime, NaiveDateTime, Utc};
use csv::StringRecord;

/// Check whether a raw cell counts as missing (empty or whitespace only)
pub fn is_missing(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Parse a timestamp in any of the export's native forms.
///
/// Offset-carrying values are normalized to UTC; naive values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

/// Parse a decimal that may use a comma as decimal separator
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    value
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

/// Normalize a text cell: trimmed, `None` when blank
pub fn parse_text(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Get a raw field value from a CSV record by column name.
///
/// Returns `None` when the column is absent from the header or the row is
/// too short to contain it.
pub fn get_raw_field<'a>(
    record: &'a StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Option<&'a str> {
    mapping
        .get_index(field_name)
        .and_then(|index| record.get(index))
}

/// Get a non-blank, trimmed field value from a CSV record
pub fn get_optional_field<'a>(
    record: &'a StringRecord,
    mapping: &ColumnMapping,
    field_name: &str,
) -> Option<&'a str> {
    get_raw_field(record, mapping, field_name)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
