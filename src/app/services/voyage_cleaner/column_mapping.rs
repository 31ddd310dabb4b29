//! Column mapping for the fixed voyage export schema
//!
//! The export has a known set of interpreted columns; anything else in the
//! header is carried through to the cleaned file untouched. A repeated column
//! name is renamed `name.1`, `name.2`, ... and carried through as well.

use crate::constants::columns;
use csv::StringRecord;
use std::collections::HashMap;
use tracing::warn;

/// Header layout of a voyage export
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Column names in header order
    pub headers: Vec<String>,

    /// Column name to index mapping
    pub name_to_index: HashMap<String, usize>,

    /// Indexes of columns carried through verbatim, in header order
    pub passthrough_indexes: Vec<usize>,

    /// Interpreted columns absent from this header
    pub missing_columns: Vec<&'static str>,
}

impl ColumnMapping {
    /// Analyze the header row of an export
    pub fn analyze(headers: &StringRecord) -> Self {
        let mut names = Vec::with_capacity(headers.len());
        let mut name_to_index = HashMap::new();
        let mut passthrough_indexes = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            // Excel-produced exports may start with a byte order mark
            let mut column_name = header.trim().trim_start_matches('\u{feff}').to_string();

            if name_to_index.contains_key(&column_name) {
                let renamed = Self::dedupe_name(&column_name, &name_to_index);
                warn!(
                    "Duplicate column '{}' at position {}, carried through as '{}'",
                    column_name,
                    index + 1,
                    renamed
                );
                column_name = renamed;
            }

            if !Self::is_interpreted(&column_name) {
                passthrough_indexes.push(index);
            }
            name_to_index.insert(column_name.clone(), index);
            names.push(column_name);
        }

        let missing_columns = columns::KNOWN_COLUMNS
            .iter()
            .copied()
            .filter(|column| !name_to_index.contains_key(*column))
            .collect();

        ColumnMapping {
            headers: names,
            name_to_index,
            passthrough_indexes,
            missing_columns,
        }
    }

    fn dedupe_name(name: &str, taken: &HashMap<String, usize>) -> String {
        (1..)
            .map(|n| format!("{}.{}", name, n))
            .find(|candidate| !taken.contains_key(candidate))
            .unwrap_or_else(|| name.to_string())
    }

    /// Whether the cleaner parses this column itself
    ///
    /// The derived duration column counts as interpreted so that re-reading a
    /// cleaned file recomputes it instead of carrying a stale copy.
    pub fn is_interpreted(column_name: &str) -> bool {
        column_name == columns::TRAVEL_DURATION_HOURS
            || columns::KNOWN_COLUMNS.contains(&column_name)
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    /// Check if a column exists in the mapping
    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    /// Names of the carried-through columns in header order
    pub fn passthrough_columns(&self) -> Vec<String> {
        self.passthrough_indexes
            .iter()
            .map(|&index| self.headers[index].clone())
            .collect()
    }

    /// Get statistics about the column mapping: (total, interpreted, carried through)
    pub fn stats(&self) -> (usize, usize, usize) {
        let total = self.headers.len();
        let passthrough = self.passthrough_indexes.len();
        (total, total - passthrough, passthrough)
    }
}
