//! Voyage export cleaner for Kystverket "seilas" files
//!
//! This module turns the raw semicolon-delimited, Latin-1 encoded export into
//! typed [`VoyageRecord`](crate::app::models::VoyageRecord)s. Parsing is lenient
//! by design of the data: a malformed timestamp or number becomes a missing
//! value and the pass carries on.
//!
//! ## Architecture
//!
//! - [`cleaner`] - File decoding, row iteration and record assembly
//! - [`column_mapping`] - Header analysis (known vs carried-through columns)
//! - [`field_parsers`] - Timestamp, numeric and text field parsing
//! - [`encoding_repair`] - Lookup-table driven mojibake repair
//! - [`writer`] - Cleaned file output
//! - [`stats`] - Cleaning statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use maritime_routes::app::services::voyage_cleaner::{InputEncoding, VoyageCleaner};
//!
//! # fn example() -> maritime_routes::Result<()> {
//! let cleaner = VoyageCleaner::new(InputEncoding::Latin1);
//! let result = cleaner.clean_file(std::path::Path::new("seilas.csv"))?;
//!
//! println!("Cleaned {} voyages", result.stats.total_rows);
//! # Ok(())
//! # }
//! ```

pub mod cleaner;
pub mod column_mapping;
pub mod encoding_repair;
pub mod field_parsers;
pub mod stats;
pub mod writer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use cleaner::{InputEncoding, VoyageCleaner, compute_duration, decode_latin1};
pub use column_mapping::ColumnMapping;
pub use encoding_repair::repair_encoding;
pub use field_parsers::{parse_numeric, parse_timestamp};
pub use stats::{CleanResult, CleanStats, VoyageTable};
pub use writer::write_cleaned;
