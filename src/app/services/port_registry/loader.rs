//! Port registry loading and persistence
//!
//! Reads and writes the `Port,Latitude,Longitude` lookup file produced by the
//! geocoding pass, and the one-name-per-line list of distinct ports fed into it.

use super::PortRegistry;
use crate::app::models::Coordinates;
use crate::app::services::voyage_cleaner::field_parsers::parse_numeric;
use crate::constants::{ROUTE_DELIMITER, columns};
use crate::{Error, Result};
use csv::StringRecord;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Statistics about loading a lookup file
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Data rows read from the file
    pub rows_read: usize,

    /// Ports added to the registry
    pub ports_loaded: usize,

    /// Ports loaded with coordinates
    pub ports_resolved: usize,

    /// Rows ignored because the port name was already present
    pub duplicates_skipped: usize,

    /// Rows whose coordinates were present but invalid
    pub invalid_coordinates: usize,

    /// Time taken to load the file
    pub load_duration: Duration,

    /// Problems encountered while loading
    pub errors: Vec<String>,
}

impl LoadStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage of loaded ports that carry coordinates
    pub fn resolution_rate(&self) -> f64 {
        if self.ports_loaded == 0 {
            0.0
        } else {
            (self.ports_resolved as f64 / self.ports_loaded as f64) * 100.0
        }
    }
}

impl PortRegistry {
    /// Load the port coordinate lookup file
    ///
    /// # Errors
    /// * `Error::FileNotFound` if the file doesn't exist
    /// * `Error::CsvParsing` if the header lacks `Port`, `Latitude` or `Longitude`
    pub fn load_from_file(path: &Path) -> Result<(Self, LoadStats)> {
        info!("Loading port coordinates from {}", path.display());

        let start_time = Instant::now();
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(ROUTE_DELIMITER)
            .flexible(true)
            .from_path(path)
            .map_err(|e| {
                Error::csv_parsing(path.display().to_string(), "Failed to open file", Some(e))
            })?;

        let headers = reader
            .headers()
            .map_err(|e| {
                Error::csv_parsing(path.display().to_string(), "Failed to read header", Some(e))
            })?
            .clone();
        let indexes = LookupColumns::locate(&headers).ok_or_else(|| {
            Error::csv_parsing(
                path.display().to_string(),
                format!(
                    "Lookup file must have columns {}, {}, {}",
                    columns::PORT,
                    columns::LATITUDE,
                    columns::LONGITUDE
                ),
                None,
            )
        })?;

        let mut registry = Self::new();
        let mut stats = LoadStats::new();

        for result in reader.records() {
            stats.rows_read += 1;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping unreadable lookup row {}: {}", stats.rows_read, e);
                    stats.errors.push(format!("Row {}: {}", stats.rows_read, e));
                    continue;
                }
            };

            let Some(port) = record.get(indexes.port).and_then(exact_name) else {
                stats
                    .errors
                    .push(format!("Row {}: empty port name", stats.rows_read));
                continue;
            };

            let coordinates = Self::parse_coordinates(&record, &indexes, &port, &mut stats);

            if registry.insert_if_absent(port.clone(), coordinates) {
                stats.ports_loaded += 1;
                if coordinates.is_some() {
                    stats.ports_resolved += 1;
                }
            } else {
                warn!("Duplicate port '{}' in lookup file, keeping first entry", port);
                stats.duplicates_skipped += 1;
            }
        }

        registry.source_path = Some(path.to_path_buf());
        stats.load_duration = start_time.elapsed();

        info!(
            "Port registry loaded: {} ports ({} with coordinates, {:.1}%) in {:.2}s",
            stats.ports_loaded,
            stats.ports_resolved,
            stats.resolution_rate(),
            stats.load_duration.as_secs_f64()
        );

        Ok((registry, stats))
    }

    fn parse_coordinates(
        record: &StringRecord,
        indexes: &LookupColumns,
        port: &str,
        stats: &mut LoadStats,
    ) -> Option<Coordinates> {
        let lat_raw = record.get(indexes.latitude).unwrap_or_default();
        let lon_raw = record.get(indexes.longitude).unwrap_or_default();

        // Both empty is the "not found" marker written by the geocoding pass
        if lat_raw.trim().is_empty() && lon_raw.trim().is_empty() {
            debug!("Port '{}' recorded as not found", port);
            return None;
        }

        let coordinates = match (parse_numeric(lat_raw), parse_numeric(lon_raw)) {
            (Some(lat), Some(lon)) => Coordinates::new(lat, lon).ok(),
            _ => None,
        };

        if coordinates.is_none() {
            warn!(
                "Invalid coordinates for port '{}': lat='{}', lon='{}'; treating as unresolved",
                port, lat_raw, lon_raw
            );
            stats.invalid_coordinates += 1;
        }

        coordinates
    }

    /// Write the registry as a `Port,Latitude,Longitude` lookup file
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        self.write_entries(path)?;

        info!(
            "Wrote {} port coordinates ({} unresolved) to {}",
            self.port_count(),
            self.port_count() - self.resolved_count(),
            path.display()
        );
        Ok(())
    }

    /// Rewrite the lookup file with the entries gathered so far
    pub fn checkpoint(&self, path: &Path) -> Result<()> {
        self.write_entries(path)?;
        debug!("Checkpointed {} ports to {}", self.port_count(), path.display());
        Ok(())
    }

    fn write_entries(&self, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(ROUTE_DELIMITER)
            .from_path(path)
            .map_err(|e| {
                Error::csv_parsing(path.display().to_string(), "Failed to create file", Some(e))
            })?;

        writer.write_record([columns::PORT, columns::LATITUDE, columns::LONGITUDE])?;

        for entry in self.entries() {
            let (lat, lon) = match entry.coordinates {
                Some(coords) => (coords.lat.to_string(), coords.lon.to_string()),
                None => (String::new(), String::new()),
            };
            writer.write_record([entry.port.as_str(), lat.as_str(), lon.as_str()])?;
        }

        writer
            .flush()
            .map_err(|e| Error::io(format!("Failed to flush {}", path.display()), e))?;
        Ok(())
    }
}

/// Column positions of the lookup file
struct LookupColumns {
    port: usize,
    latitude: usize,
    longitude: usize,
}

impl LookupColumns {
    fn locate(headers: &StringRecord) -> Option<Self> {
        let position = |name: &str| headers.iter().position(|header| header.trim() == name);
        Some(Self {
            port: position(columns::PORT)?,
            latitude: position(columns::LATITUDE)?,
            longitude: position(columns::LONGITUDE)?,
        })
    }
}

/// Read a one-name-per-line port list, skipping blank lines; names are not trimmed
pub fn read_port_list(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

    Ok(content.lines().filter_map(exact_name).collect())
}

/// Port names are join keys and are kept verbatim; only blank names are dropped
fn exact_name(raw: &str) -> Option<String> {
    (!raw.trim().is_empty()).then(|| raw.to_string())
}

/// Write a one-name-per-line port list
pub fn write_port_list(path: &Path, ports: &[String]) -> Result<()> {
    let mut content = ports.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    std::fs::write(path, content)
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

    info!("Wrote {} distinct ports to {}", ports.len(), path.display());
    Ok(())
}
