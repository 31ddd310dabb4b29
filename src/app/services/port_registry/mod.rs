//! Port registry service for port-name to coordinate lookups
//!
//! This module holds the geocoded port lookup table and provides exact-name
//! resolution, plus the join that attaches endpoint coordinates to routes.
//! Lookups are case-sensitive and never normalize names: a port missing
//! verbatim from the table is unresolved.

use crate::app::models::{Coordinates, PortCoordinate};
use std::collections::HashMap;
use std::path::PathBuf;

pub mod loader;
pub mod resolver;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use loader::LoadStats;
pub use resolver::{ResolveStats, join_coordinates, unique_port_names};

/// Port registry providing O(1) coordinate lookups by port name
///
/// Entries keep their insertion order so the lookup file is written back in
/// the order ports were first geocoded.
#[derive(Debug, Clone, Default)]
pub struct PortRegistry {
    /// Coordinates indexed by exact port name; `None` marks "not found"
    pub(crate) ports: HashMap<String, Option<Coordinates>>,

    /// Port names in insertion order
    pub(crate) order: Vec<String>,

    /// File the registry was loaded from, if any
    pub(crate) source_path: Option<PathBuf>,
}

impl PortRegistry {
    /// Create a new empty port registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from lookup entries; the first entry per name wins
    pub fn from_entries(entries: impl IntoIterator<Item = PortCoordinate>) -> Self {
        let mut registry = Self::new();
        for entry in entries {
            registry.insert_if_absent(entry.port, entry.coordinates);
        }
        registry
    }

    /// Resolve a port name to coordinates (exact, case-sensitive)
    pub fn resolve(&self, port_name: &str) -> Option<Coordinates> {
        self.ports.get(port_name).copied().flatten()
    }

    /// Check if a port has any entry, resolved or not
    pub fn contains_port(&self, port_name: &str) -> bool {
        self.ports.contains_key(port_name)
    }

    /// Check if a port has an entry with coordinates
    pub fn is_resolved(&self, port_name: &str) -> bool {
        self.resolve(port_name).is_some()
    }

    /// Insert an entry unless the name is already present.
    ///
    /// Returns `true` when the entry was added.
    pub fn insert_if_absent(&mut self, port: String, coordinates: Option<Coordinates>) -> bool {
        if self.ports.contains_key(&port) {
            return false;
        }
        self.order.push(port.clone());
        self.ports.insert(port, coordinates);
        true
    }

    /// Insert or replace an entry, keeping the original position on replace
    pub fn upsert(&mut self, port: String, coordinates: Option<Coordinates>) {
        if !self.ports.contains_key(&port) {
            self.order.push(port.clone());
        }
        self.ports.insert(port, coordinates);
    }

    /// Record a lookup result; a miss never overwrites known coordinates
    pub fn record(&mut self, port: String, coordinates: Option<Coordinates>) {
        match self.ports.get(&port) {
            Some(Some(_)) if coordinates.is_none() => {}
            _ => self.upsert(port, coordinates),
        }
    }

    /// Merge entries from another registry; resolved entries from `other`
    /// replace unresolved ones here, and new names are appended
    pub fn merge(&mut self, other: PortRegistry) {
        for entry in other.entries() {
            self.record(entry.port, entry.coordinates);
        }
    }

    /// All entries in insertion order
    pub fn entries(&self) -> Vec<PortCoordinate> {
        self.order
            .iter()
            .map(|port| PortCoordinate::new(port.clone(), self.ports[port]))
            .collect()
    }

    /// Names recorded as "not found"
    pub fn unresolved_ports(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|port| self.ports[*port].is_none())
            .map(String::as_str)
            .collect()
    }

    /// Get the total number of ports in the registry
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Get the number of ports with coordinates
    pub fn resolved_count(&self) -> usize {
        self.ports.values().filter(|coords| coords.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn source_path(&self) -> Option<&std::path::Path> {
        self.source_path.as_deref()
    }
}
