//! Maritime Routes Library
//!
//! A Rust library for turning Kystverket voyage exports ("seilas" data) into
//! port and route tables ready for map dashboards.
//!
//! This library provides tools for:
//! - Cleaning semicolon-delimited, Latin-1 encoded voyage exports with
//!   lenient timestamp/numeric parsing and mojibake repair
//! - Projecting voyages down to route records
//! - Geocoding distinct port names through a rate-limited external service
//! - Joining port coordinates onto routes without inventing defaults
//! - Aggregating route counts and per-port traffic for display
//! - Filtering, sorting and paginating the dashboard tables

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod dashboard;
        pub mod geocoder;
        pub mod port_registry;
        pub mod route_aggregator;
        pub mod route_extractor;
        pub mod voyage_cleaner;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    Coordinates, EnrichedRoute, PortCoordinate, PortNode, RouteEdge, RouteRecord, VoyageRecord,
};
pub use config::Config;

/// Result type alias for maritime route processing
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for maritime route processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing error
    #[error("CSV error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Required credential is absent
    #[error("Missing credential: set {variable} in the environment or a .env file")]
    MissingCredential { variable: String },

    /// Geocoding request failed
    #[error("Geocoding error for '{query}': {message}")]
    Geocoding { query: String, message: String },

    /// Geocoding provider throttled the client
    #[error("Geocoding provider rate limited the client (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// Geocoding provider rejected the credential
    #[error("Geocoding provider rejected the API key (HTTP {status})")]
    Authentication { status: u16 },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// JSON serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a missing credential error
    pub fn missing_credential(variable: impl Into<String>) -> Self {
        Self::MissingCredential {
            variable: variable.into(),
        }
    }

    /// Create a geocoding error
    pub fn geocoding(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Geocoding {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Check whether the error comes from a missing input file
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV processing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
