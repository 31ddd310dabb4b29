//! Configuration management and validation.
//!
//! Provides configuration structures for file locations, cleaning, geocoding
//! and dashboard settings. Values are layered: built-in defaults, then a TOML
//! file, then the environment (`API_KEY`, optionally from a `.env` file), then
//! command-line overrides applied by the CLI.

use crate::app::services::route_aggregator::AggregationScope;
use crate::app::services::voyage_cleaner::InputEncoding;
use crate::constants::*;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Main configuration structure for the maritime route pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output file locations
    pub paths: PathsConfig,

    /// Export cleaning settings
    pub cleaning: CleaningConfig,

    /// Geocoding provider settings
    pub geocoding: GeocodingConfig,

    /// Dashboard view settings
    pub dashboard: DashboardConfig,
}

/// File locations for every pipeline stage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub raw_input: PathBuf,
    pub cleaned_output: PathBuf,
    pub routes_output: PathBuf,
    pub unique_ports: PathBuf,
    pub port_coordinates: PathBuf,
    pub routes_with_coords: PathBuf,
    pub dashboard_output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_input: PathBuf::from(DEFAULT_RAW_INPUT),
            cleaned_output: PathBuf::from(DEFAULT_CLEANED_OUTPUT),
            routes_output: PathBuf::from(DEFAULT_ROUTES_OUTPUT),
            unique_ports: PathBuf::from(DEFAULT_UNIQUE_PORTS),
            port_coordinates: PathBuf::from(DEFAULT_PORT_COORDINATES),
            routes_with_coords: PathBuf::from(DEFAULT_ROUTES_WITH_COORDS),
            dashboard_output: PathBuf::from(DEFAULT_DASHBOARD_OUTPUT),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Encoding of the raw export
    pub input_encoding: InputEncoding,
}

/// Geocoding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Forward geocoding endpoint
    pub base_url: String,

    /// Provider credential; never written back out
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Minimum delay between requests in milliseconds
    pub min_interval_ms: u64,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            api_key: None,
            min_interval_ms: MIN_GEOCODE_INTERVAL_MS,
            timeout_secs: DEFAULT_GEOCODE_TIMEOUT_SECS,
        }
    }
}

impl GeocodingConfig {
    /// The configured API key.
    ///
    /// # Errors
    /// * `Error::MissingCredential` if no non-empty key is configured
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::missing_credential(API_KEY_ENV_VAR))
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

/// Dashboard view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Rows per table page
    pub page_size: usize,

    /// Port marker radius in meters
    pub scatter_radius: u32,

    /// Route arc width multiplier
    pub arc_width_scale: f64,

    /// Which records feed the route and port aggregates
    pub aggregation_scope: AggregationScope,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            scatter_radius: DEFAULT_SCATTER_RADIUS,
            arc_width_scale: DEFAULT_ARC_WIDTH_SCALE,
            aggregation_scope: AggregationScope::default(),
        }
    }
}

impl Config {
    /// Default config file location (`~/.config/maritime-routes/config.toml`)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from defaults, a TOML file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is used
    /// only when present. A `.env` file in the working directory is loaded
    /// before `API_KEY` is read.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path().filter(|path| path.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        config.apply_api_key(std::env::var(API_KEY_ENV_VAR).ok());

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;

        debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid configuration file: {}", e)))
    }

    /// Take the API key from the environment when one is set
    fn apply_api_key(&mut self, env_value: Option<String>) {
        if let Some(key) = env_value.filter(|key| !key.trim().is_empty()) {
            self.geocoding.api_key = Some(key);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.geocoding.base_url.trim().is_empty() {
            return Err(Error::configuration("Geocoding base_url cannot be empty"));
        }

        if self.geocoding.min_interval_ms < MIN_GEOCODE_INTERVAL_MS {
            return Err(Error::configuration(format!(
                "Geocoding min_interval_ms must be at least {} (got {})",
                MIN_GEOCODE_INTERVAL_MS, self.geocoding.min_interval_ms
            )));
        }

        if self.geocoding.timeout_secs == 0 {
            return Err(Error::configuration(
                "Geocoding timeout_secs must be greater than 0",
            ));
        }

        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.dashboard.page_size) {
            return Err(Error::configuration(format!(
                "Dashboard page_size must be between {} and {} (got {})",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE, self.dashboard.page_size
            )));
        }

        if !(MIN_SCATTER_RADIUS..=MAX_SCATTER_RADIUS).contains(&self.dashboard.scatter_radius) {
            return Err(Error::configuration(format!(
                "Dashboard scatter_radius must be between {} and {} (got {})",
                MIN_SCATTER_RADIUS, MAX_SCATTER_RADIUS, self.dashboard.scatter_radius
            )));
        }

        if !(MIN_ARC_WIDTH_SCALE..=MAX_ARC_WIDTH_SCALE).contains(&self.dashboard.arc_width_scale) {
            return Err(Error::configuration(format!(
                "Dashboard arc_width_scale must be between {} and {} (got {})",
                MIN_ARC_WIDTH_SCALE, MAX_ARC_WIDTH_SCALE, self.dashboard.arc_width_scale
            )));
        }

        Ok(())
    }

    /// Create configuration with an explicit API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.geocoding.api_key = Some(api_key.into());
        self
    }

    /// Create configuration with a custom request interval
    pub fn with_min_interval_ms(mut self, interval_ms: u64) -> Self {
        self.geocoding.min_interval_ms = interval_ms;
        self
    }

    /// Create configuration with a custom input encoding
    pub fn with_input_encoding(mut self, encoding: InputEncoding) -> Self {
        self.cleaning.input_encoding = encoding;
        self
    }

    /// Create configuration with a custom page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.dashboard.page_size = page_size;
        self
    }

    /// Create configuration with a custom aggregation scope
    pub fn with_aggregation_scope(mut self, scope: AggregationScope) -> Self {
        self.dashboard.aggregation_scope = scope;
        self
    }

    /// Create configuration with every file placed under `dir`
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        let paths = &mut self.paths;
        for path in [
            &mut paths.raw_input,
            &mut paths.cleaned_output,
            &mut paths.routes_output,
            &mut paths.unique_ports,
            &mut paths.port_coordinates,
            &mut paths.routes_with_coords,
            &mut paths.dashboard_output,
        ] {
            *path = dir.join(&*path);
        }
        self
    }
}
