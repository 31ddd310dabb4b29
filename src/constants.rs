//! Application constants for the maritime route processor
//!
//! This module contains column names, default file names, repair tables
//! and default values used throughout the application.

// =============================================================================
// Column Name Constants
// =============================================================================

/// Column names of the Kystverket voyage export
pub mod columns {
    // Text columns
    pub const SHIP_NAME: &str = "fartoynavn";
    pub const DEPARTURE_PORT: &str = "avgangshavn_navn";
    pub const ARRIVAL_PORT: &str = "ankomsthavn_navn";

    // Temporal columns
    pub const SCHEDULED_DEPARTURE: &str = "etd_estimert_avgangstidspunkt";
    pub const ARRIVAL_TIME: &str = "ankomsttidspunkt";

    // Vessel attribute columns
    pub const BUILD_YEAR: &str = "byggeaar";
    pub const GROSS_TONNAGE: &str = "bruttotonnasje_bt";
    pub const DEADWEIGHT_TONNAGE: &str = "doedvekttonn_dwt";
    pub const LENGTH: &str = "lengde";
    pub const BREADTH: &str = "bredde";
    pub const DRAUGHT: &str = "dypgaaende";
    pub const ACTUAL_DRAUGHT: &str = "dypgaaende_aktuell";

    // Derived column
    pub const TRAVEL_DURATION_HOURS: &str = "travel_duration_hours";

    // Coordinate columns of the enriched route file
    pub const DEPARTURE_LAT: &str = "dep_lat";
    pub const DEPARTURE_LON: &str = "dep_lon";
    pub const ARRIVAL_LAT: &str = "arr_lat";
    pub const ARRIVAL_LON: &str = "arr_lon";

    // Port coordinate lookup columns
    pub const PORT: &str = "Port";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";

    /// Columns of the route file, in output order
    pub const ROUTE_COLUMNS: &[&str] = &[
        SHIP_NAME,
        DEPARTURE_PORT,
        ARRIVAL_PORT,
        SCHEDULED_DEPARTURE,
        ARRIVAL_TIME,
    ];

    /// Numeric vessel attribute columns
    pub const NUMERIC_COLUMNS: &[&str] = &[
        BUILD_YEAR,
        GROSS_TONNAGE,
        DEADWEIGHT_TONNAGE,
        LENGTH,
        BREADTH,
        DRAUGHT,
        ACTUAL_DRAUGHT,
    ];

    /// Every column the cleaner interprets (anything else is carried through)
    pub const KNOWN_COLUMNS: &[&str] = &[
        SHIP_NAME,
        DEPARTURE_PORT,
        ARRIVAL_PORT,
        SCHEDULED_DEPARTURE,
        ARRIVAL_TIME,
        BUILD_YEAR,
        GROSS_TONNAGE,
        DEADWEIGHT_TONNAGE,
        LENGTH,
        BREADTH,
        DRAUGHT,
        ACTUAL_DRAUGHT,
    ];
}

// =============================================================================
// File Format Constants
// =============================================================================

/// Field delimiter of the raw and cleaned voyage files
pub const VOYAGE_DELIMITER: u8 = b';';

/// Field delimiter of the route, lookup and enriched route files
pub const ROUTE_DELIMITER: u8 = b',';

/// Timestamp format written to every output file
pub const OUTPUT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Naive timestamp formats accepted by the cleaner, tried in order
pub const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Offset-carrying timestamp formats accepted by the cleaner (RFC 3339 is tried first)
pub const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%z", "%Y-%m-%d %H:%M:%S %z"];

/// Display format for dashboard timestamps
pub const DISPLAY_DATETIME_FORMAT: &str = "%d.%m.%Y - %I:%M %p";

// =============================================================================
// Encoding Repair
// =============================================================================

/// Unicode replacement glyph left behind by a Latin-1/UTF-8 mismatch
pub const REPLACEMENT_GLYPH: &str = "\u{FFFD}";

/// UTF-8 bytes of the replacement glyph read back as Latin-1
pub const LATIN1_REPLACEMENT_GLYPH: &str = "\u{EF}\u{BF}\u{BD}";

/// Character the corrupted glyph stands for in this dataset
pub const REPAIRED_GLYPH: &str = "ø";

/// Known corrupted port names and their correct Norwegian spelling.
///
/// Applied before the generic glyph substitution, which would otherwise turn
/// these into the wrong vowel.
pub const PORT_NAME_REPAIRS: &[(&str, &str)] = &[
    ("B\u{FFFD}tsfjord", "Båtsfjord"),
    ("Mj\u{FFFD}lstadneset", "Mjølstadneset"),
];

// =============================================================================
// Default File Names
// =============================================================================

pub const DEFAULT_RAW_INPUT: &str = "seilas.csv";
pub const DEFAULT_CLEANED_OUTPUT: &str = "seilas_cleaned.csv";
pub const DEFAULT_ROUTES_OUTPUT: &str = "ship_routes.csv";
pub const DEFAULT_UNIQUE_PORTS: &str = "unique_ports.txt";
pub const DEFAULT_PORT_COORDINATES: &str = "port_coordinates.csv";
pub const DEFAULT_ROUTES_WITH_COORDS: &str = "ship_routes_with_coords.csv";
pub const DEFAULT_DASHBOARD_OUTPUT: &str = "dashboard.json";

/// Application directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "maritime-routes";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Geocoding Defaults
// =============================================================================

/// Environment variable holding the geocoding credential
pub const API_KEY_ENV_VAR: &str = "API_KEY";

/// OpenCage forward geocoding endpoint
pub const DEFAULT_GEOCODER_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Minimum delay between geocoding requests in milliseconds
pub const MIN_GEOCODE_INTERVAL_MS: u64 = 1000;

/// Default HTTP timeout for a geocoding request
pub const DEFAULT_GEOCODE_TIMEOUT_SECS: u64 = 30;

/// Retry-After fallback when a 429 response omits the header
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

// =============================================================================
// Dashboard Defaults
// =============================================================================

pub const MIN_PAGE_SIZE: usize = 5;
pub const MAX_PAGE_SIZE: usize = 50;
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Scatter plot radius bounds in meters
pub const MIN_SCATTER_RADIUS: u32 = 100;
pub const MAX_SCATTER_RADIUS: u32 = 10_000;
pub const DEFAULT_SCATTER_RADIUS: u32 = 3000;

/// Arc width scale bounds
pub const MIN_ARC_WIDTH_SCALE: f64 = 0.01;
pub const MAX_ARC_WIDTH_SCALE: f64 = 0.2;
pub const DEFAULT_ARC_WIDTH_SCALE: f64 = 0.03;

/// Initial map zoom and pitch
pub const DEFAULT_MAP_ZOOM: f64 = 3.0;
pub const DEFAULT_MAP_PITCH: f64 = 0.0;

/// Rows shown by the `clean` command preview
pub const PREVIEW_ROWS: usize = 5;
