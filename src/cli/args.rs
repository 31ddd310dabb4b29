//! Command-line argument definitions for the maritime route pipeline
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Every stage of the pipeline is its own subcommand; `run` chains them.

use crate::app::services::dashboard::{SortColumn, SortDirection};
use crate::app::services::route_aggregator::AggregationScope;
use crate::app::services::voyage_cleaner::InputEncoding;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the maritime route processor
///
/// Cleans Kystverket voyage exports, geocodes the ports they mention and
/// aggregates ship routes into data for a map dashboard.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "maritime-routes",
    version,
    about = "Turn Kystverket voyage exports into port and route data for map dashboards",
    long_about = "Cleans semicolon-delimited, Latin-1 encoded Kystverket voyage exports, \
                  extracts ship routes, geocodes every port through a rate-limited external \
                  service and aggregates route and port traffic into a JSON document ready \
                  for a map dashboard."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Clean a raw voyage export
    Clean(CleanArgs),
    /// Extract routes and distinct port names from a cleaned export
    Routes(RoutesArgs),
    /// Geocode distinct port names into a coordinate lookup file
    Geocode(GeocodeArgs),
    /// Join port coordinates onto routes
    Enrich(EnrichArgs),
    /// Build the dashboard document from enriched routes
    Dashboard(DashboardArgs),
    /// Run every stage in order
    Run(RunArgs),
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/maritime-routes/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides progress bars.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the clean command
#[derive(Debug, Clone, Parser)]
pub struct CleanArgs {
    /// Raw export to clean
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Cleaned output file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Character encoding of the raw export
    #[arg(long = "encoding", value_enum)]
    pub encoding: Option<EncodingArg>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the routes command
#[derive(Debug, Clone, Parser)]
pub struct RoutesArgs {
    /// Cleaned export to read
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Route file to write
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Distinct port name list to write
    #[arg(long = "ports", value_name = "FILE")]
    pub ports: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the geocode command
#[derive(Debug, Clone, Parser)]
pub struct GeocodeArgs {
    /// Distinct port name list to geocode
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Coordinate lookup file to write
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only query ports missing from the existing lookup file, then merge
    #[arg(long = "resume")]
    pub resume: bool,

    /// Delay between requests in milliseconds (at least 1000)
    #[arg(long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the enrich command
#[derive(Debug, Clone, Parser)]
pub struct EnrichArgs {
    /// Route file to read
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Coordinate lookup file to read
    #[arg(long = "ports", value_name = "FILE")]
    pub ports: Option<PathBuf>,

    /// Enriched route file to write
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// View options shared by the dashboard and run commands
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ViewArgs {
    /// Keep voyages whose departure or arrival port contains this text
    #[arg(long = "port", value_name = "TEXT")]
    pub port: Option<String>,

    /// Keep voyages whose ship name contains this text
    #[arg(long = "ship", value_name = "TEXT")]
    pub ship: Option<String>,

    /// Table sort column (ship-name, departure-port, arrival-port, etd, eta)
    #[arg(long = "sort", value_name = "COLUMN")]
    pub sort: Option<SortColumn>,

    /// Table sort direction (asc or desc)
    #[arg(long = "direction", value_name = "DIR")]
    pub direction: Option<SortDirection>,

    /// Table page to show, starting at 1
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Rows per page (5-50)
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<usize>,

    /// Port marker radius in meters (100-10000)
    #[arg(long = "radius", value_name = "METERS")]
    pub radius: Option<u32>,

    /// Route arc width scale (0.01-0.2)
    #[arg(long = "arc-width", value_name = "SCALE")]
    pub arc_width: Option<f64>,

    /// Which voyages feed the route and port aggregates
    #[arg(long = "scope", value_enum)]
    pub scope: Option<ScopeArg>,
}

/// Arguments for the dashboard command
#[derive(Debug, Clone, Parser)]
pub struct DashboardArgs {
    /// Enriched route file to read
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Dashboard JSON file to write
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub view: ViewArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the run command
#[derive(Debug, Clone, Parser)]
pub struct RunArgs {
    /// Raw export to process, relative to the working directory (default: seilas.csv in --data-dir)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory for every intermediate and output file
    #[arg(short = 'd', long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Reuse the existing lookup file instead of geocoding
    #[arg(long = "skip-geocode")]
    pub skip_geocode: bool,

    /// Only geocode ports missing from the existing lookup file
    #[arg(long = "resume", conflicts_with = "skip_geocode")]
    pub resume: bool,

    #[command(flatten)]
    pub view: ViewArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Input encodings accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    /// ISO-8859-1, as delivered by Kystverket
    Latin1,
    /// UTF-8
    Utf8,
}

impl From<EncodingArg> for InputEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Latin1 => InputEncoding::Latin1,
            EncodingArg::Utf8 => InputEncoding::Utf8,
        }
    }
}

/// Aggregation scopes accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// Aggregate every voyage
    All,
    /// Aggregate only voyages with coordinates at both ends
    MappedOnly,
}

impl From<ScopeArg> for AggregationScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::All => AggregationScope::All,
            ScopeArg::MappedOnly => AggregationScope::MappedOnly,
        }
    }
}

impl Commands {
    /// Flags shared by every subcommand
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Clean(args) => &args.common,
            Commands::Routes(args) => &args.common,
            Commands::Geocode(args) => &args.common,
            Commands::Enrich(args) => &args.common,
            Commands::Dashboard(args) => &args.common,
            Commands::Run(args) => &args.common,
        }
    }
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
