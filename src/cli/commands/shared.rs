//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use crate::app::services::dashboard::{
    DashboardQuery, MapSettings, PageState, TableSort, VoyageFilter,
};
use crate::cli::args::{CommonArgs, ViewArgs};
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Pipeline statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Stages that ran to completion, in order
    pub stages_completed: Vec<&'static str>,
    /// Voyages read from the raw export
    pub voyages_cleaned: usize,
    /// Routes written to the route file
    pub routes_extracted: usize,
    /// Distinct port names across all routes
    pub ports_found: usize,
    /// Ports with coordinates after geocoding
    pub ports_geocoded: usize,
    /// Routes with coordinates at both ends
    pub routes_plottable: usize,
    /// Voyages shown in the dashboard after filtering
    pub dashboard_rows: usize,
    /// Total processing time
    pub processing_time: Duration,
}

impl PipelineStats {
    pub fn record_stage(&mut self, stage: &'static str) {
        self.stages_completed.push(stage);
    }

    /// Print the end-of-command summary
    pub fn print_summary(&self) {
        println!("\n{}", "Pipeline Summary".bright_green().bold());
        println!(
            "  {} {:.2}s",
            "Time elapsed:".bright_cyan(),
            self.processing_time.as_secs_f64()
        );
        println!(
            "  {} {}",
            "Stages:".bright_cyan(),
            self.stages_completed.join(" -> ").bright_white()
        );
        let counts = [
            ("Voyages cleaned:", self.voyages_cleaned),
            ("Routes extracted:", self.routes_extracted),
            ("Distinct ports:", self.ports_found),
            ("Ports geocoded:", self.ports_geocoded),
            ("Plottable routes:", self.routes_plottable),
            ("Dashboard rows:", self.dashboard_rows),
        ];
        for (label, count) in counts.into_iter().filter(|(_, count)| *count > 0) {
            println!(
                "  {} {}",
                label.bright_cyan(),
                count.to_string().bright_white().bold()
            );
        }
    }
}

/// Set up structured logging for any command
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("maritime_routes={}", log_level)));

    let result = if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (defaults -> file -> env)
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => match Config::default_config_path().filter(|path| path.exists()) {
            Some(path) => info!("Using config file: {}", path.display()),
            None => info!("No config file found, using defaults and environment variables"),
        },
    }

    Config::load_layered(args.config_file.as_deref())
}

/// Apply dashboard view flags on top of configured defaults
pub fn build_query(config: &Config, view: &ViewArgs) -> Result<DashboardQuery> {
    let mut query = DashboardQuery::from_config(&config.dashboard)?;

    query.filter = VoyageFilter::new(view.port.as_deref(), view.ship.as_deref());
    query.sort = TableSort {
        column: view.sort.unwrap_or_default(),
        direction: view.direction.unwrap_or_default(),
    };

    let page_size = view.page_size.unwrap_or(config.dashboard.page_size);
    query.page = PageState::new(page_size).with_page(view.page.saturating_sub(1));

    if view.radius.is_some() || view.arc_width.is_some() {
        query.map = MapSettings::new(
            view.radius.unwrap_or(query.map.scatter_radius),
            view.arc_width.unwrap_or(query.map.arc_width_scale),
        )?;
    }
    if let Some(scope) = view.scope {
        query.scope = scope.into();
    }

    Ok(query)
}

/// Print a stage banner with its input and output
pub fn print_stage(title: &str, input: &Path, output: &Path) {
    println!("\n{}", title.bright_yellow());
    println!("  {} {}", "Input:".bright_cyan(), input.display());
    println!("  {} {}", "Output:".bright_cyan(), output.display());
}
