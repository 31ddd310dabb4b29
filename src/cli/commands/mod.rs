//! CLI command implementations
//!
//! Each subcommand runs one pipeline stage; `run` chains them all. Stage
//! functions are public so the full pipeline can be driven with a different
//! geocoder.

pub mod clean;
pub mod dashboard;
pub mod enrich;
pub mod geocode;
pub mod routes;
pub mod run;
pub mod shared;

pub use shared::PipelineStats;

use crate::cli::args::{Args, Commands};
use anyhow::Result;

/// Main command dispatcher
pub async fn run(args: Args) -> Result<PipelineStats> {
    match args.command {
        Some(Commands::Clean(clean_args)) => clean::run_clean(clean_args).await,
        Some(Commands::Routes(routes_args)) => routes::run_routes(routes_args).await,
        Some(Commands::Geocode(geocode_args)) => geocode::run_geocode(geocode_args).await,
        Some(Commands::Enrich(enrich_args)) => enrich::run_enrich(enrich_args).await,
        Some(Commands::Dashboard(dashboard_args)) => {
            dashboard::run_dashboard(dashboard_args).await
        }
        Some(Commands::Run(run_args)) => run::run_pipeline(run_args).await,
        None => anyhow::bail!("No command specified"),
    }
}
