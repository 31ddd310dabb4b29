//! Dashboard data layer
//!
//! Turns enriched routes into everything a map dashboard renders: headline
//! metrics, ranked route statistics, a sorted and paginated voyage table and
//! map layers. All view state (filter terms, sort, page, map styling) comes in
//! through [`DashboardQuery`]; nothing is kept between builds.

use crate::app::models::{EnrichedRoute, RouteEdge};
use crate::app::services::route_aggregator::{AggregationScope, aggregate, rank_routes};
use crate::config::DashboardConfig;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::info;

pub mod filter;
pub mod map_layers;
pub mod summary;
pub mod table;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use filter::VoyageFilter;
pub use map_layers::{MapLayer, MapSettings, ViewState, build_layers};
pub use summary::SummaryMetrics;
pub use table::{PageState, SortColumn, SortDirection, TablePage, TableRow, TableSort};

/// Everything that shapes one dashboard view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardQuery {
    pub filter: VoyageFilter,
    pub sort: TableSort,
    pub page: PageState,
    pub map: MapSettings,
    pub scope: AggregationScope,
}

impl DashboardQuery {
    /// Query with the configured page size, map styling and scope
    ///
    /// # Errors
    /// * `Error::Configuration` if the map settings are out of range
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        Ok(Self {
            page: PageState::new(config.page_size),
            map: MapSettings::new(config.scatter_radius, config.arc_width_scale)?,
            scope: config.aggregation_scope,
            ..Default::default()
        })
    }
}

/// Map section of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub view_state: ViewState,
    pub layers: Vec<MapLayer>,

    /// Routes left off the map because an endpoint has no coordinates
    pub unmapped_routes: usize,
}

/// A complete dashboard view, serialized as JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardDocument {
    pub generated_at: DateTime<Utc>,
    pub filter: VoyageFilter,
    pub scope: AggregationScope,
    pub summary: SummaryMetrics,
    pub route_stats: Vec<RouteEdge>,
    pub table: TablePage,
    pub map: MapView,
}

impl DashboardDocument {
    /// Build the view for `records` under `query`
    pub fn build(records: &[EnrichedRoute], query: &DashboardQuery) -> Self {
        let filtered = query.filter.apply(records);
        let scoped: Vec<&EnrichedRoute> = filtered
            .iter()
            .filter(|r| query.scope.includes(r))
            .collect();

        let tables = aggregate(&filtered, query.scope);
        let unmapped_routes = tables.edges.iter().filter(|e| !e.is_plottable()).count();
        let layers = build_layers(&tables.edges, &tables.nodes, &query.map);

        info!(
            "Dashboard view: {} of {} voyages after filtering, {} routes ({} unmapped)",
            scoped.len(),
            records.len(),
            tables.edges.len(),
            unmapped_routes
        );

        Self {
            generated_at: Utc::now(),
            filter: query.filter.clone(),
            scope: query.scope,
            summary: SummaryMetrics::from_records(scoped.iter().copied()),
            route_stats: rank_routes(tables.edges),
            table: TablePage::build(scoped.iter().copied(), query.sort, query.page),
            map: MapView {
                view_state: ViewState::centered_on(scoped.iter().copied()),
                layers,
                unmapped_routes,
            },
        }
    }

    /// Write the document as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::serialization("Failed to serialize dashboard", e))?;

        std::fs::write(path, json)
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

        info!("Wrote dashboard to {}", path.display());
        Ok(())
    }
}
