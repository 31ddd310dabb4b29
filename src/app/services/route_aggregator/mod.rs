//! Route and port aggregation for the dashboard
//!
//! Collapses enriched voyages into directed port-pair counts ([`RouteEdge`])
//! and per-port traffic counts ([`PortNode`]). Coordinates are carried from
//! the first record mentioning each port; absent coordinates stay absent and
//! only the map projection drops them.
//!
//! [`RouteEdge`]: crate::app::models::RouteEdge
//! [`PortNode`]: crate::app::models::PortNode

use crate::app::models::{EnrichedRoute, PortNode, RouteEdge};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub mod edges;
pub mod nodes;

#[cfg(test)]
pub mod tests;

// Re-export key functions for convenience
pub use edges::{build_route_edges, rank_routes};
pub use nodes::build_port_nodes;

/// Which records feed the aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationScope {
    /// Every record; coordinate-less routes still count
    #[default]
    All,
    /// Only records with all four coordinates
    MappedOnly,
}

impl AggregationScope {
    /// Whether a record falls inside this scope
    pub fn includes(&self, record: &EnrichedRoute) -> bool {
        match self {
            Self::All => true,
            Self::MappedOnly => record.is_plottable(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::MappedOnly => "mapped-only",
        }
    }
}

/// Route and port tables built from one set of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateTables {
    pub edges: Vec<RouteEdge>,
    pub nodes: Vec<PortNode>,

    /// Records that fed the aggregates after scope filtering
    pub records_used: usize,
}

/// Build route edges and port nodes under the given scope
pub fn aggregate(records: &[EnrichedRoute], scope: AggregationScope) -> AggregateTables {
    let selected: Vec<&EnrichedRoute> = records.iter().filter(|r| scope.includes(r)).collect();

    if selected.len() < records.len() {
        debug!(
            "Aggregation scope {} dropped {} records without coordinates",
            scope.as_str(),
            records.len() - selected.len()
        );
    }

    let edges = build_route_edges(selected.iter().copied());
    let nodes = build_port_nodes(selected.iter().copied());

    info!(
        "Aggregated {} records into {} routes and {} ports",
        selected.len(),
        edges.len(),
        nodes.len()
    );

    AggregateTables {
        edges,
        nodes,
        records_used: selected.len(),
    }
}
