//! Map projection of the aggregated route graph
//!
//! Produces deck.gl-style layer descriptions. Only edges and ports with
//! coordinates are drawn; everything else is counted as unmapped.

use crate::app::models::{EnrichedRoute, PortNode, RouteEdge};
use crate::constants::*;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

const ARC_SOURCE_COLOR: [u8; 3] = [255, 0, 0];
const ARC_TARGET_COLOR: [u8; 3] = [0, 0, 255];
const PORT_FILL_COLOR: [u8; 3] = [255, 140, 0];
const PORT_RADIUS_MIN_PIXELS: u32 = 2;

/// User-adjustable map styling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Port marker radius in meters
    pub scatter_radius: u32,

    /// Arc width multiplier applied to route counts
    pub arc_width_scale: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            scatter_radius: DEFAULT_SCATTER_RADIUS,
            arc_width_scale: DEFAULT_ARC_WIDTH_SCALE,
        }
    }
}

impl MapSettings {
    /// Create validated settings
    ///
    /// # Errors
    /// * `Error::Configuration` if the radius is outside 100-10000 m or the
    ///   arc width scale outside 0.01-0.2
    pub fn new(scatter_radius: u32, arc_width_scale: f64) -> Result<Self> {
        if !(MIN_SCATTER_RADIUS..=MAX_SCATTER_RADIUS).contains(&scatter_radius) {
            return Err(Error::configuration(format!(
                "Scatter radius must be between {} and {} meters (got {})",
                MIN_SCATTER_RADIUS, MAX_SCATTER_RADIUS, scatter_radius
            )));
        }
        if !(MIN_ARC_WIDTH_SCALE..=MAX_ARC_WIDTH_SCALE).contains(&arc_width_scale) {
            return Err(Error::configuration(format!(
                "Arc width scale must be between {} and {} (got {})",
                MIN_ARC_WIDTH_SCALE, MAX_ARC_WIDTH_SCALE, arc_width_scale
            )));
        }
        Ok(Self {
            scatter_radius,
            arc_width_scale,
        })
    }
}

/// One drawn route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcDatum {
    pub departure_port: String,
    pub arrival_port: String,
    pub count: usize,
    pub source_position: [f64; 2],
    pub target_position: [f64; 2],
}

/// One drawn port
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterDatum {
    pub port: String,
    pub position: [f64; 2],
    pub departure_count: usize,
    pub arrival_count: usize,
}

/// Map layer, tagged with its deck.gl layer type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum MapLayer {
    ArcLayer {
        data: Vec<ArcDatum>,
        width_scale: f64,
        source_color: [u8; 3],
        target_color: [u8; 3],
        pickable: bool,
    },
    ScatterplotLayer {
        data: Vec<ScatterDatum>,
        radius: u32,
        radius_min_pixels: u32,
        fill_color: [u8; 3],
        pickable: bool,
    },
}

impl MapLayer {
    pub fn layer_type(&self) -> &'static str {
        match self {
            Self::ArcLayer { .. } => "ArcLayer",
            Self::ScatterplotLayer { .. } => "ScatterplotLayer",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::ArcLayer { data, .. } => data.len(),
            Self::ScatterplotLayer { data, .. } => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Initial camera position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

impl ViewState {
    /// Centre on the mean departure coordinate of plottable records, or (0, 0)
    pub fn centered_on<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a EnrichedRoute>,
    {
        let mut count = 0usize;
        let (mut lat_sum, mut lon_sum) = (0.0, 0.0);

        for coords in records
            .into_iter()
            .filter(|r| r.is_plottable())
            .filter_map(|r| r.departure_coords)
        {
            count += 1;
            lat_sum += coords.lat;
            lon_sum += coords.lon;
        }

        let (latitude, longitude) = if count == 0 {
            (0.0, 0.0)
        } else {
            (lat_sum / count as f64, lon_sum / count as f64)
        };

        Self {
            latitude,
            longitude,
            zoom: DEFAULT_MAP_ZOOM,
            pitch: DEFAULT_MAP_PITCH,
        }
    }
}

/// Arc layer over plottable edges, scatter layer over ports with coordinates
pub fn build_layers(
    edges: &[RouteEdge],
    nodes: &[PortNode],
    settings: &MapSettings,
) -> Vec<MapLayer> {
    let arcs = edges
        .iter()
        .filter_map(|edge| {
            let (source, target) = (edge.source?, edge.target?);
            Some(ArcDatum {
                departure_port: edge.departure_port.clone(),
                arrival_port: edge.arrival_port.clone(),
                count: edge.count,
                source_position: source.position(),
                target_position: target.position(),
            })
        })
        .collect();

    let ports = nodes
        .iter()
        .filter_map(|node| {
            Some(ScatterDatum {
                port: node.name.clone(),
                position: node.coordinates?.position(),
                departure_count: node.departure_count,
                arrival_count: node.arrival_count,
            })
        })
        .collect();

    vec![
        MapLayer::ArcLayer {
            data: arcs,
            width_scale: settings.arc_width_scale,
            source_color: ARC_SOURCE_COLOR,
            target_color: ARC_TARGET_COLOR,
            pickable: true,
        },
        MapLayer::ScatterplotLayer {
            data: ports,
            radius: settings.scatter_radius,
            radius_min_pixels: PORT_RADIUS_MIN_PIXELS,
            fill_color: PORT_FILL_COLOR,
            pickable: true,
        },
    ]
}
