//! Directed route counting

use crate::app::models::{Coordinates, EnrichedRoute, RouteEdge};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Count voyages per ordered (departure, arrival) pair.
///
/// Source coordinates come from the first record departing from the edge's
/// departure port, target coordinates from the first record arriving at its
/// arrival port. Records missing either port name are skipped. Output is
/// sorted by departure then arrival name.
pub fn build_route_edges<'a, I>(records: I) -> Vec<RouteEdge>
where
    I: IntoIterator<Item = &'a EnrichedRoute>,
{
    let mut counts: BTreeMap<(&'a str, &'a str), usize> = BTreeMap::new();
    let mut departure_coords: HashMap<&'a str, Option<Coordinates>> = HashMap::new();
    let mut arrival_coords: HashMap<&'a str, Option<Coordinates>> = HashMap::new();

    for record in records {
        if let Some(departure) = record.departure_port() {
            departure_coords
                .entry(departure)
                .or_insert(record.departure_coords);
        }
        if let Some(arrival) = record.arrival_port() {
            arrival_coords.entry(arrival).or_insert(record.arrival_coords);
        }

        if let (Some(departure), Some(arrival)) = (record.departure_port(), record.arrival_port()) {
            *counts.entry((departure, arrival)).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|((departure, arrival), count)| RouteEdge {
            departure_port: departure.to_string(),
            arrival_port: arrival.to_string(),
            count,
            source: departure_coords.get(departure).copied().flatten(),
            target: arrival_coords.get(arrival).copied().flatten(),
        })
        .collect()
}

/// Order edges for the route statistics view: busiest first, ties by name
pub fn rank_routes(mut edges: Vec<RouteEdge>) -> Vec<RouteEdge> {
    edges.sort_by(|a, b| match b.count.cmp(&a.count) {
        Ordering::Equal => (&a.departure_port, &a.arrival_port)
            .cmp(&(&b.departure_port, &b.arrival_port)),
        other => other,
    });
    edges
}
