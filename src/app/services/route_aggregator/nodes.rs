//! Per-port traffic counting

use crate::app::models::{EnrichedRoute, PortNode};
use std::collections::HashMap;

/// Count departures and arrivals per port.
///
/// Ports appear departure-first: every departure port in first-seen order,
/// then arrival-only ports in first-seen order. Each port keeps the
/// coordinates of the first record that mentions it.
pub fn build_port_nodes<'a, I>(records: I) -> Vec<PortNode>
where
    I: IntoIterator<Item = &'a EnrichedRoute>,
    I::IntoIter: Clone,
{
    let records = records.into_iter();
    let mut nodes: Vec<PortNode> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for record in records.clone() {
        if let Some(name) = record.departure_port() {
            let position = *index.entry(name).or_insert_with(|| {
                nodes.push(PortNode::new(name, record.departure_coords));
                nodes.len() - 1
            });
            nodes[position].departure_count += 1;
        }
    }

    for record in records {
        if let Some(name) = record.arrival_port() {
            let position = *index.entry(name).or_insert_with(|| {
                nodes.push(PortNode::new(name, record.arrival_coords));
                nodes.len() - 1
            });
            nodes[position].arrival_count += 1;
        }
    }

    nodes
}
