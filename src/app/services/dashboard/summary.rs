//! Headline metrics for the filtered voyages

use crate::app::models::EnrichedRoute;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Row count, distinct ships and busiest ports of a voyage set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_rows: usize,
    pub unique_ships: usize,
    pub most_frequent_departure: Option<String>,
    pub most_frequent_arrival: Option<String>,
}

impl SummaryMetrics {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a EnrichedRoute>,
    {
        let mut total_rows = 0;
        let mut ships = HashSet::new();
        let mut departures: Vec<&str> = Vec::new();
        let mut arrivals: Vec<&str> = Vec::new();

        for record in records {
            total_rows += 1;
            if let Some(ship) = record.route.ship_name.as_deref() {
                ships.insert(ship);
            }
            departures.extend(record.departure_port());
            arrivals.extend(record.arrival_port());
        }

        Self {
            total_rows,
            unique_ships: ships.len(),
            most_frequent_departure: mode(departures),
            most_frequent_arrival: mode(arrivals),
        }
    }
}

/// Most frequent value; ties go to the lexicographically smallest
pub fn mode<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(a_name, a_count), (b_name, b_count)| {
            a_count.cmp(b_count).then_with(|| b_name.cmp(a_name))
        })
        .map(|(name, _)| name.to_string())
}
