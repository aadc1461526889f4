//! Facility recommendations blending travel distance with quality rating.

use serde::Serialize;
use tracing::debug;

use crate::graph::AreaGraph;
use crate::path::{distances_from, DistanceMap};
use crate::registry::{FacilityRecord, FacilityRegistry};

/// A facility ranked for a particular source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub facility: FacilityRecord,
    /// Shortest travel distance from the query source.
    pub distance: f64,
    /// `distance + (MAX_RATING - rating)`; lower is better.
    pub score: f64,
}

/// Rank every reachable facility in `registry` by composite score from `source`.
///
/// Runs one distance search. Records whose node is missing from the graph
/// or unreachable from `source` are left out. Equal scores keep registry
/// order. An unknown source yields an empty ranking.
pub fn rank(source: &str, graph: &AreaGraph, registry: &FacilityRegistry) -> Vec<RankedEntry> {
    let distances = distances_from(graph, source);
    if distances.is_empty() {
        debug!(source, "ranking requested for unknown source");
        return Vec::new();
    }
    rank_with_distances(&distances, registry)
}

/// Rank `registry` against a precomputed distance map.
pub fn rank_with_distances(
    distances: &DistanceMap,
    registry: &FacilityRegistry,
) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = registry
        .iter()
        .filter_map(|record| {
            if !distances.contains(&record.node) {
                debug!(
                    facility = %record.name,
                    node = %record.node,
                    "facility references a node missing from the area graph"
                );
                return None;
            }
            let distance = distances.get(&record.node)?;
            Some(RankedEntry {
                facility: record.clone(),
                distance,
                score: record.score(distance),
            })
        })
        .collect();

    // `sort_by` is stable, so equal scores stay in registry order.
    entries.sort_by(|a, b| a.score.total_cmp(&b.score));
    entries
}
