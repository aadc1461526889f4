//! Single-source shortest-path search over an [`AreaGraph`].
//!
//! Both queries run Dijkstra's algorithm with a binary min-heap. Roads must
//! carry finite, non-negative distances, which [`AreaGraph::add_edge`]
//! enforces at construction time.
//!
//! Equal-cost heap entries are popped in ascending node-name order, and
//! relaxation uses a strict `<`, so on exact ties the first parent found is
//! kept. Both rules make results reproducible across runs.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::graph::AreaGraph;

/// Shortest known cost from a fixed source to every node of the graph.
///
/// Unreached nodes are present with no distance. A map produced for an
/// unknown source is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DistanceMap {
    distances: BTreeMap<String, Option<f64>>,
}

impl DistanceMap {
    /// Distance to `node`, or `None` when it is unreachable or not in the map.
    pub fn get(&self, node: &str) -> Option<f64> {
        self.distances.get(node).copied().flatten()
    }

    /// Whether `node` was covered by the search at all.
    pub fn contains(&self, node: &str) -> bool {
        self.distances.contains_key(node)
    }

    pub fn is_reachable(&self, node: &str) -> bool {
        self.get(node).is_some()
    }

    /// `true` when the search was run from a source that is not in the graph.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Iterate over every covered node in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.distances
            .iter()
            .map(|(name, distance)| (name.as_str(), *distance))
    }

    /// Iterate over reachable nodes only, in name order.
    pub fn reachable(&self) -> impl Iterator<Item = (&str, f64)> {
        self.iter()
            .filter_map(|(name, distance)| distance.map(|d| (name, d)))
    }
}

/// Nearest facility together with the path leading to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub facility: String,
    pub total_distance: f64,
    /// Node names from the source to the facility, both inclusive.
    pub path: Vec<String>,
}

impl PathResult {
    /// Number of roads travelled.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Outcome of a nearest-facility query.
#[derive(Debug, Clone, PartialEq)]
pub enum FacilitySearch {
    Found(PathResult),
    /// The requested source is not a node of the graph.
    UnknownSource,
    /// The source's connected component contains no facility.
    NoFacilityReachable,
}

impl FacilitySearch {
    pub fn found(&self) -> Option<&PathResult> {
        match self {
            FacilitySearch::Found(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_found(self) -> Option<PathResult> {
        match self {
            FacilitySearch::Found(result) => Some(result),
            _ => None,
        }
    }
}

/// Compute the shortest distance from `source` to every node of the graph.
///
/// Returns an empty map when `source` is unknown.
pub fn distances_from(graph: &AreaGraph, source: &str) -> DistanceMap {
    let Some(start) = graph.node(source) else {
        debug!(source, "distance query from unknown source");
        return DistanceMap::default();
    };

    let search = dijkstra(graph, start, false);
    let distances = graph
        .nodes()
        .map(|node| (node.to_string(), search.distances.get(node).copied()))
        .collect();

    DistanceMap { distances }
}

/// Find the facility with the least travel cost from `source`.
///
/// The search stops as soon as a facility is popped from the queue; Dijkstra
/// settles nodes in non-decreasing distance order, so that facility is the
/// nearest one.
pub fn nearest_facility(graph: &AreaGraph, source: &str) -> FacilitySearch {
    let Some(start) = graph.node(source) else {
        debug!(source, "facility query from unknown source");
        return FacilitySearch::UnknownSource;
    };

    let search = dijkstra(graph, start, true);
    let Some((facility, total_distance)) = search.facility else {
        return FacilitySearch::NoFacilityReachable;
    };

    let path = reconstruct_path(&search.parents, start, facility);

    FacilitySearch::Found(PathResult {
        facility: facility.to_string(),
        total_distance,
        path,
    })
}

struct SearchOutcome<'a> {
    distances: HashMap<&'a str, f64>,
    parents: HashMap<&'a str, &'a str>,
    /// First facility settled and its distance, when the search stops early.
    facility: Option<(&'a str, f64)>,
}

fn dijkstra<'a>(
    graph: &'a AreaGraph,
    start: &'a str,
    stop_at_facility: bool,
) -> SearchOutcome<'a> {
    let mut distances: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut settled = 0usize;
    let mut pushes = 1usize;

    distances.insert(start, 0.0);
    queue.push(QueueEntry::new(start, 0.0));

    let mut facility = None;
    while let Some(entry) = queue.pop() {
        let current_distance = match distances.get(entry.node) {
            Some(distance) if entry.cost.0 > *distance => continue,
            Some(distance) => *distance,
            None => continue,
        };
        settled += 1;

        if stop_at_facility && graph.is_facility(entry.node) {
            facility = Some((entry.node, current_distance));
            break;
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target.as_str();
            let next_cost = current_distance + edge.distance;
            if next_cost < *distances.get(next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, entry.node);
                queue.push(QueueEntry::new(next, next_cost));
                pushes += 1;
            }
        }
    }

    debug!(source = start, settled, pushes, "dijkstra search finished");

    SearchOutcome {
        distances,
        parents,
        facility,
    }
}

fn reconstruct_path(parents: &HashMap<&str, &str>, start: &str, goal: &str) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node.to_string());
        if node == start {
            break;
        }
        current = parents.get(node).copied();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then by name.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
