use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{Error, Result};

/// Minimum Jaro-Winkler similarity for an area name to be offered as a suggestion.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Edge within the area graph. Each undirected road is stored once per endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: String,
    pub distance: f64,
}

/// Undirected weighted graph over named areas with a marked subset of facility nodes.
///
/// The graph is built once and then queried read-only. All mutating operations
/// take `&mut self`, so sharing a finished graph behind an `Arc` across threads
/// cannot race with construction.
#[derive(Debug, Clone, Default)]
pub struct AreaGraph {
    adjacency: HashMap<String, Vec<Edge>>,
    facilities: HashSet<String>,
}

impl AreaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `name` has an adjacency entry. Adding an existing node is a no-op.
    pub fn add_node(&mut self, name: impl Into<String>) {
        self.adjacency.entry(name.into()).or_default();
    }

    /// Add an undirected road between `from` and `to`, creating either endpoint if absent.
    ///
    /// Parallel roads are kept; the search simply relaxes both.
    pub fn add_edge(&mut self, from: &str, to: &str, distance: f64) -> Result<()> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(Error::InvalidEdgeWeight {
                from: from.to_string(),
                to: to.to_string(),
                weight: distance,
            });
        }

        self.adjacency
            .entry(from.to_string())
            .or_default()
            .push(Edge {
                target: to.to_string(),
                distance,
            });
        self.adjacency.entry(to.to_string()).or_default().push(Edge {
            target: from.to_string(),
            distance,
        });
        Ok(())
    }

    /// Flag an existing node as a facility. Marking twice is a no-op.
    pub fn mark_facility(&mut self, name: &str) -> Result<()> {
        if !self.adjacency.contains_key(name) {
            return Err(Error::UnknownNode {
                name: name.to_string(),
            });
        }
        if self.facilities.insert(name.to_string()) {
            debug!(facility = name, "marked facility node");
        }
        Ok(())
    }

    /// Whether `name` is a node of this graph.
    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    /// Return the graph's own copy of a node name, if present.
    pub fn node(&self, name: &str) -> Option<&str> {
        self.adjacency
            .get_key_value(name)
            .map(|(key, _)| key.as_str())
    }

    /// Whether `name` is flagged as a facility.
    pub fn is_facility(&self, name: &str) -> bool {
        self.facilities.contains(name)
    }

    /// Return the incident edges of a node, or an empty slice for unknown names.
    pub fn neighbours(&self, name: &str) -> &[Edge] {
        self.adjacency
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate over node names in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// All node names, sorted.
    pub fn node_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.adjacency.keys().cloned().collect();
        names.sort();
        names
    }

    /// All node names that are not facilities, sorted so output is reproducible.
    pub fn list_non_facility_nodes(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .adjacency
            .keys()
            .filter(|name| !self.facilities.contains(*name))
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Facility node names, sorted.
    pub fn facility_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.facilities.iter().cloned().collect();
        names.sort();
        names
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected roads, counting parallel roads separately.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn facility_count(&self) -> usize {
        self.facilities.len()
    }

    /// Suggest node names similar to `name`, best match first.
    ///
    /// Comparison is case-insensitive. At most `limit` names are returned.
    pub fn fuzzy_area_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = self
            .nodes()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.trim().to_lowercase());
                (score, candidate)
            })
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}
