use crate::error::{Error, Result};
use crate::graph::AreaGraph;
use crate::path::{distances_from, nearest_facility, DistanceMap, FacilitySearch};
use crate::recommend::{rank, RankedEntry};
use crate::registry::{FacilityRecord, FacilityRegistry};

/// Number of "did you mean" suggestions attached to unknown area errors.
const AREA_SUGGESTIONS: usize = 3;

/// Query context pairing an area graph with the facility registry ranked against it.
///
/// Build one per network and pass it by reference; it is `Send + Sync`, so a
/// finished instance can be shared behind an `Arc` for concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct CareFinder {
    graph: AreaGraph,
    registry: FacilityRegistry,
}

impl CareFinder {
    pub fn new(graph: AreaGraph, registry: FacilityRegistry) -> Self {
        Self { graph, registry }
    }

    /// Replace the facility registry, keeping the graph.
    pub fn with_registry(mut self, registry: FacilityRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn graph(&self) -> &AreaGraph {
        &self.graph
    }

    pub fn registry(&self) -> &FacilityRegistry {
        &self.registry
    }

    /// Nearest marked facility from `area`, with its path.
    pub fn nearest_facility(&self, area: &str) -> FacilitySearch {
        nearest_facility(&self.graph, area)
    }

    /// Shortest distance from `area` to every node; empty for unknown areas.
    pub fn distances_from(&self, area: &str) -> DistanceMap {
        distances_from(&self.graph, area)
    }

    /// Registry facilities reachable from `area`, best score first.
    pub fn rank(&self, area: &str) -> Vec<RankedEntry> {
        rank(area, &self.graph, &self.registry)
    }

    /// Areas a user can start from: every non-facility node, sorted.
    pub fn list_areas(&self) -> Vec<String> {
        self.graph.list_non_facility_nodes()
    }

    /// Resolve an area name strictly, suggesting close matches when it is unknown.
    pub fn resolve_area<'a>(&'a self, name: &str) -> Result<&'a str> {
        self.graph.node(name).ok_or_else(|| Error::UnknownArea {
            name: name.to_string(),
            suggestions: self.graph.fuzzy_area_matches(name, AREA_SUGGESTIONS),
        })
    }

    /// Registry records whose node is not part of the graph; these never rank.
    pub fn unmatched_facilities(&self) -> Vec<&FacilityRecord> {
        self.registry
            .iter()
            .filter(|record| !self.graph.contains(&record.node))
            .collect()
    }
}
