//! Common test utilities and fixture helpers.
//!
//! Provides the checked-in fixture paths plus small hand-built graphs used
//! across integration tests.

use std::path::PathBuf;

use carefinder_lib::{AreaGraph, CareFinder, FacilityRecord, FacilityRegistry};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the small JSON network fixture.
#[allow(dead_code)]
pub fn small_network_path() -> PathBuf {
    fixtures_dir().join("small_network.json")
}

/// Build a graph from `(from, to, distance)` triples and mark `facilities`.
#[allow(dead_code)]
pub fn graph_from(roads: &[(&str, &str, f64)], facilities: &[&str]) -> AreaGraph {
    let mut graph = AreaGraph::new();
    for (from, to, distance) in roads {
        graph
            .add_edge(from, to, *distance)
            .expect("fixture roads are valid");
    }
    for facility in facilities {
        graph.add_node(*facility);
        graph.mark_facility(facility).expect("facility node exists");
    }
    graph
}

/// A-B (2), B-C (3) with C as the only facility.
#[allow(dead_code)]
pub fn line_graph() -> AreaGraph {
    graph_from(&[("A", "B", 2.0), ("B", "C", 3.0)], &["C"])
}

/// A mesh with parallel roads, a zero-length road and a detached pair.
#[allow(dead_code)]
pub fn mesh_graph() -> AreaGraph {
    graph_from(
        &[
            ("A", "B", 4.0),
            ("A", "C", 1.0),
            ("C", "B", 2.0),
            ("B", "D", 5.0),
            ("C", "D", 8.0),
            ("D", "E", 3.0),
            ("E", "F", 0.0),
            ("B", "D", 1.5),
            ("X", "Y", 2.0),
        ],
        &["E", "F"],
    )
}

/// Wrap a graph with registry records built from `(name, node, rating)`.
#[allow(dead_code)]
pub fn finder_with(graph: AreaGraph, records: &[(&str, &str, f64)]) -> CareFinder {
    let registry = FacilityRegistry::from_records(
        records
            .iter()
            .map(|(name, node, rating)| FacilityRecord::new(*name, *node, "", *rating)),
    )
    .expect("fixture registry is valid");
    CareFinder::new(graph, registry)
}
