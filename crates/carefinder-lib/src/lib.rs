//! CareFinder library entry points.
//!
//! This crate models a small area network as an undirected weighted graph,
//! finds the nearest facility from any area with Dijkstra's algorithm, and
//! ranks a facility registry by a blend of travel distance and rating.
//! Higher-level consumers (the CLI) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod db;
pub mod error;
pub mod finder;
pub mod graph;
pub mod output;
pub mod path;
pub mod recommend;
pub mod registry;

pub use dataset::{
    default_network_dir, load_network, load_source, resolve_network_source, sample_network,
    NetworkDocument, NetworkSource, RoadRecord, DATA_ENV_VAR,
};
pub use db::{load_network_db, load_network_from_connection, write_network, NETWORK_SCHEMA};
pub use error::{Error, Result};
pub use finder::CareFinder;
pub use graph::{AreaGraph, Edge};
pub use output::{
    DistanceEntry, DistanceSummary, NearestSummary, PathStep, RankingRow, RankingSummary,
    RenderMode, SearchStatus, NO_FACILITY_LABEL, UNKNOWN_AREA_LABEL,
};
pub use path::{distances_from, nearest_facility, DistanceMap, FacilitySearch, PathResult};
pub use recommend::{rank, rank_with_distances, RankedEntry};
pub use registry::{FacilityRecord, FacilityRegistry, MAX_RATING, MIN_RATING};
