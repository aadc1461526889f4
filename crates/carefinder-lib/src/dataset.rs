//! Area network discovery and loading.
//!
//! A network bundles the area graph with its facility registry. It can come
//! from a JSON document, a SQLite database (see [`crate::db`]), or the sample
//! network compiled into this crate.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::db::load_network_db;
use crate::error::{Error, Result};
use crate::finder::CareFinder;
use crate::graph::AreaGraph;
use crate::registry::{FacilityRecord, FacilityRegistry};

/// Environment variable overriding the network location.
pub const DATA_ENV_VAR: &str = "CAREFINDER_DATA";

/// File names probed, in order, when a directory is given as the network location.
const NETWORK_FILENAMES: [&str; 2] = ["network.json", "network.db"];

const SAMPLE_NETWORK_JSON: &str = include_str!("../data/islamabad.json");

static SAMPLE_NETWORK: Lazy<CareFinder> = Lazy::new(|| {
    NetworkDocument::from_json(SAMPLE_NETWORK_JSON)
        .and_then(NetworkDocument::into_finder)
        .expect("bundled sample network is valid")
});

/// Road between two areas as stored in network documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadRecord {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

/// Serialised form of an area network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDocument {
    #[serde(default)]
    pub areas: Vec<String>,
    #[serde(default)]
    pub roads: Vec<RoadRecord>,
    #[serde(default)]
    pub facilities: Vec<FacilityRecord>,
}

impl NetworkDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the graph and registry. Every facility's node is added and marked.
    pub fn into_finder(self) -> Result<CareFinder> {
        let mut graph = AreaGraph::new();
        for area in self.areas {
            graph.add_node(area);
        }
        for road in &self.roads {
            graph.add_edge(&road.from, &road.to, road.distance)?;
        }

        let mut registry = FacilityRegistry::new();
        for facility in self.facilities {
            graph.add_node(facility.node.clone());
            graph.mark_facility(&facility.node)?;
            registry.push(facility)?;
        }

        info!(
            nodes = graph.node_count(),
            roads = graph.edge_count(),
            facilities = graph.facility_count(),
            "loaded area network"
        );
        Ok(CareFinder::new(graph, registry))
    }
}

/// Where a network is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkSource {
    File(PathBuf),
    Bundled,
}

impl NetworkSource {
    /// Human-readable description for logs and CLI output.
    pub fn describe(&self) -> String {
        match self {
            NetworkSource::File(path) => path.display().to_string(),
            NetworkSource::Bundled => "bundled sample network".to_string(),
        }
    }
}

/// The sample network of Islamabad/Rawalpindi sectors and hospitals.
pub fn sample_network() -> &'static CareFinder {
    &SAMPLE_NETWORK
}

/// Platform data directory where a user network may live.
pub fn default_network_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "carefinder", "carefinder").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Resolve which network to load.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `CAREFINDER_DATA` environment variable.
/// 3. `network.json` or `network.db` in the platform data directory.
/// 4. The bundled sample network.
///
/// Explicit and environment locations must exist; a directory is searched
/// for the well-known file names.
pub fn resolve_network_source(target: Option<&Path>) -> Result<NetworkSource> {
    if let Some(explicit) = target {
        return resolve_location(explicit).map(NetworkSource::File);
    }

    if let Some(env_path) = env::var_os(DATA_ENV_VAR) {
        debug!(path = ?env_path, "using network location from {}", DATA_ENV_VAR);
        return resolve_location(Path::new(&env_path)).map(NetworkSource::File);
    }

    if let Ok(dir) = default_network_dir() {
        if let Some(found) = find_in_dir(&dir) {
            return Ok(NetworkSource::File(found));
        }
    }

    debug!("no network file found; falling back to the bundled sample");
    Ok(NetworkSource::Bundled)
}

/// Load a network from a resolved source.
pub fn load_source(source: &NetworkSource) -> Result<CareFinder> {
    match source {
        NetworkSource::File(path) => load_network(path),
        NetworkSource::Bundled => Ok(sample_network().clone()),
    }
}

/// Load a network file, choosing the format from its extension.
pub fn load_network(path: &Path) -> Result<CareFinder> {
    if !path.exists() {
        return Err(Error::NetworkNotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => {
            debug!(path = %path.display(), "loading JSON network");
            let text = fs::read_to_string(path)?;
            NetworkDocument::from_json(&text)?.into_finder()
        }
        Some("db") | Some("sqlite") => load_network_db(path),
        _ => Err(Error::UnsupportedNetworkFormat {
            path: path.to_path_buf(),
        }),
    }
}

fn resolve_location(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        return find_in_dir(path).ok_or_else(|| Error::NetworkNotFound {
            path: path.to_path_buf(),
        });
    }
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(Error::NetworkNotFound {
            path: path.to_path_buf(),
        })
    }
}

fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    NETWORK_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}
