//! Network resolution shared by every subcommand.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use carefinder_lib::{
    load_source, resolve_network_source, CareFinder, FacilityRegistry, NetworkSource,
};

/// A loaded network together with where it came from.
#[derive(Debug)]
pub struct LoadedNetwork {
    pub source: NetworkSource,
    pub finder: CareFinder,
}

impl LoadedNetwork {
    /// Strictly resolve an area name, failing with suggestions when it is unknown.
    pub fn resolve_area(&self, name: &str) -> Result<String> {
        let area = self
            .finder
            .resolve_area(name)
            .with_context(|| format!("cannot search from '{}'", name))?;
        Ok(area.to_string())
    }
}

/// Resolve and load the network, optionally replacing its facility registry.
pub fn load(data: Option<&Path>, registry: Option<&Path>) -> Result<LoadedNetwork> {
    let source = resolve_network_source(data).context("failed to locate an area network")?;
    let mut finder = load_source(&source)
        .with_context(|| format!("failed to load network from {}", source.describe()))?;

    if let Some(registry_path) = registry {
        let records = FacilityRegistry::from_path(registry_path).with_context(|| {
            format!(
                "failed to load facility registry from {}",
                registry_path.display()
            )
        })?;
        info!(
            path = %registry_path.display(),
            facilities = records.len(),
            "replacing facility registry"
        );
        finder = finder.with_registry(records);
    }

    for record in finder.unmatched_facilities() {
        warn!(
            facility = %record.name,
            node = %record.node,
            "facility references an area missing from the network; it will not be ranked"
        );
    }

    Ok(LoadedNetwork { source, finder })
}
