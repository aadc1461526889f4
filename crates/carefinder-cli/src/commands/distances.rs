//! Distances command handler.

use anyhow::Result;

use carefinder_cli::output::{print_summary, OutputFormat};
use carefinder_lib::DistanceSummary;

use crate::commands::network::LoadedNetwork;

/// Handle the distances subcommand.
pub fn handle_distances(network: &LoadedNetwork, from: &str, format: OutputFormat) -> Result<()> {
    let area = network.resolve_area(from)?;
    let distances = network.finder.distances_from(&area);
    let summary = DistanceSummary::from_map(network.finder.graph(), &area, &distances);
    print_summary(&summary, format)
}
