//! Nearest command handler.

use anyhow::Result;
use tracing::debug;

use carefinder_cli::output::{print_summary, OutputFormat};
use carefinder_lib::NearestSummary;

use crate::commands::network::LoadedNetwork;

/// Handle the nearest subcommand.
///
/// Unknown areas fail the command; an area with no reachable facility prints
/// the "No Facility Found" summary and succeeds.
pub fn handle_nearest(network: &LoadedNetwork, from: &str, format: OutputFormat) -> Result<()> {
    let area = network.resolve_area(from)?;
    let search = network.finder.nearest_facility(&area);
    debug!(area = %area, found = search.found().is_some(), "nearest facility search finished");

    let summary = NearestSummary::from_search(&network.finder, &area, &search);
    print_summary(&summary, format)
}
