//! Rank command handler.

use anyhow::Result;

use carefinder_cli::output::{print_summary, OutputFormat};
use carefinder_lib::RankingSummary;

use crate::commands::network::LoadedNetwork;

/// Handle the rank subcommand.
///
/// Facilities the area cannot reach are left out of the ranking.
pub fn handle_rank(network: &LoadedNetwork, from: &str, format: OutputFormat) -> Result<()> {
    let area = network.resolve_area(from)?;
    let ranked = network.finder.rank(&area);
    let summary = RankingSummary::from_entries(&area, &ranked);
    print_summary(&summary, format)
}
