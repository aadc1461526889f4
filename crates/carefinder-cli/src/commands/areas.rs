//! Areas command handler for listing search starting points.

use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;

use carefinder_cli::output::{print_summary, OutputFormat, Summary};
use carefinder_cli::terminal::ColorPalette;
use carefinder_lib::RenderMode;

use crate::commands::network::LoadedNetwork;

/// Non-facility areas plus graph statistics.
#[derive(Debug, Serialize)]
struct AreaListing {
    source: String,
    areas: Vec<String>,
    nodes: usize,
    roads: usize,
    facilities: usize,
    #[serde(skip)]
    palette: ColorPalette,
}

impl AreaListing {
    fn new(network: &LoadedNetwork, palette: ColorPalette) -> Self {
        let graph = network.finder.graph();
        Self {
            source: network.source.describe(),
            areas: network.finder.list_areas(),
            nodes: graph.node_count(),
            roads: graph.edge_count(),
            facilities: graph.facility_count(),
            palette,
        }
    }
}

impl Summary for AreaListing {
    fn render(&self, mode: RenderMode) -> String {
        let p = &self.palette;
        let mut buffer = String::new();
        match mode {
            RenderMode::PlainText => {
                let _ = writeln!(buffer, "Areas in {}:", self.source);
                for area in &self.areas {
                    let _ = writeln!(buffer, " - {}{}{}", p.white_bold, area, p.reset);
                }
            }
            RenderMode::RichText => {
                let _ = writeln!(buffer, "**Areas** in _{}_", self.source);
                for area in &self.areas {
                    let _ = writeln!(buffer, "* `{}`", area);
                }
            }
            RenderMode::Note => {
                for area in &self.areas {
                    let _ = writeln!(buffer, "{}", area);
                }
                return buffer;
            }
        }
        let _ = writeln!(
            buffer,
            "{}{} nodes, {} roads, {}{} facilities{}",
            p.gray, self.nodes, self.roads, p.green, self.facilities, p.reset
        );
        buffer
    }
}

/// Handle the areas subcommand.
pub fn handle_areas(network: &LoadedNetwork, format: OutputFormat) -> Result<()> {
    let palette = if format == OutputFormat::Text {
        ColorPalette::detect()
    } else {
        ColorPalette::plain()
    };
    let listing = AreaListing::new(network, palette);
    print_summary(&listing, format)
}
