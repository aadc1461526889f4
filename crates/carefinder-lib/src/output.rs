use std::cmp::Ordering;
use std::fmt::Write;

use serde::Serialize;

use crate::finder::CareFinder;
use crate::graph::AreaGraph;
use crate::path::{DistanceMap, FacilitySearch};
use crate::recommend::RankedEntry;
use crate::registry::FacilityRecord;

/// Facility label reported when the query area is not in the network.
pub const UNKNOWN_AREA_LABEL: &str = "Unknown Area";
/// Facility label reported when no facility can be reached.
pub const NO_FACILITY_LABEL: &str = "No Facility Found";

/// Presentation style for turning a summary into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    PlainText,
    RichText,
    Note,
}

/// Outcome classification of a nearest-facility query.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Found,
    UnknownArea,
    NoFacilityReachable,
}

/// Step along a nearest-facility path.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathStep {
    pub index: usize,
    pub name: String,
    /// Length of the road taken to reach this step; absent for the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg: Option<f64>,
    pub cumulative: f64,
}

/// Structured nearest-facility answer.
///
/// When nothing is found, `facility` carries a sentinel label, `distance` is
/// `-1` and `path` is empty.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NearestSummary {
    pub source: String,
    pub status: SearchStatus,
    pub facility: String,
    pub distance: f64,
    pub hops: usize,
    pub path: Vec<String>,
    pub steps: Vec<PathStep>,
    /// Registry record attached to the facility node, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FacilityRecord>,
}

impl NearestSummary {
    pub fn from_search(finder: &CareFinder, source: &str, search: &FacilitySearch) -> Self {
        let (status, facility) = match search {
            FacilitySearch::Found(result) => (SearchStatus::Found, result),
            FacilitySearch::UnknownSource => {
                return Self::not_found(source, SearchStatus::UnknownArea, UNKNOWN_AREA_LABEL)
            }
            FacilitySearch::NoFacilityReachable => {
                return Self::not_found(
                    source,
                    SearchStatus::NoFacilityReachable,
                    NO_FACILITY_LABEL,
                )
            }
        };

        let steps = path_steps(finder.graph(), &facility.path);
        let details = finder
            .registry()
            .iter()
            .find(|record| record.node == facility.facility)
            .cloned();

        Self {
            source: source.to_string(),
            status,
            facility: facility.facility.clone(),
            distance: facility.total_distance,
            hops: facility.hop_count(),
            path: facility.path.clone(),
            steps,
            details,
        }
    }

    fn not_found(source: &str, status: SearchStatus, label: &str) -> Self {
        Self {
            source: source.to_string(),
            status,
            facility: label.to_string(),
            distance: -1.0,
            hops: 0,
            path: Vec::new(),
            steps: Vec::new(),
            details: None,
        }
    }

    fn display_facility(&self) -> &str {
        self.details
            .as_ref()
            .map(|record| record.name.as_str())
            .unwrap_or(&self.facility)
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RenderMode) -> String {
        let mut buffer = String::new();
        if self.status != SearchStatus::Found {
            let _ = writeln!(buffer, "{} (from {})", self.facility, self.source);
            return buffer;
        }

        match mode {
            RenderMode::PlainText => {
                let _ = writeln!(
                    buffer,
                    "Nearest facility from {}: {} ({:.1} km, {} hops)",
                    self.source,
                    self.display_facility(),
                    self.distance,
                    self.hops
                );
                for step in &self.steps {
                    match step.leg {
                        Some(leg) => {
                            let _ = writeln!(
                                buffer,
                                "{:>3}: {} (+{:.1} km, {:.1} km total)",
                                step.index, step.name, leg, step.cumulative
                            );
                        }
                        None => {
                            let _ = writeln!(buffer, "{:>3}: {}", step.index, step.name);
                        }
                    }
                }
                if let Some(details) = &self.details {
                    let _ = writeln!(
                        buffer,
                        "Location: {} (rating {:.1})",
                        details.location, details.rating
                    );
                }
            }
            RenderMode::RichText => {
                let _ = writeln!(
                    buffer,
                    "**Nearest facility**: _{} → {}_ ({:.1} km, {} hops)",
                    self.source,
                    self.display_facility(),
                    self.distance,
                    self.hops
                );
                for step in &self.steps {
                    let _ = writeln!(
                        buffer,
                        "* {:>2}. **{}** (`{:.1} km`)",
                        step.index, step.name, step.cumulative
                    );
                }
            }
            RenderMode::Note => {
                let _ = writeln!(
                    buffer,
                    "{} -> {} ({:.1} km)",
                    self.source,
                    self.display_facility(),
                    self.distance
                );
                let _ = writeln!(buffer, "{}", self.path.join(" -> "));
            }
        }
        buffer
    }
}

fn path_steps(graph: &AreaGraph, path: &[String]) -> Vec<PathStep> {
    let mut cumulative = 0.0;
    path.iter()
        .enumerate()
        .map(|(index, name)| {
            let leg = index.checked_sub(1).and_then(|prev| {
                graph
                    .neighbours(&path[prev])
                    .iter()
                    .filter(|edge| edge.target == *name)
                    .map(|edge| edge.distance)
                    .min_by(|a, b| a.total_cmp(b))
            });
            cumulative += leg.unwrap_or(0.0);
            PathStep {
                index,
                name: name.clone(),
                leg,
                cumulative,
            }
        })
        .collect()
}

/// Distance to a single node in a [`DistanceSummary`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceEntry {
    pub node: String,
    /// `None` when the node cannot be reached.
    pub distance: Option<f64>,
    pub facility: bool,
}

/// All distances from a source, nearest first and unreachable nodes last.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceSummary {
    pub source: String,
    pub known_source: bool,
    pub entries: Vec<DistanceEntry>,
}

impl DistanceSummary {
    pub fn from_map(graph: &AreaGraph, source: &str, distances: &DistanceMap) -> Self {
        let mut entries: Vec<DistanceEntry> = distances
            .iter()
            .map(|(node, distance)| DistanceEntry {
                node: node.to_string(),
                distance,
                facility: graph.is_facility(node),
            })
            .collect();

        // Map iteration is already name-ordered, so a stable sort by distance
        // leaves equal distances sorted by name.
        entries.sort_by(|a, b| match (a.distance, b.distance) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Self {
            source: source.to_string(),
            known_source: !distances.is_empty(),
            entries,
        }
    }

    pub fn render(&self, mode: RenderMode) -> String {
        let mut buffer = String::new();
        if !self.known_source {
            let _ = writeln!(buffer, "{} (from {})", UNKNOWN_AREA_LABEL, self.source);
            return buffer;
        }

        let _ = writeln!(buffer, "Distances from {}:", self.source);
        for entry in &self.entries {
            let marker = if entry.facility { " [facility]" } else { "" };
            let distance = entry
                .distance
                .map(|d| format!("{d:.1} km"))
                .unwrap_or_else(|| "unreachable".to_string());
            let _ = match mode {
                RenderMode::PlainText => {
                    writeln!(buffer, " - {}{}: {}", entry.node, marker, distance)
                }
                RenderMode::RichText => {
                    writeln!(buffer, "* **{}**{}: `{}`", entry.node, marker, distance)
                }
                RenderMode::Note => writeln!(buffer, "{} {}", entry.node, distance),
            };
        }
        buffer
    }
}

/// Row of a [`RankingSummary`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankingRow {
    pub rank: usize,
    pub name: String,
    pub location: String,
    pub distance: f64,
    pub rating: f64,
    pub score: f64,
}

/// Facilities ranked by composite score, best first.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankingSummary {
    pub source: String,
    pub entries: Vec<RankingRow>,
}

impl RankingSummary {
    pub fn from_entries(source: &str, ranked: &[RankedEntry]) -> Self {
        let entries = ranked
            .iter()
            .enumerate()
            .map(|(index, entry)| RankingRow {
                rank: index + 1,
                name: entry.facility.name.clone(),
                location: entry.facility.location.clone(),
                distance: entry.distance,
                rating: entry.facility.rating,
                score: entry.score,
            })
            .collect();

        Self {
            source: source.to_string(),
            entries,
        }
    }

    pub fn render(&self, mode: RenderMode) -> String {
        let mut buffer = String::new();
        if self.entries.is_empty() {
            let _ = writeln!(buffer, "No reachable facilities from {}", self.source);
            return buffer;
        }

        let _ = writeln!(
            buffer,
            "Recommendations from {} (lower score is better):",
            self.source
        );
        for row in &self.entries {
            let _ = match mode {
                RenderMode::PlainText => writeln!(
                    buffer,
                    "{:>3}. {} ({}) | score {:.2} | {:.1} km | rating {:.1}",
                    row.rank, row.name, row.location, row.score, row.distance, row.rating
                ),
                RenderMode::RichText => writeln!(
                    buffer,
                    "{}. **{}** _{}_: score `{:.2}`, {:.1} km, rating {:.1}",
                    row.rank, row.name, row.location, row.score, row.distance, row.rating
                ),
                RenderMode::Note => writeln!(buffer, "{} {:.2}", row.name, row.score),
            };
        }
        buffer
    }
}
