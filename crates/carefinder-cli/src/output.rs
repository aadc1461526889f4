//! Output formatting for command results.
//!
//! Every command produces a serialisable summary from `carefinder-lib`. The
//! `--format` flag selects one of the library's text renderings or JSON.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use carefinder_lib::{DistanceSummary, NearestSummary, RankingSummary, RenderMode};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly plain text.
    #[default]
    Text,
    /// Markdown-flavoured text.
    Rich,
    /// Compact two-line note.
    Note,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Library render mode for the text formats; `None` for JSON.
    pub fn render_mode(self) -> Option<RenderMode> {
        match self {
            OutputFormat::Text => Some(RenderMode::PlainText),
            OutputFormat::Rich => Some(RenderMode::RichText),
            OutputFormat::Note => Some(RenderMode::Note),
            OutputFormat::Json => None,
        }
    }
}

/// A command result that can be rendered as text or serialised.
pub trait Summary: Serialize {
    fn render(&self, mode: RenderMode) -> String;
}

impl Summary for NearestSummary {
    fn render(&self, mode: RenderMode) -> String {
        NearestSummary::render(self, mode)
    }
}

impl Summary for DistanceSummary {
    fn render(&self, mode: RenderMode) -> String {
        DistanceSummary::render(self, mode)
    }
}

impl Summary for RankingSummary {
    fn render(&self, mode: RenderMode) -> String {
        RankingSummary::render(self, mode)
    }
}

/// Format a summary in the requested output format.
pub fn format_summary<S: Summary>(summary: &S, format: OutputFormat) -> Result<String> {
    match format.render_mode() {
        Some(mode) => Ok(summary.render(mode)),
        None => {
            let mut json =
                serde_json::to_string_pretty(summary).context("failed to serialise output")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write a summary to stdout.
pub fn print_summary<S: Summary>(summary: &S, format: OutputFormat) -> Result<()> {
    let text = format_summary(summary, format)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .context("failed to write output")?;
    Ok(())
}
