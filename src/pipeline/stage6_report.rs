use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::input::ExpressionSource;
use crate::model::triplet::Triplet;
use crate::report::json::{RunSummary, render_summary_json};
use crate::report::network::write_modulator_network;
use crate::report::svg::{GroupBy, write_gem_plot};
use crate::report::triplet_file::write_triplet_file;

pub const SUMMARY_FILENAME: &str = "summary.json";

#[derive(Clone, Copy)]
pub struct Stage6Input<'a> {
    pub triplets: &'a [Triplet],
    pub triplet_path: &'a Path,
    pub svg_path: &'a Path,
    pub summary: &'a RunSummary,
    /// When set, the modulator correlation network is written next to the triplet table.
    pub expression: Option<&'a dyn ExpressionSource>,
}

/// Writes the triplet table, the figure, `summary.json` next to the triplet table and, with an
/// expression source, the modulator network. Returns the summary path.
pub fn write_reports(input: &Stage6Input<'_>) -> Result<PathBuf> {
    write_triplet_file(input.triplet_path, input.triplets)?;
    write_gem_plot(input.svg_path, input.triplets, GroupBy::Modulator)?;
    if let Some(expression) = input.expression {
        write_modulator_network(input.triplet_path, input.triplets, expression)?;
    }

    let summary_path = summary_path_for(input.triplet_path);
    let json = render_summary_json(input.summary)?;
    fs::write(&summary_path, json)?;

    info!(
        "wrote {} triplets to {}, figure to {}, summary to {}",
        input.triplets.len(),
        input.triplet_path.display(),
        input.svg_path.display(),
        summary_path.display()
    );
    Ok(summary_path)
}

pub fn summary_path_for(triplet_path: &Path) -> PathBuf {
    triplet_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(SUMMARY_FILENAME)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
