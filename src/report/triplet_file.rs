//! Tab-separated triplet result file: symbols, category and the flattened count cube.

use std::fs;
use std::path::Path;

use crate::error::{GemError, Result};
use crate::model::category::ModulationCategory;
use crate::model::counts::CountCube;
use crate::model::triplet::Triplet;

pub const TRIPLET_FILE_HEADER: &str =
    "Modulator\tFactor\tTarget\tModulation Category\t000\t001\t010\t011\t100\t101\t110\t111";

/// Written in place of a category for triplets that have none.
pub const UNASSIGNED_CATEGORY: &str = "NA";

const N_COLUMNS: usize = 12;

pub fn format_triplet_row(triplet: &Triplet) -> String {
    let category = triplet
        .category
        .map_or(UNASSIGNED_CATEGORY, ModulationCategory::name);
    let mut row = format!(
        "{}\t{}\t{}\t{}",
        triplet.modulator, triplet.factor, triplet.target, category
    );
    for count in triplet.counts.flat() {
        row.push('\t');
        row.push_str(&count.to_string());
    }
    row
}

/// Header plus one row per triplet in input order, rows separated by newlines.
pub fn render_triplets(triplets: &[Triplet]) -> String {
    let mut out = String::from(TRIPLET_FILE_HEADER);
    for triplet in triplets {
        out.push('\n');
        out.push_str(&format_triplet_row(triplet));
    }
    out
}

pub fn write_triplet_file(path: &Path, triplets: &[Triplet]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_triplets(triplets))?;
    Ok(())
}

/// Parses a triplet file. The first line is the header; counts are restored verbatim and no
/// coefficients are recomputed.
pub fn parse_triplets(text: &str) -> Result<Vec<Triplet>> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        out.push(parse_triplet_row(line, line_no)?);
    }
    Ok(out)
}

pub fn read_triplet_file(path: &Path) -> Result<Vec<Triplet>> {
    let text = fs::read_to_string(path).map_err(|e| {
        GemError::MissingInput(format!("cannot read triplet file {}: {e}", path.display()))
    })?;
    parse_triplets(&text)
}

fn parse_triplet_row(line: &str, line_no: usize) -> Result<Triplet> {
    let fields: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();
    if fields.len() < N_COLUMNS {
        return Err(GemError::Parse {
            line: line_no,
            reason: format!("expected {} columns, found {}", N_COLUMNS, fields.len()),
        });
    }

    let category = match fields[3] {
        UNASSIGNED_CATEGORY => None,
        name => Some(
            name.parse::<ModulationCategory>()
                .map_err(|reason| GemError::Parse {
                    line: line_no,
                    reason,
                })?,
        ),
    };

    let mut flat = [0u32; 8];
    for (slot, field) in flat.iter_mut().zip(&fields[4..N_COLUMNS]) {
        *slot = field.trim().parse::<u32>().map_err(|_| GemError::Parse {
            line: line_no,
            reason: format!("invalid count '{field}'"),
        })?;
    }

    let mut triplet = Triplet::from_counts(fields[0], fields[1], fields[2], CountCube::from_flat(flat));
    triplet.category = category;
    Ok(triplet)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/triplet_file.rs"]
mod tests;
