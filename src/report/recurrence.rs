//! Recurrence of result triplets across runs, e.g. the same factor in several cohorts.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;
use crate::model::triplet::{Triplet, TripletKey};
use crate::report::svg::{GroupBy, write_gem_plot};
use crate::report::triplet_file::{read_triplet_file, write_triplet_file};

pub const RECURRENT_PREFIX: &str = "recurrent_";

/// Triplet files (`*.txt`) directly under `dir`, sorted by name. Earlier recurrence outputs
/// are not inputs.
pub fn list_triplet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_txt = path.extension().is_some_and(|ext| ext == "txt");
        let is_output = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with(RECURRENT_PREFIX));
        if path.is_file() && is_txt && !is_output {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Number of files each triplet identity `(M, F, T, category)` appears in, keeping the first
/// occurrence as representative.
pub fn count_recurrence(runs: &[Vec<Triplet>]) -> BTreeMap<TripletKey, (Triplet, usize)> {
    let mut counts: BTreeMap<TripletKey, (Triplet, usize)> = BTreeMap::new();
    for run in runs {
        let mut seen = BTreeSet::new();
        for triplet in run {
            let key = triplet.key();
            if !seen.insert(key.clone()) {
                continue;
            }
            counts
                .entry(key)
                .and_modify(|(_, n)| *n += 1)
                .or_insert_with(|| (triplet.clone(), 1));
        }
    }
    counts
}

/// Triplets seen in at least `min_runs` runs, ordered by identity.
pub fn recurrent_at(counts: &BTreeMap<TripletKey, (Triplet, usize)>, min_runs: usize) -> Vec<Triplet> {
    counts
        .values()
        .filter(|(_, n)| *n >= min_runs)
        .map(|(t, _)| t.clone())
        .collect()
}

/// Writes `recurrent_<r>.txt` and `.svg` for `r = min_runs, min_runs + 1, ...` until a level
/// is empty. Returns the written levels with their sizes.
pub fn integrate_runs(input_dir: &Path, out_dir: &Path, min_runs: usize) -> Result<Vec<(usize, usize)>> {
    let files = list_triplet_files(input_dir)?;
    let mut runs = Vec::with_capacity(files.len());
    for file in &files {
        runs.push(read_triplet_file(file)?);
    }
    info!("recurrence: {} result files in {}", runs.len(), input_dir.display());

    let counts = count_recurrence(&runs);
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    let mut level = min_runs.max(1);
    loop {
        let triplets = recurrent_at(&counts, level);
        if triplets.is_empty() {
            break;
        }
        let stem = format!("{RECURRENT_PREFIX}{level}");
        write_triplet_file(&out_dir.join(format!("{stem}.txt")), &triplets)?;
        let n_factors = triplets.iter().map(|t| &t.factor).collect::<BTreeSet<_>>().len();
        if n_factors == 1 {
            write_gem_plot(&out_dir.join(format!("{stem}.svg")), &triplets, GroupBy::Modulator)?;
        } else {
            warn!("recurrence level {} mixes {} factors; skipping plot", level, n_factors);
        }
        info!("recurrence level {}: {} triplets", level, triplets.len());
        written.push((level, triplets.len()));
        level += 1;
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/recurrence.rs"]
mod tests;
