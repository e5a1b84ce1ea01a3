use tracing::info;

use crate::model::triplet::Triplet;
use crate::stats::fdr::select_bh;

/// Computes the interaction coefficient for every triplet and keeps those selected by BH at
/// `fdr` over the whole input family.
pub fn run_stage3(triplets: Vec<Triplet>, fdr: f64) -> Vec<Triplet> {
    let family = triplets.len();
    let tests: Vec<(Triplet, f64)> = triplets
        .into_iter()
        .map(Triplet::with_gamma)
        .map(|t| {
            let p = t.gamma_p();
            (t, p)
        })
        .collect();
    let selected = select_bh(tests, fdr);
    info!(
        "gamma selection: family={}, selected={} (fdr {})",
        family,
        selected.len(),
        fdr
    );
    selected
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_gamma.rs"]
mod tests;
