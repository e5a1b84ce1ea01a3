use tracing::info;

use crate::model::triplet::Triplet;
use crate::stats::fdr::select_bh;

/// Computes betaM for the gamma survivors and applies BH again, with the survivors as the
/// new family.
pub fn run_stage4(triplets: Vec<Triplet>, fdr: f64) -> Vec<Triplet> {
    let family = triplets.len();
    let tests: Vec<(Triplet, f64)> = triplets
        .into_iter()
        .map(Triplet::with_beta_m)
        .map(|t| {
            let p = t.beta_m_p();
            (t, p)
        })
        .collect();
    let selected = select_bh(tests, fdr);
    info!(
        "betaM selection: family={}, selected={} (fdr {})",
        family,
        selected.len(),
        fdr
    );
    selected
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_beta_m.rs"]
mod tests;
