use tracing::{debug, info, warn};

use crate::model::triplet::Triplet;

#[derive(Debug, Clone)]
pub struct Stage5Output {
    pub triplets: Vec<Triplet>,
    pub n_monotonic: usize,
    pub n_unstable_ratio: usize,
}

/// Fills the remaining coefficients, keeps triplets with `alphaM / betaM < 1` and assigns a
/// category at `category_threshold`; triplets without a category are dropped.
///
/// The ratio is signed and unguarded: a non-finite ratio (betaM at zero) fails the comparison
/// unless it is negative infinity.
pub fn run_stage5(triplets: Vec<Triplet>, category_threshold: f64) -> Stage5Output {
    let family = triplets.len();
    let mut n_monotonic = 0usize;
    let mut n_unstable_ratio = 0usize;
    let mut out = Vec::new();

    for triplet in triplets {
        let triplet = triplet.with_other_coefficients();
        let ratio = triplet.coefficients.monotonicity_ratio().unwrap_or(f64::NAN);
        if !ratio.is_finite() {
            n_unstable_ratio += 1;
            debug!(
                "unstable alphaM/betaM ratio for {}: {}",
                triplet.label(),
                ratio
            );
        }
        let monotonic = ratio < 1.0;
        if !monotonic {
            continue;
        }
        n_monotonic += 1;

        let triplet = triplet.with_category(category_threshold);
        if triplet.category.is_some() {
            out.push(triplet);
        }
    }

    if n_unstable_ratio > 0 {
        warn!(
            "{} triplets had a non-finite alphaM/betaM ratio (betaM near zero)",
            n_unstable_ratio
        );
    }
    info!(
        "classification: family={}, monotonic={}, categorized={}",
        family,
        n_monotonic,
        out.len()
    );

    Stage5Output {
        triplets: out,
        n_monotonic,
        n_unstable_ratio,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_classify.rs"]
mod tests;
