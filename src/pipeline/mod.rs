pub mod stage1_expression;
pub mod stage2_candidates;
pub mod stage3_gamma;
pub mod stage4_beta_m;
pub mod stage5_classify;
pub mod stage6_report;

use crate::model::triplet::Triplet;
use stage3_gamma::run_stage3;
use stage4_beta_m::run_stage4;
use stage5_classify::run_stage5;

/// Survivor counts of each selector stage together with the final triplets.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    pub n_tested: usize,
    pub n_gamma: usize,
    pub n_beta_m: usize,
    pub n_monotonic: usize,
    pub n_unstable_ratio: usize,
    pub triplets: Vec<Triplet>,
}

/// Two BH stages (gamma, then betaM on the gamma survivors), the monotonicity filter and
/// category assignment. Output keeps input order.
pub fn run_selection(triplets: Vec<Triplet>, fdr: f64, category_threshold: f64) -> SelectionOutcome {
    let n_tested = triplets.len();
    let after_gamma = run_stage3(triplets, fdr);
    let n_gamma = after_gamma.len();
    let after_beta_m = run_stage4(after_gamma, fdr);
    let n_beta_m = after_beta_m.len();
    let stage5 = run_stage5(after_beta_m, category_threshold);
    SelectionOutcome {
        n_tested,
        n_gamma,
        n_beta_m,
        n_monotonic: stage5.n_monotonic,
        n_unstable_ratio: stage5.n_unstable_ratio,
        triplets: stage5.triplets,
    }
}

pub fn select_significant_and_categorized(
    triplets: Vec<Triplet>,
    fdr: f64,
    category_threshold: f64,
) -> Vec<Triplet> {
    run_selection(triplets, fdr, category_threshold).triplets
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/selection.rs"]
mod tests;
