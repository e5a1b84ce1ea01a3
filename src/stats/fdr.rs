//! Benjamini-Hochberg selection.
//!
//! The family is exactly the set of items handed in; callers re-run the procedure on the
//! survivors of a previous stage when they want a stage-local family.

/// Largest p-value admitted by the BH step-up rule at rate `fdr`, or `None` when no rank
/// qualifies. Non-finite p-values count towards the family size but are never admitted.
pub fn bh_cutoff(pvalues: &[f64], fdr: f64) -> Option<f64> {
    let n = pvalues.len();
    if n == 0 {
        return None;
    }

    let mut sorted: Vec<f64> = pvalues
        .iter()
        .map(|&p| if p.is_nan() { f64::INFINITY } else { p })
        .collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut cutoff = None;
    for (rank0, &p) in sorted.iter().enumerate() {
        let k = (rank0 + 1) as f64;
        if p <= fdr * k / n as f64 {
            cutoff = Some(p);
        }
    }
    cutoff
}

/// Returns the items whose p-value is at or below the BH cutoff, in input order.
/// Ties at the cutoff are all kept.
pub fn select_bh<T>(tests: Vec<(T, f64)>, fdr: f64) -> Vec<T> {
    let pvalues: Vec<f64> = tests.iter().map(|(_, p)| *p).collect();
    let Some(cutoff) = bh_cutoff(&pvalues, fdr) else {
        return Vec::new();
    };
    tests
        .into_iter()
        .filter(|(_, p)| *p <= cutoff)
        .map(|(item, _)| item)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/fdr.rs"]
mod tests;
