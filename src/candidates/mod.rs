//! Hypothesis generation: which `(M, F, T)` triplets to test for a factor.

use std::collections::BTreeSet;
use std::rc::Rc;

use tracing::{info, warn};

use crate::error::Result;
use crate::input::ExpressionSource;
use crate::model::gene::GeneVector;
use crate::model::triplet::Triplet;

pub mod custom;
pub mod sif;

/// Supplies modulator and target candidates for a factor.
pub trait CandidateSource {
    fn modulators(&self, factor: &str) -> BTreeSet<String>;

    fn targets(&self, factor: &str) -> BTreeSet<String>;
}

/// Builds every modulator x target triplet for `factor`.
///
/// Symbols that are both modulator and target candidates are kept as targets only, the factor
/// is removed from both sides, and symbols missing from the expression source are dropped.
pub fn generate_for_factor(
    factor: &str,
    source: &dyn CandidateSource,
    expression: &dyn ExpressionSource,
) -> Result<Vec<Triplet>> {
    let Some(factor_gene) = expression.get(factor) else {
        warn!("factor {} has no expression data; no triplets generated", factor);
        return Ok(Vec::new());
    };

    let mut targets = source.targets(factor);
    let mut modulators = source.modulators(factor);
    modulators.retain(|m| !targets.contains(m));
    modulators.remove(factor);
    targets.remove(factor);

    let modulator_genes = resolve(&modulators, expression);
    let target_genes = resolve(&targets, expression);

    let mut out = Vec::with_capacity(modulator_genes.len() * target_genes.len());
    for m in &modulator_genes {
        for t in &target_genes {
            out.push(Triplet::from_genes(m, &factor_gene, t)?);
        }
    }

    info!(
        "candidates for {}: modulators={} ({} with data), targets={} ({} with data), triplets={}",
        factor,
        modulators.len(),
        modulator_genes.len(),
        targets.len(),
        target_genes.len(),
        out.len()
    );
    Ok(out)
}

/// Builds triplets for one fixed modulator against the factor's target candidates.
pub fn generate_for_factor_and_modulator(
    factor: &str,
    modulator: &str,
    source: &dyn CandidateSource,
    expression: &dyn ExpressionSource,
) -> Result<Vec<Triplet>> {
    let Some(factor_gene) = expression.get(factor) else {
        warn!("factor {} has no expression data; no triplets generated", factor);
        return Ok(Vec::new());
    };
    let Some(modulator_gene) = expression.get(modulator) else {
        warn!(
            "modulator {} has no expression data; no triplets generated",
            modulator
        );
        return Ok(Vec::new());
    };

    let mut targets = source.targets(factor);
    targets.remove(factor);
    targets.remove(modulator);

    let target_genes = resolve(&targets, expression);
    let mut out = Vec::with_capacity(target_genes.len());
    for t in &target_genes {
        out.push(Triplet::from_genes(&modulator_gene, &factor_gene, t)?);
    }

    info!(
        "candidates for {} with modulator {}: targets={} ({} with data)",
        factor,
        modulator,
        targets.len(),
        target_genes.len()
    );
    Ok(out)
}

fn resolve(symbols: &BTreeSet<String>, expression: &dyn ExpressionSource) -> Vec<Rc<GeneVector>> {
    symbols.iter().filter_map(|s| expression.get(s)).collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/candidates/tests.rs"]
mod tests;
