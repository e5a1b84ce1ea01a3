use tracing::info;

use crate::candidates::custom::{CustomCandidates, MergedCandidates};
use crate::candidates::sif::SifCandidates;
use crate::candidates::{
    CandidateSource, generate_for_factor, generate_for_factor_and_modulator,
};
use crate::config::RunParameters;
use crate::error::Result;
use crate::input::ExpressionSource;
use crate::model::triplet::Triplet;

/// Builds the tested triplets. With a SIF network, explicit sets are merged into the network
/// candidates; a lone explicit modulator without explicit targets switches to the
/// single-modulator mode.
pub fn run_stage2(params: &RunParameters, expression: &dyn ExpressionSource) -> Result<Vec<Triplet>> {
    let factor = params.factor()?;
    let custom = CustomCandidates::new(params.modulators.clone(), params.targets.clone());

    let Some(sif_path) = &params.sif_file else {
        return generate_for_factor(factor, &custom, expression);
    };

    let network = SifCandidates::load(sif_path)?;
    let single_modulator = params
        .modulators
        .first()
        .filter(|_| params.modulators.len() == 1 && params.targets.is_empty());
    if let Some(modulator) = single_modulator {
        info!("single-modulator mode: {}", modulator);
        return generate_for_factor_and_modulator(factor, modulator, &network, expression);
    }

    let sources: Vec<&dyn CandidateSource> = vec![&network, &custom];
    let merged = MergedCandidates::new(sources);
    generate_for_factor(factor, &merged, expression)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_candidates.rs"]
mod tests;
