use std::collections::BTreeSet;

use crate::candidates::CandidateSource;

/// Fixed, user-supplied candidate sets that ignore the factor.
#[derive(Debug, Clone, Default)]
pub struct CustomCandidates {
    pub modulators: BTreeSet<String>,
    pub targets: BTreeSet<String>,
}

impl CustomCandidates {
    pub fn new(modulators: BTreeSet<String>, targets: BTreeSet<String>) -> Self {
        Self {
            modulators,
            targets,
        }
    }
}

impl CandidateSource for CustomCandidates {
    fn modulators(&self, _factor: &str) -> BTreeSet<String> {
        self.modulators.clone()
    }

    fn targets(&self, _factor: &str) -> BTreeSet<String> {
        self.targets.clone()
    }
}

/// Union of several sources.
pub struct MergedCandidates<'a> {
    sources: Vec<&'a dyn CandidateSource>,
}

impl<'a> MergedCandidates<'a> {
    pub fn new(sources: Vec<&'a dyn CandidateSource>) -> Self {
        Self { sources }
    }
}

impl CandidateSource for MergedCandidates<'_> {
    fn modulators(&self, factor: &str) -> BTreeSet<String> {
        self.sources
            .iter()
            .flat_map(|s| s.modulators(factor))
            .collect()
    }

    fn targets(&self, factor: &str) -> BTreeSet<String> {
        self.sources.iter().flat_map(|s| s.targets(factor)).collect()
    }
}
