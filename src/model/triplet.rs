use crate::error::Result;
use crate::model::category::{ModulationCategory, match_category};
use crate::model::coefficients::Coefficients;
use crate::model::counts::CountCube;
use crate::model::gene::GeneVector;
use crate::stats::contrast;

/// A modulator-factor-target hypothesis with its joint tertile counts.
///
/// Coefficients start empty and are filled by the selector stages through the consuming
/// `with_*` methods; the count cube never changes after construction.
#[derive(Debug, Clone)]
pub struct Triplet {
    pub modulator: String,
    pub factor: String,
    pub target: String,
    pub counts: CountCube,
    pub coefficients: Coefficients,
    pub category: Option<ModulationCategory>,
}

/// Identity used for recurrence counting across result files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripletKey {
    pub modulator: String,
    pub factor: String,
    pub target: String,
    pub category: Option<ModulationCategory>,
}

impl Triplet {
    pub fn from_genes(modulator: &GeneVector, factor: &GeneVector, target: &GeneVector) -> Result<Self> {
        let counts = CountCube::from_genes(modulator, factor, target)?;
        Ok(Self::from_counts(
            modulator.symbol(),
            factor.symbol(),
            target.symbol(),
            counts,
        ))
    }

    pub fn from_counts(
        modulator: impl Into<String>,
        factor: impl Into<String>,
        target: impl Into<String>,
        counts: CountCube,
    ) -> Self {
        Self {
            modulator: modulator.into(),
            factor: factor.into(),
            target: target.into(),
            counts,
            coefficients: Coefficients::default(),
            category: None,
        }
    }

    pub fn with_gamma(mut self) -> Self {
        self.coefficients.gamma = Some(contrast::interaction(&self.counts));
        self
    }

    pub fn with_beta_m(mut self) -> Self {
        self.coefficients.beta_m = Some(contrast::beta_m(&self.counts));
        self
    }

    pub fn with_other_coefficients(mut self) -> Self {
        self.coefficients.alpha_m = Some(contrast::alpha_m(&self.counts));
        self.coefficients.alpha_f = Some(contrast::alpha_f(&self.counts));
        self.coefficients.beta_f = Some(contrast::beta_f(&self.counts));
        self.coefficients.a_f_b_m = Some(contrast::a_f_b_m(&self.counts));
        self
    }

    /// Assigns the first matching category, or none when a classification input is missing.
    pub fn with_category(mut self, threshold: f64) -> Self {
        self.category = self
            .coefficients
            .classification_inputs()
            .and_then(|inputs| match_category(&inputs, threshold));
        self
    }

    pub fn gamma_p(&self) -> f64 {
        self.coefficients.gamma.map_or(1.0, |c| c.p_value)
    }

    pub fn beta_m_p(&self) -> f64 {
        self.coefficients.beta_m.map_or(1.0, |c| c.p_value)
    }

    pub fn key(&self) -> TripletKey {
        TripletKey {
            modulator: self.modulator.clone(),
            factor: self.factor.clone(),
            target: self.target.clone(),
            category: self.category,
        }
    }

    /// Equality of everything a triplet file records: symbols, category and counts.
    pub fn same_record(&self, other: &Triplet) -> bool {
        self.modulator == other.modulator
            && self.factor == other.factor
            && self.target == other.target
            && self.category == other.category
            && self.counts == other.counts
    }

    pub fn label(&self) -> String {
        format!("{}/{}/{}", self.modulator, self.factor, self.target)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/triplet.rs"]
mod tests;
