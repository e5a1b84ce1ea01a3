use std::fmt;
use std::str::FromStr;

use crate::model::coefficients::Coefficient;

/// Qualitative effect of a modulator on a factor-target relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModulationCategory {
    InvertsActivation,
    InvertsInhibition,
    EnhancesActivation,
    EnhancesInhibition,
    AttenuatesActivation,
    AttenuatesInhibition,
}

/// Matching order. An inversion also satisfies the enhancement and attenuation patterns of
/// the opposite direction, so inversions must be tried first.
pub fn category_order() -> &'static [ModulationCategory] {
    &[
        ModulationCategory::InvertsActivation,
        ModulationCategory::InvertsInhibition,
        ModulationCategory::EnhancesActivation,
        ModulationCategory::EnhancesInhibition,
        ModulationCategory::AttenuatesActivation,
        ModulationCategory::AttenuatesInhibition,
    ]
}

impl ModulationCategory {
    /// Required signs over `(gamma, alphaF, betaF, betaM, aFbM)`; `0` means unconstrained.
    pub fn requirement(self) -> [i8; 5] {
        match self {
            ModulationCategory::InvertsActivation => [-1, 1, -1, -1, -1],
            ModulationCategory::InvertsInhibition => [1, -1, 1, 1, 1],
            ModulationCategory::EnhancesActivation => [1, 0, 1, 1, 1],
            ModulationCategory::EnhancesInhibition => [-1, 0, -1, -1, -1],
            ModulationCategory::AttenuatesActivation => [-1, 1, 0, 0, 0],
            ModulationCategory::AttenuatesInhibition => [1, -1, 0, 0, 0],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModulationCategory::InvertsActivation => "INVERTS_ACTIVATION",
            ModulationCategory::InvertsInhibition => "INVERTS_INHIBITION",
            ModulationCategory::EnhancesActivation => "ENHANCES_ACTIVATION",
            ModulationCategory::EnhancesInhibition => "ENHANCES_INHIBITION",
            ModulationCategory::AttenuatesActivation => "ATTENUATES_ACTIVATION",
            ModulationCategory::AttenuatesInhibition => "ATTENUATES_INHIBITION",
        }
    }

    /// True for the three categories drawn above the factor line.
    pub fn is_activation(self) -> bool {
        matches!(
            self,
            ModulationCategory::InvertsActivation
                | ModulationCategory::EnhancesActivation
                | ModulationCategory::AttenuatesActivation
        )
    }

    fn matches(self, coefficients: &[Coefficient; 5], threshold: f64) -> bool {
        self.requirement()
            .iter()
            .zip(coefficients.iter())
            .filter(|(r, _)| **r != 0)
            .all(|(r, c)| c.p_value <= threshold && c.sign() == *r)
    }
}

impl fmt::Display for ModulationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModulationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        category_order()
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown modulation category: {s}"))
    }
}

/// First category in matching order whose constrained coefficients are all significant at
/// `threshold` and carry the required sign. Zero-valued coefficients never match a sign.
pub fn match_category(
    coefficients: &[Coefficient; 5],
    threshold: f64,
) -> Option<ModulationCategory> {
    category_order()
        .iter()
        .copied()
        .find(|category| category.matches(coefficients, threshold))
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/category.rs"]
mod tests;
