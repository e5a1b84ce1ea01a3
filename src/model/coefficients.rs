/// A contrast between row proportions and its two-sided significance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficient {
    pub value: f64,
    pub p_value: f64,
}

impl Coefficient {
    pub fn new(value: f64, p_value: f64) -> Self {
        Self { value, p_value }
    }

    /// Strict sign: `1` positive, `-1` negative, `0` for zero or NaN.
    pub fn sign(&self) -> i8 {
        if self.value > 0.0 {
            1
        } else if self.value < 0.0 {
            -1
        } else {
            0
        }
    }
}

/// Coefficients of a triplet, filled in stage by stage by the selector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coefficients {
    pub gamma: Option<Coefficient>,
    pub beta_m: Option<Coefficient>,
    pub alpha_m: Option<Coefficient>,
    pub alpha_f: Option<Coefficient>,
    pub beta_f: Option<Coefficient>,
    pub a_f_b_m: Option<Coefficient>,
}

impl Coefficients {
    /// The classification inputs `(gamma, alphaF, betaF, betaM, aFbM)`, available once every
    /// one of them has been computed.
    pub fn classification_inputs(&self) -> Option<[Coefficient; 5]> {
        Some([
            self.gamma?,
            self.alpha_f?,
            self.beta_f?,
            self.beta_m?,
            self.a_f_b_m?,
        ])
    }

    /// `alphaM / betaM` under IEEE-754 semantics; `None` until both are known.
    pub fn monotonicity_ratio(&self) -> Option<f64> {
        Some(self.alpha_m?.value / self.beta_m?.value)
    }
}
