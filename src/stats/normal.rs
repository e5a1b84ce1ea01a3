//! Two-sided normal approximation for differences of proportions.

use statrs::function::erf::erfc;

/// Two-sided p-value of a difference `value` with standard error `se`:
/// `1 - erf(|value| / (sqrt(2) * se))`.
///
/// Any degenerate input (non-finite value, zero or non-finite standard error) yields `1.0`.
pub fn normal_tail_pvalue(value: f64, se: f64) -> f64 {
    if !value.is_finite() || !se.is_finite() || se <= 0.0 {
        return 1.0;
    }
    let z = value.abs() / (std::f64::consts::SQRT_2 * se);
    erfc(z).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/normal.rs"]
mod tests;
