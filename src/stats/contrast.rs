//! Contrasts over the row proportions of a count cube.

use crate::model::coefficients::Coefficient;
use crate::model::counts::CountCube;
use crate::stats::normal::normal_tail_pvalue;

/// Interaction `p11 - p01 - p10 + p00` with a pooled-proportion standard error over all
/// four rows. Any empty row makes the coefficient non-significant.
pub fn interaction(cube: &CountCube) -> Coefficient {
    let n = cube.totals();
    let p = cube.proportions();

    let (Some(p00), Some(p01), Some(p10), Some(p11)) = (p[0][0], p[0][1], p[1][0], p[1][1]) else {
        return Coefficient::new(f64::NAN, 1.0);
    };

    let value = p11 - p01 - p10 + p00;

    let high = (cube.row_high(0, 0) + cube.row_high(0, 1) + cube.row_high(1, 0) + cube.row_high(1, 1))
        as f64;
    let total = (n[0][0] + n[0][1] + n[1][0] + n[1][1]) as f64;
    let pooled = high / total;
    let inv_sum = 1.0 / n[0][0] as f64
        + 1.0 / n[0][1] as f64
        + 1.0 / n[1][0] as f64
        + 1.0 / n[1][1] as f64;
    let se = (pooled * (1.0 - pooled) * inv_sum).sqrt();

    Coefficient::new(value, normal_tail_pvalue(value, se))
}

/// Difference `p[i][j] - p[k][l]` with a pooled two-row standard error.
pub fn pairwise(cube: &CountCube, (i, j): (usize, usize), (k, l): (usize, usize)) -> Coefficient {
    let (Some(pij), Some(pkl)) = (cube.proportion(i, j), cube.proportion(k, l)) else {
        return Coefficient::new(f64::NAN, 1.0);
    };

    let value = pij - pkl;

    let nij = cube.row_total(i, j) as f64;
    let nkl = cube.row_total(k, l) as f64;
    let pooled = (cube.row_high(i, j) + cube.row_high(k, l)) as f64 / (nij + nkl);
    let se = (pooled * (1.0 - pooled) * (1.0 / nij + 1.0 / nkl)).sqrt();

    Coefficient::new(value, normal_tail_pvalue(value, se))
}

/// Effect of the modulator when the factor is high.
pub fn beta_m(cube: &CountCube) -> Coefficient {
    pairwise(cube, (1, 1), (0, 1))
}

/// Effect of the modulator when the factor is low.
pub fn alpha_m(cube: &CountCube) -> Coefficient {
    pairwise(cube, (1, 0), (0, 0))
}

/// Effect of the factor when the modulator is low.
pub fn alpha_f(cube: &CountCube) -> Coefficient {
    pairwise(cube, (0, 1), (0, 0))
}

/// Effect of the factor when the modulator is high.
pub fn beta_f(cube: &CountCube) -> Coefficient {
    pairwise(cube, (1, 1), (1, 0))
}

/// Diagonal contrast between both-high and both-low rows.
pub fn a_f_b_m(cube: &CountCube) -> Coefficient {
    pairwise(cube, (1, 1), (0, 0))
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/contrast.rs"]
mod tests;
