use crate::error::{GemError, Result};
use crate::model::gene::GeneVector;

/// Joint tertile counts `f[m][g][t]` of modulator, factor and target over samples where none
/// of the three sits in the middle tertile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountCube {
    pub f: [[[u32; 2]; 2]; 2],
}

impl CountCube {
    pub fn from_genes(modulator: &GeneVector, factor: &GeneVector, target: &GeneVector) -> Result<Self> {
        let n = modulator.len();
        if factor.len() != n || target.len() != n {
            return Err(GemError::InvalidInput(format!(
                "sample count mismatch in triplet {}/{}/{}: {} vs {} vs {}",
                modulator.symbol(),
                factor.symbol(),
                target.symbol(),
                n,
                factor.len(),
                target.len()
            )));
        }

        let mut cube = CountCube::default();
        let ms = modulator.status();
        let fs = factor.status();
        let ts = target.status();
        for i in 0..n {
            let (Some(m), Some(g), Some(t)) =
                (ms[i].cube_index(), fs[i].cube_index(), ts[i].cube_index())
            else {
                continue;
            };
            cube.f[m][g][t] += 1;
        }
        Ok(cube)
    }

    /// Builds a cube from its eight counts in `(m, g, t)` lexicographic order, `t` fastest.
    pub fn from_flat(flat: [u32; 8]) -> Self {
        let mut cube = CountCube::default();
        for (idx, value) in flat.into_iter().enumerate() {
            cube.f[idx >> 2][(idx >> 1) & 1][idx & 1] = value;
        }
        cube
    }

    pub fn flat(&self) -> [u32; 8] {
        let mut out = [0u32; 8];
        for (idx, slot) in out.iter_mut().enumerate() {
            *slot = self.f[idx >> 2][(idx >> 1) & 1][idx & 1];
        }
        out
    }

    pub fn total(&self) -> u32 {
        self.flat().iter().sum()
    }

    /// Row total `n[m][g]`.
    pub fn row_total(&self, m: usize, g: usize) -> u32 {
        self.f[m][g][0] + self.f[m][g][1]
    }

    /// Number of high-target samples `f[m][g][1]`.
    pub fn row_high(&self, m: usize, g: usize) -> u32 {
        self.f[m][g][1]
    }

    /// Proportion of high targets in row `(m, g)`; `None` for an empty row.
    pub fn proportion(&self, m: usize, g: usize) -> Option<f64> {
        let n = self.row_total(m, g);
        if n == 0 {
            return None;
        }
        Some(self.row_high(m, g) as f64 / n as f64)
    }

    pub fn totals(&self) -> [[u32; 2]; 2] {
        [
            [self.row_total(0, 0), self.row_total(0, 1)],
            [self.row_total(1, 0), self.row_total(1, 1)],
        ]
    }

    pub fn proportions(&self) -> [[Option<f64>; 2]; 2] {
        [
            [self.proportion(0, 0), self.proportion(0, 1)],
            [self.proportion(1, 0), self.proportion(1, 1)],
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/counts.rs"]
mod tests;
