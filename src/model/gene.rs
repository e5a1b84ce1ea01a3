/// Rank stratum of one sample within a gene's expression vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tertile {
    Low,
    Middle,
    High,
}

impl Tertile {
    /// Integer status code: 0 low, -1 middle, 1 high.
    pub fn code(self) -> i8 {
        match self {
            Tertile::Low => 0,
            Tertile::Middle => -1,
            Tertile::High => 1,
        }
    }

    /// Index into the 2x2x2 count cube; the middle tertile has none.
    pub fn cube_index(self) -> Option<usize> {
        match self {
            Tertile::Low => Some(0),
            Tertile::High => Some(1),
            Tertile::Middle => None,
        }
    }
}

/// A gene symbol with its expression across the cohort and the derived tertile states.
#[derive(Debug, Clone)]
pub struct GeneVector {
    symbol: String,
    values: Vec<f64>,
    status: Vec<Tertile>,
}

impl GeneVector {
    pub fn new(symbol: impl Into<String>, values: Vec<f64>) -> Self {
        let status = assign_tertiles(&values);
        Self {
            symbol: symbol.into(),
            values,
            status,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn status(&self) -> &[Tertile] {
        &self.status
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Splits samples into rank tertiles: the lowest floor(N/3) are `Low`, up to floor(2N/3) are
/// `Middle`, the rest `High`. Equal values keep their original index order; `-0.0` and `0.0`
/// count as equal.
pub fn assign_tertiles(values: &[f64]) -> Vec<Tertile> {
    let n = values.len();
    let keys: Vec<f64> = values
        .iter()
        .map(|&v| if v == 0.0 { 0.0 } else { v })
        .collect();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));

    let m1 = n / 3;
    let m2 = (n * 2) / 3;

    let mut status = vec![Tertile::Middle; n];
    for (rank, &idx) in order.iter().enumerate() {
        status[idx] = if rank < m1 {
            Tertile::Low
        } else if rank < m2 {
            Tertile::Middle
        } else {
            Tertile::High
        };
    }
    status
}

pub fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1) as f64
}

pub fn sample_stdev(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/gene.rs"]
mod tests;
