/// Pearson correlation over the common prefix of `a` and `b`; `0.0` when fewer than two
/// samples or either side is constant.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean_a = a[..n].iter().sum::<f64>() / nf;
    let mean_b = b[..n].iter().sum::<f64>() / nf;

    let mut sum_ab = 0.0;
    let mut sum_aa = 0.0;
    let mut sum_bb = 0.0;
    for (x, y) in a[..n].iter().zip(&b[..n]) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        sum_ab += dx * dy;
        sum_aa += dx * dx;
        sum_bb += dy * dy;
    }
    let den = (sum_aa * sum_bb).sqrt();
    if den <= 1e-12 {
        return 0.0;
    }
    (sum_ab / den).clamp(-1.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/correlation.rs"]
mod tests;
