use statrs::distribution::{Binomial, DiscreteCDF};

/// Two-sided p-value that `a` and `b` successes out of `a + b` trials come from a fair coin.
/// No trials gives `1.0`.
pub fn balance_pvalue(a: u64, b: u64) -> f64 {
    let n = a + b;
    if n == 0 {
        return 1.0;
    }
    let Ok(dist) = Binomial::new(0.5, n) else {
        return 1.0;
    };
    (2.0 * dist.cdf(a.min(b))).min(1.0)
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/binomial.rs"]
mod tests;
