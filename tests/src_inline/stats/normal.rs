use super::*;

#[test]
fn test_known_erfc_values() {
    let se = 1.0 / std::f64::consts::SQRT_2;
    assert!((normal_tail_pvalue(1.0, se) - 0.157_299_207_05).abs() < 1e-9);
    assert!((normal_tail_pvalue(-0.5, se) - 0.479_500_122_19).abs() < 1e-9);
    assert!((normal_tail_pvalue(2.0, se) - 0.004_677_734_98).abs() < 1e-9);
}

#[test]
fn test_zero_difference_is_not_significant() {
    assert!((normal_tail_pvalue(0.0, 0.3) - 1.0).abs() < 1e-12);
}

#[test]
fn test_degenerate_inputs_yield_one() {
    assert_eq!(normal_tail_pvalue(0.5, 0.0), 1.0);
    assert_eq!(normal_tail_pvalue(0.5, f64::NAN), 1.0);
    assert_eq!(normal_tail_pvalue(f64::NAN, 0.1), 1.0);
    assert_eq!(normal_tail_pvalue(f64::INFINITY, 0.1), 1.0);
}

#[test]
fn test_pvalue_decreases_with_effect() {
    let mut last = 1.0;
    for step in 1..20 {
        let p = normal_tail_pvalue(step as f64 * 0.05, 0.1);
        assert!(p <= last);
        assert!((0.0..=1.0).contains(&p));
        last = p;
    }
}
