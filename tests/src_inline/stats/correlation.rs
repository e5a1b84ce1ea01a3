use super::*;

#[test]
fn test_perfect_and_inverse() {
    let a = [1.0, 2.0, 3.0, 4.0];
    assert!((pearson(&a, &[2.0, 4.0, 6.0, 8.0]) - 1.0).abs() < 1e-12);
    assert!((pearson(&a, &[8.0, 6.0, 4.0, 2.0]) + 1.0).abs() < 1e-12);
}

#[test]
fn test_known_value() {
    // r = 0.8 for this pair
    let r = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 1.0, 4.0, 3.0, 5.0]);
    assert!((r - 0.8).abs() < 1e-12);
}

#[test]
fn test_degenerate_inputs() {
    assert_eq!(pearson(&[1.0], &[2.0]), 0.0);
    assert_eq!(pearson(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
}
