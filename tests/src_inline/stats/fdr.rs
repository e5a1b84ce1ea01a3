use super::*;

#[test]
fn test_single_rejection() {
    let tests = vec![("a", 0.01), ("b", 0.04), ("c", 0.06)];
    assert_eq!(select_bh(tests, 0.05), vec!["a"]);
}

#[test]
fn test_step_up_admits_earlier_failures() {
    // 0.04 fails its own rank (0.025) but 0.045 passes rank 4 (0.05)
    let tests = vec![("a", 0.01), ("b", 0.04), ("c", 0.03), ("d", 0.045)];
    assert_eq!(bh_cutoff(&[0.01, 0.04, 0.03, 0.045], 0.05), Some(0.045));
    assert_eq!(select_bh(tests, 0.05), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_output_keeps_input_order() {
    let tests = vec![(3, 0.002), (1, 0.5), (2, 0.001)];
    assert_eq!(select_bh(tests, 0.1), vec![3, 2]);
}

#[test]
fn test_ties_at_cutoff_are_kept() {
    let tests = vec![("a", 0.02), ("b", 0.02), ("c", 0.9)];
    assert_eq!(select_bh(tests, 0.05), vec!["a", "b"]);
}

#[test]
fn test_empty_and_hopeless_families() {
    assert!(select_bh(Vec::<(u8, f64)>::new(), 0.1).is_empty());
    assert_eq!(bh_cutoff(&[0.5, 0.7], 0.1), None);
    assert!(select_bh(vec![("a", 1.0)], 0.1).is_empty());
}

#[test]
fn test_nan_counts_towards_family_size() {
    assert_eq!(bh_cutoff(&[0.04], 0.05), Some(0.04));
    assert_eq!(bh_cutoff(&[0.04, f64::NAN], 0.05), None);
    let selected = select_bh(vec![("a", 0.001), ("b", f64::NAN)], 0.05);
    assert_eq!(selected, vec!["a"]);
}

#[test]
fn test_selection_grows_with_rate() {
    let pvalues = [0.001, 0.008, 0.012, 0.03, 0.041, 0.2, 0.6];
    let mut last = 0;
    for q in [0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0] {
        let tests: Vec<(usize, f64)> = pvalues.iter().copied().enumerate().collect();
        let n = select_bh(tests, q).len();
        assert!(n >= last, "q={q}");
        last = n;
    }
    assert_eq!(last, pvalues.len());
}
