use super::*;
use crate::model::counts::CountCube;

fn triplet(modulator: &str, flat: [u32; 8]) -> Triplet {
    Triplet::from_counts(modulator, "TF", "TGT", CountCube::from_flat(flat))
}

#[test]
fn test_beta_m_selection() {
    let input = vec![
        triplet("INV", [10, 10, 0, 20, 0, 20, 20, 0]),
        triplet("FLAT_BETA", [8, 2, 5, 5, 2, 8, 5, 5]),
    ];
    let selected = run_stage4(input, 0.1);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].modulator, "INV");
    let beta_m = selected[0].coefficients.beta_m.unwrap();
    assert!((beta_m.value + 1.0).abs() < 1e-12);
}

#[test]
fn test_family_is_the_input() {
    // betaM p of this cube is about 0.019
    let cube = [8, 2, 6, 4, 2, 8, 1, 9];
    assert_eq!(run_stage4(vec![triplet("M", cube)], 0.05).len(), 1);

    let family = vec![
        triplet("M", cube),
        triplet("N1", [5; 8]),
        triplet("N2", [5; 8]),
    ];
    assert!(run_stage4(family, 0.05).is_empty());
}
