use super::*;
use crate::model::counts::CountCube;

fn triplet(modulator: &str, flat: [u32; 8]) -> Triplet {
    Triplet::from_counts(modulator, "TF", "TGT", CountCube::from_flat(flat))
}

#[test]
fn test_gamma_filled_and_selected() {
    let input = vec![
        triplet("EMPTY_ROW", [5, 5, 0, 0, 3, 7, 8, 2]),
        triplet("INV", [10, 10, 0, 20, 0, 20, 20, 0]),
    ];
    let selected = run_stage3(input, 0.1);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].modulator, "INV");
    assert!(selected[0].coefficients.gamma.is_some());
    assert!(selected[0].coefficients.beta_m.is_none());
}

#[test]
fn test_family_size_matters() {
    // enhancement gamma p is about 0.024: alone it passes q = 0.05, among null tests it does not
    let enhancement = [16, 4, 12, 8, 16, 4, 2, 18];
    assert_eq!(run_stage3(vec![triplet("M", enhancement)], 0.05).len(), 1);

    let mut family = vec![triplet("M", enhancement)];
    family.extend((0..4).map(|i| triplet(&format!("N{i}"), [5; 8])));
    assert!(run_stage3(family, 0.05).is_empty());
}
