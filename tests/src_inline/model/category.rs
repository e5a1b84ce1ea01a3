use super::*;

fn significant(values: [f64; 5]) -> [Coefficient; 5] {
    values.map(|v| Coefficient::new(v, 0.001))
}

#[test]
fn test_inversion_preferred_over_enhancement() {
    let coefficients = significant([-1.5, 0.5, -1.0, -1.0, -0.5]);
    assert!(ModulationCategory::EnhancesInhibition.matches(&coefficients, 0.05));
    assert_eq!(
        match_category(&coefficients, 0.05),
        Some(ModulationCategory::InvertsActivation)
    );
}

#[test]
fn test_each_pattern_reaches_its_category() {
    let cases = [
        ([-1.0, 1.0, -1.0, -1.0, -1.0], ModulationCategory::InvertsActivation),
        ([1.0, -1.0, 1.0, 1.0, 1.0], ModulationCategory::InvertsInhibition),
        ([1.0, 0.3, 1.0, 1.0, 1.0], ModulationCategory::EnhancesActivation),
        ([-1.0, -0.3, -1.0, -1.0, -1.0], ModulationCategory::EnhancesInhibition),
        ([-1.0, 1.0, 0.3, 0.3, 0.3], ModulationCategory::AttenuatesActivation),
        ([1.0, -1.0, -0.3, -0.3, -0.3], ModulationCategory::AttenuatesInhibition),
    ];
    for (values, expected) in cases {
        assert_eq!(match_category(&significant(values), 0.05), Some(expected));
    }
}

#[test]
fn test_enhancement_with_opposite_alpha_f_is_an_inversion() {
    let coefficients = significant([-1.0, 0.3, -1.0, -1.0, -1.0]);
    assert_eq!(
        match_category(&coefficients, 0.05),
        Some(ModulationCategory::InvertsActivation)
    );
}

#[test]
fn test_attenuation_ignores_unconstrained_coefficients() {
    let coefficients = [
        Coefficient::new(-0.4, 0.01),
        Coefficient::new(0.3, 0.02),
        Coefficient::new(0.1, 0.9),
        Coefficient::new(f64::NAN, 1.0),
        Coefficient::new(0.0, 1.0),
    ];
    assert_eq!(
        match_category(&coefficients, 0.05),
        Some(ModulationCategory::AttenuatesActivation)
    );
}

#[test]
fn test_zero_value_never_matches_a_sign() {
    let coefficients = [
        Coefficient::new(0.0, 0.0),
        Coefficient::new(0.3, 0.01),
        Coefficient::new(0.2, 0.01),
        Coefficient::new(0.2, 0.01),
        Coefficient::new(0.2, 0.01),
    ];
    assert_eq!(match_category(&coefficients, 0.05), None);
}

#[test]
fn test_threshold_is_inclusive() {
    let coefficients = [
        Coefficient::new(0.5, 0.05),
        Coefficient::new(-0.2, 0.05),
        Coefficient::new(0.7, 0.9),
        Coefficient::new(0.5, 0.9),
        Coefficient::new(0.7, 0.9),
    ];
    assert_eq!(
        match_category(&coefficients, 0.05),
        Some(ModulationCategory::AttenuatesInhibition)
    );
    assert_eq!(match_category(&coefficients, 0.049), None);
}

#[test]
fn test_names_round_trip() {
    for &category in category_order() {
        let parsed: ModulationCategory = category.to_string().parse().unwrap();
        assert_eq!(parsed, category);
    }
    assert!("INVERTS".parse::<ModulationCategory>().is_err());
    assert!("inverts_activation".parse::<ModulationCategory>().is_err());
}

#[test]
fn test_activation_split() {
    let activation: Vec<_> = category_order()
        .iter()
        .filter(|c| c.is_activation())
        .map(|c| c.name())
        .collect();
    assert_eq!(
        activation,
        vec![
            "INVERTS_ACTIVATION",
            "ENHANCES_ACTIVATION",
            "ATTENUATES_ACTIVATION"
        ]
    );
}
