use super::*;
use crate::model::counts::CountCube;

fn classified(m: &str, f: &str, t: &str, category: Option<ModulationCategory>) -> Triplet {
    let mut triplet = Triplet::from_counts(m, f, t, CountCube::default());
    triplet.category = category;
    triplet
}

fn sample() -> Vec<Triplet> {
    vec![
        classified("SMALL", "TF", "T1", Some(ModulationCategory::EnhancesActivation)),
        classified("BIG", "TF", "T1", Some(ModulationCategory::InvertsActivation)),
        classified("BIG", "TF", "T2", Some(ModulationCategory::InvertsActivation)),
        classified("BIG", "TF", "T3", Some(ModulationCategory::AttenuatesInhibition)),
        classified("NONE", "TF", "T4", None),
    ]
}

#[test]
fn test_groups_ordered_by_size() {
    let model = build_plot_model(&sample(), GroupBy::Modulator).unwrap();
    assert_eq!(model.factor, "TF");
    let names: Vec<&str> = model.groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["BIG", "SMALL", "NONE"]);

    let big = &model.groups[0];
    assert_eq!(big.size(), 3);
    assert_eq!(big.height(ModulationCategory::InvertsActivation), 2);
    assert_eq!(big.top(), 2);
    assert_eq!(big.bottom(), 1);
    assert_eq!(model.groups[2].size(), 0);
}

#[test]
fn test_group_by_target() {
    let model = build_plot_model(&sample(), GroupBy::Target).unwrap();
    let t1 = model.groups.iter().find(|g| g.name == "T1").unwrap();
    assert_eq!(t1.size(), 2);
    assert_eq!(model.groups[0].name, "T1");
}

#[test]
fn test_mixed_factors_rejected() {
    let triplets = vec![
        classified("M", "TF1", "T", Some(ModulationCategory::EnhancesActivation)),
        classified("M", "TF2", "T", Some(ModulationCategory::EnhancesActivation)),
    ];
    assert!(matches!(
        build_plot_model(&triplets, GroupBy::Modulator),
        Err(GemError::InvalidInput(_))
    ));
}

#[test]
fn test_render_uses_category_colours() {
    let svg = render_gem_plot(&sample(), GroupBy::Modulator).unwrap();
    assert!(svg.starts_with("<?xml version=\"1.0\""));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("fill=\"rgb(253,48,48)\" fill-opacity=\"0.5\""));
    assert!(svg.contains("fill=\"rgb(33,137,33)\""));
    assert!(svg.contains("fill=\"rgb(210,143,238)\""));
    assert!(!svg.contains("rgb(106,33,137)"));
    assert!(svg.contains(">TF</text>"));
    assert!(svg.contains(">T2</text>"));
}

#[test]
fn test_rows_wrap_after_five_groups() {
    let triplets: Vec<Triplet> = (0..7)
        .map(|i| {
            classified(
                &format!("M{i}"),
                "TF",
                "T",
                Some(ModulationCategory::EnhancesInhibition),
            )
        })
        .collect();
    let svg = render_gem_plot(&triplets, GroupBy::Modulator).unwrap();
    // one factor label per row
    assert_eq!(svg.matches(">activates</text>").count(), 2);
    assert!(svg.contains("width=\"690\""));
}

#[test]
fn test_labels_are_escaped() {
    let triplets = vec![classified(
        "A&B",
        "TF",
        "<T>",
        Some(ModulationCategory::EnhancesActivation),
    )];
    let svg = render_gem_plot(&triplets, GroupBy::Modulator).unwrap();
    assert!(svg.contains(">A&amp;B</text>"));
    assert!(svg.contains(">&lt;T&gt;</text>"));
}
