use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::custom::{CustomCandidates, MergedCandidates};
use super::sif::SifCandidates;
use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct MapExpression {
    genes: BTreeMap<String, Rc<GeneVector>>,
}

impl MapExpression {
    fn new(symbols: &[&str]) -> Self {
        let genes = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let values = (0..9).map(|j| ((j * (i + 2)) % 9) as f64).collect();
                (s.to_string(), Rc::new(GeneVector::new(*s, values)))
            })
            .collect();
        Self { genes }
    }
}

impl ExpressionSource for MapExpression {
    fn get(&self, symbol: &str) -> Option<Rc<GeneVector>> {
        self.genes.get(symbol).cloned()
    }

    fn n_samples(&self) -> usize {
        9
    }
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn labels(triplets: &[Triplet]) -> Vec<String> {
    triplets.iter().map(Triplet::label).collect()
}

#[test]
fn test_generate_cross_product() {
    let expression = MapExpression::new(&["F", "M1", "M2", "T1", "T2"]);
    let source = CustomCandidates::new(set(&["M2", "M1"]), set(&["T2", "T1"]));
    let triplets = generate_for_factor("F", &source, &expression).unwrap();
    assert_eq!(
        labels(&triplets),
        vec!["M1/F/T1", "M1/F/T2", "M2/F/T1", "M2/F/T2"]
    );
    assert!(triplets.iter().all(|t| t.coefficients.gamma.is_none()));
}

#[test]
fn test_overlap_factor_and_missing_symbols() {
    let expression = MapExpression::new(&["F", "M1", "X", "T1"]);
    let source = CustomCandidates::new(set(&["F", "M1", "X", "GHOST"]), set(&["X", "T1", "F"]));
    let triplets = generate_for_factor("F", &source, &expression).unwrap();
    assert_eq!(labels(&triplets), vec!["M1/F/T1", "M1/F/X"]);
}

#[test]
fn test_missing_factor_yields_nothing() {
    let expression = MapExpression::new(&["M1", "T1"]);
    let source = CustomCandidates::new(set(&["M1"]), set(&["T1"]));
    assert!(generate_for_factor("F", &source, &expression).unwrap().is_empty());
}

#[test]
fn test_single_modulator_mode() {
    let expression = MapExpression::new(&["F", "M", "T1", "T2"]);
    let source = CustomCandidates::new(BTreeSet::new(), set(&["T1", "T2", "M", "F"]));
    let triplets = generate_for_factor_and_modulator("F", "M", &source, &expression).unwrap();
    assert_eq!(labels(&triplets), vec!["M/F/T1", "M/F/T2"]);

    let none = generate_for_factor_and_modulator("F", "ABSENT", &source, &expression).unwrap();
    assert!(none.is_empty());
}

fn network() -> SifCandidates {
    let mut sif = SifCandidates::default();
    assert!(sif.add_edge("F", "controls-expression-of", "T1"));
    assert!(sif.add_edge("F", "controls-expression-of", "T2"));
    assert!(sif.add_edge("K", "controls-state-change-of", "F"));
    assert!(sif.add_edge("P", "in-complex-with", "F"));
    assert!(sif.add_edge("F", "interacts-with", "Q"));
    assert!(!sif.add_edge("F", "chemical-affects", "Z"));
    sif
}

#[test]
fn test_sif_candidates() {
    let sif = network();
    assert_eq!(sif.targets("F"), set(&["T1", "T2"]));
    assert_eq!(sif.modulators("F"), set(&["K", "P", "Q"]));
    assert!(sif.targets("T1").is_empty());
    assert_eq!(sif.modulators("P"), set(&["F"]));
}

#[test]
fn test_sif_load() {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_gem_candidates_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("network.sif");
    fs::write(
        &path,
        "F\tcontrols-expression-of\tT1\nK\tcontrols-state-change-of\tF\nbroken line\nF\tneighbor-of\tZ\n",
    )
    .unwrap();

    let sif = SifCandidates::load(&path).unwrap();
    assert_eq!(sif.targets("F"), set(&["T1"]));
    assert_eq!(sif.modulators("F"), set(&["K"]));
}

#[test]
fn test_merged_candidates() {
    let sif = network();
    let custom = CustomCandidates::new(set(&["M9"]), set(&["T9"]));
    let sources: Vec<&dyn CandidateSource> = vec![&sif, &custom];
    let merged = MergedCandidates::new(sources);
    assert_eq!(merged.modulators("F"), set(&["K", "M9", "P", "Q"]));
    assert_eq!(merged.targets("F"), set(&["T1", "T2", "T9"]));
}

#[test]
fn test_myc_gets_curated_targets() {
    let mut sif = SifCandidates::default();
    sif.add_edge("MYC", "controls-expression-of", "NOVEL1");
    sif.add_edge("MAX", "in-complex-with", "MYC");

    let targets = sif.targets("MYC");
    assert!(targets.contains("NOVEL1"));
    assert!(targets.contains("TERT"));
    assert!(targets.contains("ARTN"));
    assert_eq!(targets.len(), super::sif::MYC_TARGETS.len() + 1);
    assert!(!sif.targets("MAX").contains("TERT"));
}

#[test]
fn test_myc_curated_targets_reach_triplets() {
    let mut sif = SifCandidates::default();
    sif.add_edge("MAX", "in-complex-with", "MYC");
    let expression = MapExpression::new(&["MYC", "MAX", "TERT", "CDK4", "OTHER"]);

    // MAX is itself a curated target, so it is dropped from the modulators
    assert!(generate_for_factor("MYC", &sif, &expression).unwrap().is_empty());

    let triplets = generate_for_factor_and_modulator("MYC", "MAX", &sif, &expression).unwrap();
    assert_eq!(labels(&triplets), vec!["MAX/MYC/CDK4", "MAX/MYC/TERT"]);
}
