use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::model::gene::GeneVector;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_gem_stage2_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

struct MapExpression(BTreeMap<String, Rc<GeneVector>>);

impl MapExpression {
    fn new(symbols: &[&str]) -> Self {
        Self(
            symbols
                .iter()
                .map(|s| {
                    let gene = GeneVector::new(*s, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
                    (s.to_string(), Rc::new(gene))
                })
                .collect(),
        )
    }
}

impl ExpressionSource for MapExpression {
    fn get(&self, symbol: &str) -> Option<Rc<GeneVector>> {
        self.0.get(symbol).cloned()
    }

    fn n_samples(&self) -> usize {
        6
    }
}

fn params(dir: &Path, modulators: &[&str], targets: &[&str]) -> RunParameters {
    let mut params = RunParameters::with_base_dir(dir);
    params.factor = Some("F".to_string());
    params.modulators = modulators.iter().map(|s| s.to_string()).collect();
    params.targets = targets.iter().map(|s| s.to_string()).collect();
    params
}

fn labels(triplets: &[Triplet]) -> Vec<String> {
    triplets.iter().map(Triplet::label).collect()
}

fn write_network(dir: &Path) -> PathBuf {
    let path = dir.join("net.sif");
    fs::write(
        &path,
        "F\tcontrols-expression-of\tT1\nF\tcontrols-expression-of\tT2\nK\tcontrols-state-change-of\tF\n",
    )
    .unwrap();
    path
}

#[test]
fn test_custom_sets() {
    let dir = make_temp_dir();
    let expression = MapExpression::new(&["F", "M", "T"]);
    let triplets = run_stage2(&params(&dir, &["M"], &["T"]), &expression).unwrap();
    assert_eq!(labels(&triplets), vec!["M/F/T"]);
}

#[test]
fn test_missing_factor_key() {
    let dir = make_temp_dir();
    let expression = MapExpression::new(&["F"]);
    let mut p = params(&dir, &[], &[]);
    p.factor = None;
    assert!(run_stage2(&p, &expression).is_err());
}

#[test]
fn test_network_merged_with_custom() {
    let dir = make_temp_dir();
    let expression = MapExpression::new(&["F", "K", "M", "T1", "T2", "T3"]);
    let mut p = params(&dir, &["M"], &["T3"]);
    p.sif_file = Some(write_network(&dir));
    let triplets = run_stage2(&p, &expression).unwrap();
    assert_eq!(
        labels(&triplets),
        vec![
            "K/F/T1", "K/F/T2", "K/F/T3", "M/F/T1", "M/F/T2", "M/F/T3"
        ]
    );
}

#[test]
fn test_single_modulator_mode() {
    let dir = make_temp_dir();
    let expression = MapExpression::new(&["F", "K", "M", "T1", "T2"]);
    let mut p = params(&dir, &["M"], &[]);
    p.sif_file = Some(write_network(&dir));
    let triplets = run_stage2(&p, &expression).unwrap();
    assert_eq!(labels(&triplets), vec!["M/F/T1", "M/F/T2"]);
}
