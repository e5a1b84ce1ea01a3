use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;
use std::path::Path;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::error::{GemError, Result};
use crate::input::{ExpressionSource, SymbolCache, clean_symbol, open_maybe_gz};
use crate::model::gene::{GeneVector, sample_stdev};

pub const EXPRESSION_FILE: &str = "expression.txt";
pub const PANCAN_SAMPLES_FILE: &str = "pancan_samples.txt";

/// Expression of one TCGA study, with samples ordered by id and genes below a standard
/// deviation threshold reported missing.
#[derive(Debug)]
pub struct TcgaExpression {
    samples: Vec<String>,
    rows: BTreeMap<String, Vec<f64>>,
    stdev_threshold: f64,
    cache: SymbolCache,
}

impl TcgaExpression {
    /// Loads `<study_dir>/expression.txt`, optionally restricted to `sample_subset`.
    pub fn load(
        study_dir: &Path,
        sample_subset: Option<&BTreeSet<String>>,
        stdev_threshold: f64,
    ) -> Result<Self> {
        let path = study_dir.join(EXPRESSION_FILE);
        let mut reader = open_maybe_gz(&path)?;

        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            return Err(GemError::InvalidInput(format!(
                "expression file {} is empty",
                path.display()
            )));
        }
        let all_samples: Vec<String> = header
            .trim_end_matches(['\n', '\r'])
            .split('\t')
            .skip(1)
            .map(|s| s.trim().to_string())
            .collect();

        let mut columns: Vec<(String, usize)> = all_samples
            .iter()
            .enumerate()
            .filter(|(_, s)| sample_subset.is_none_or(|subset| subset.contains(*s)))
            .map(|(idx, s)| (s.clone(), idx))
            .collect();
        columns.sort();
        columns.dedup_by(|a, b| a.0 == b.0);

        if columns.is_empty() {
            return Err(GemError::MissingInput(format!(
                "no usable samples in {}",
                path.display()
            )));
        }

        let mut rows = BTreeMap::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 2;
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != all_samples.len() + 1 {
                return Err(GemError::Parse {
                    line: line_no,
                    reason: format!(
                        "expected {} values, found {}",
                        all_samples.len(),
                        fields.len().saturating_sub(1)
                    ),
                });
            }
            let symbol = clean_symbol(fields[0]);
            if symbol.is_empty() || rows.contains_key(&symbol) {
                continue;
            }
            let values: Vec<f64> = columns
                .iter()
                .map(|(_, col)| fields[col + 1].trim().parse::<f64>().unwrap_or(f64::NAN))
                .collect();
            rows.insert(symbol, values);
        }

        info!(
            "loaded TCGA expression {}: genes={}, samples={} of {}",
            path.display(),
            rows.len(),
            columns.len(),
            all_samples.len()
        );

        Ok(Self {
            samples: columns.into_iter().map(|(s, _)| s).collect(),
            rows,
            stdev_threshold,
            cache: SymbolCache::new(),
        })
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    fn build(&self, symbol: &str) -> Option<GeneVector> {
        let values = self.rows.get(symbol)?;
        if values.iter().any(|v| !v.is_finite()) {
            warn!("gene {} has non-numeric expression values; treating as missing", symbol);
            return None;
        }
        let sd = sample_stdev(values);
        if sd < self.stdev_threshold {
            debug!(
                "gene {} below stdev threshold ({} < {})",
                symbol, sd, self.stdev_threshold
            );
            return None;
        }
        Some(GeneVector::new(symbol, values.clone()))
    }
}

impl ExpressionSource for TcgaExpression {
    fn get(&self, symbol: &str) -> Option<Rc<GeneVector>> {
        self.cache.get_or_insert_with(symbol, || self.build(symbol))
    }

    fn n_samples(&self) -> usize {
        self.samples.len()
    }
}

/// Sample ids of `study` whose subtype is in `subtypes`, read from `pancan_samples.txt`
/// (header skipped; columns: index, sample, study, subtype).
pub fn read_subtype_samples(
    tcga_dir: &Path,
    study: &str,
    subtypes: &BTreeSet<String>,
) -> Result<BTreeSet<String>> {
    let path = tcga_dir.join(PANCAN_SAMPLES_FILE);
    let reader = open_maybe_gz(&path)?;
    let mut out = BTreeSet::new();
    for line in reader.lines().skip(1) {
        let line = line?;
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 4 {
            continue;
        }
        if fields[2].trim() == study && subtypes.contains(fields[3].trim()) {
            out.insert(fields[1].trim().to_string());
        }
    }
    info!(
        "subtype filter for {}: {} samples in {:?}",
        study,
        out.len(),
        subtypes
    );
    Ok(out)
}
