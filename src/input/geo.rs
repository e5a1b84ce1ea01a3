use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;
use std::path::Path;
use std::rc::Rc;

use tracing::{debug, info};

use crate::error::{GemError, Result};
use crate::input::{ExpressionSource, SymbolCache, open_maybe_gz, parse_values};
use crate::model::gene::{GeneVector, sample_variance};

const SYMBOL_COLUMN: &str = "Gene Symbol";
const SYMBOL_SEPARATOR: &str = " /// ";

/// GEO platform annotation plus series-matrix values. A symbol measured by several probes
/// takes the probe row with the highest variance.
#[derive(Debug)]
pub struct GeoExpression {
    probes_by_symbol: BTreeMap<String, BTreeSet<String>>,
    values_by_probe: BTreeMap<String, Vec<f64>>,
    n_samples: usize,
    cache: SymbolCache,
}

impl GeoExpression {
    pub fn load(platform_path: &Path, series_path: &Path) -> Result<Self> {
        let probes_by_symbol = read_platform(platform_path)?;
        let (values_by_probe, n_samples) = read_series(series_path)?;
        info!(
            "loaded GEO files: platform={} (symbols={}), series={} (probes={}, samples={})",
            platform_path.display(),
            probes_by_symbol.len(),
            series_path.display(),
            values_by_probe.len(),
            n_samples
        );
        Ok(Self {
            probes_by_symbol,
            values_by_probe,
            n_samples,
            cache: SymbolCache::new(),
        })
    }

    fn build(&self, symbol: &str) -> Option<GeneVector> {
        let probes = self.probes_by_symbol.get(symbol)?;
        let rows: Vec<&Vec<f64>> = probes
            .iter()
            .filter_map(|id| self.values_by_probe.get(id))
            .collect();
        let chosen = select_highest_variance(&rows)?;
        debug!("symbol {} resolved from {} probe rows", symbol, rows.len());
        Some(GeneVector::new(symbol, chosen.clone()))
    }
}

impl ExpressionSource for GeoExpression {
    fn get(&self, symbol: &str) -> Option<Rc<GeneVector>> {
        self.cache.get_or_insert_with(symbol, || self.build(symbol))
    }

    fn n_samples(&self) -> usize {
        self.n_samples
    }
}

/// A single row is used as is; among several, the first with strictly highest positive
/// variance wins, and all-constant rows give nothing.
pub fn select_highest_variance<'a>(rows: &[&'a Vec<f64>]) -> Option<&'a Vec<f64>> {
    if rows.len() == 1 {
        return Some(rows[0]);
    }
    let mut best: Option<&'a Vec<f64>> = None;
    let mut best_var = 0.0;
    for row in rows {
        let var = sample_variance(row);
        if var > best_var {
            best_var = var;
            best = Some(*row);
        }
    }
    best
}

fn read_platform(path: &Path) -> Result<BTreeMap<String, BTreeSet<String>>> {
    let reader = open_maybe_gz(path)?;
    let mut symbol_idx: Option<usize> = None;
    let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if line.is_empty() || line.starts_with('!') || line.starts_with('^') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if line.starts_with("ID\t") {
            symbol_idx = fields.iter().position(|f| f.trim() == SYMBOL_COLUMN);
            if symbol_idx.is_none() {
                return Err(GemError::Parse {
                    line: line_no,
                    reason: format!("platform header has no '{SYMBOL_COLUMN}' column"),
                });
            }
            continue;
        }
        let Some(col) = symbol_idx else {
            continue;
        };
        let Some(symbols) = fields.get(col).map(|s| s.trim()) else {
            continue;
        };
        if symbols.is_empty() {
            continue;
        }
        let id = fields[0].trim().to_string();
        for symbol in symbols.split(SYMBOL_SEPARATOR) {
            map.entry(symbol.trim().to_string())
                .or_default()
                .insert(id.clone());
        }
    }

    if symbol_idx.is_none() {
        return Err(GemError::MissingInput(format!(
            "platform file {} has no ID header line",
            path.display()
        )));
    }
    Ok(map)
}

fn read_series(path: &Path) -> Result<(BTreeMap<String, Vec<f64>>, usize)> {
    let reader = open_maybe_gz(path)?;
    let mut map = BTreeMap::new();
    let mut n_samples: Option<usize> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if line.is_empty() || line.starts_with('!') || line.starts_with("\"ID_REF\"\t") {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let values = parse_values(&fields[1..], line_no)?;
        match n_samples {
            None => n_samples = Some(values.len()),
            Some(n) if n != values.len() => {
                return Err(GemError::Parse {
                    line: line_no,
                    reason: format!("expected {} values, found {}", n, values.len()),
                });
            }
            Some(_) => {}
        }
        map.insert(fields[0].replace('"', ""), values);
    }

    Ok((map, n_samples.unwrap_or(0)))
}
