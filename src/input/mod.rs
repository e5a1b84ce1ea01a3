use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::rc::Rc;

use flate2::read::MultiGzDecoder;

use crate::error::{GemError, Result};
use crate::model::gene::GeneVector;

pub mod geo;
pub mod simple;
pub mod tcga;

/// Maps a gene symbol to its expression vector over one aligned sample cohort.
///
/// Repeated lookups of a symbol must return the same instance, and every returned vector has
/// `n_samples()` values in the same sample order.
pub trait ExpressionSource {
    fn get(&self, symbol: &str) -> Option<Rc<GeneVector>>;

    fn n_samples(&self) -> usize;
}

/// Write-once symbol cache: the first lookup of a symbol fixes its answer, including a miss.
#[derive(Debug, Default)]
pub struct SymbolCache {
    entries: RefCell<BTreeMap<String, Option<Rc<GeneVector>>>>,
}

impl SymbolCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_insert_with<F>(&self, symbol: &str, build: F) -> Option<Rc<GeneVector>>
    where
        F: FnOnce() -> Option<GeneVector>,
    {
        if let Some(entry) = self.entries.borrow().get(symbol) {
            return entry.clone();
        }
        let entry = build().map(Rc::new);
        self.entries
            .borrow_mut()
            .insert(symbol.to_string(), entry.clone());
        entry
    }

    pub fn insert(&self, gene: GeneVector) {
        self.entries
            .borrow_mut()
            .insert(gene.symbol().to_string(), Some(Rc::new(gene)));
    }

    pub fn lookup(&self, symbol: &str) -> Option<Rc<GeneVector>> {
        self.entries.borrow().get(symbol).cloned().flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().values().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| {
        GemError::MissingInput(format!("cannot open {}: {e}", path.display()))
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads one gene symbol per line; blank lines are ignored.
pub fn read_gene_list(path: &Path) -> Result<BTreeSet<String>> {
    let reader = open_maybe_gz(path)?;
    let mut out = BTreeSet::new();
    for line in reader.lines() {
        let line = line?;
        let symbol = line.trim();
        if !symbol.is_empty() {
            out.insert(symbol.to_string());
        }
    }
    Ok(out)
}

/// Strips quotes and any `|id` suffix from a row label.
pub fn clean_symbol(raw: &str) -> String {
    let unquoted = raw.trim().replace('"', "");
    match unquoted.split_once('|') {
        Some((symbol, _)) => symbol.to_string(),
        None => unquoted,
    }
}

pub fn parse_values(fields: &[&str], line_no: usize) -> Result<Vec<f64>> {
    fields
        .iter()
        .map(|field| {
            let field = field.trim().trim_matches('"');
            field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| GemError::Parse {
                    line: line_no,
                    reason: format!("invalid expression value '{field}'"),
                })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
