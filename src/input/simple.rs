use std::io::BufRead;
use std::path::Path;
use std::rc::Rc;

use tracing::{info, warn};

use crate::error::{GemError, Result};
use crate::input::{ExpressionSource, SymbolCache, clean_symbol, open_maybe_gz, parse_values};
use crate::model::gene::GeneVector;

/// Tab-delimited matrix: a header row of sample names, then one `symbol<TAB>values...` row
/// per gene. Lines starting with `!` or `#` are ignored.
#[derive(Debug)]
pub struct SimpleExpressionFile {
    samples: Vec<String>,
    cache: SymbolCache,
}

impl SimpleExpressionFile {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = open_maybe_gz(path)?;
        let mut buf = String::new();
        let mut line_no = 0usize;
        let mut samples: Option<Vec<String>> = None;
        let cache = SymbolCache::new();
        let mut n_genes = 0usize;

        loop {
            buf.clear();
            let read = reader.read_line(&mut buf)?;
            if read == 0 {
                break;
            }
            line_no += 1;
            let line = buf.trim_end_matches(['\n', '\r']);
            if line.is_empty() || line.starts_with('!') || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();

            let Some(n_samples) = samples.as_ref().map(Vec::len) else {
                samples = Some(
                    fields
                        .iter()
                        .skip(1)
                        .map(|s| s.trim().trim_matches('"').to_string())
                        .collect(),
                );
                continue;
            };

            if fields.len() != n_samples + 1 {
                return Err(GemError::Parse {
                    line: line_no,
                    reason: format!(
                        "expected {} values, found {}",
                        n_samples,
                        fields.len().saturating_sub(1)
                    ),
                });
            }

            let symbol = clean_symbol(fields[0]);
            if symbol.is_empty() {
                warn!("expression row without a symbol; skipping (line {})", line_no);
                continue;
            }
            if cache.lookup(&symbol).is_some() {
                warn!(
                    "duplicate gene symbol in expression file; keeping first (line {}, symbol {})",
                    line_no, symbol
                );
                continue;
            }
            let values = parse_values(&fields[1..], line_no)?;
            cache.insert(GeneVector::new(symbol, values));
            n_genes += 1;
        }

        let samples = samples.ok_or_else(|| {
            GemError::InvalidInput(format!("expression file {} has no header", path.display()))
        })?;

        info!(
            "loaded expression file {}: genes={}, samples={}",
            path.display(),
            n_genes,
            samples.len()
        );

        Ok(Self { samples, cache })
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn n_genes(&self) -> usize {
        self.cache.len()
    }
}

impl ExpressionSource for SimpleExpressionFile {
    fn get(&self, symbol: &str) -> Option<Rc<GeneVector>> {
        self.cache.lookup(symbol)
    }

    fn n_samples(&self) -> usize {
        self.samples.len()
    }
}
