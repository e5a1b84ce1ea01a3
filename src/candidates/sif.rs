use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;
use std::path::Path;

use tracing::info;

use crate::candidates::CandidateSource;
use crate::error::Result;
use crate::input::open_maybe_gz;

pub const CONTROLS_EXPRESSION_OF: &str = "controls-expression-of";
pub const CONTROLS_STATE_CHANGE_OF: &str = "controls-state-change-of";
pub const IN_COMPLEX_WITH: &str = "in-complex-with";
pub const INTERACTS_WITH: &str = "interacts-with";

const MYC: &str = "MYC";

/// Curated MYC targets added to the network targets whenever the factor is `MYC`.
pub const MYC_TARGETS: &[&str] = &[
    "E2F3", "PFKM", "PAPPA-AS1", "EP300", "CLN5", "POLR3D", "TP53", "SERPINI1", "SUPT7L",
    "SUPT3H", "MYCT1", "MYC", "FOSL1", "CCNB1", "CCND2", "MTDH", "LDHA", "PRDX3", "LIN28B",
    "MMP9", "IREB2", "IRG1", "ODC1", "PTMAP4", "PIM1", "KAT2A", "KAT5", "GPAM", "TFRC",
    "PEG10", "DDX18", "RUVBL2", "RUVBL1", "TERT", "ID2", "SMAD4", "HSPD1", "HSPA4", "PTMAP7",
    "PTMA", "HSP90AA1", "SHMT1", "SMAD3", "PMAIP1", "DFFB", "NBN", "MTA1", "MINA", "GAPDH",
    "TAF10", "TAF9", "TAF12", "GAPDHP44", "UBTF", "EIF2S1", "EIF4E", "EIF4A1", "HMGA1",
    "TAF4B", "ENO1", "SLC2A1", "SLC25A21", "HUWE1", "TRRAP", "TK1", "CDK4", "NDUFAF2", "NPM1",
    "CDC25A", "CDCA7", "EIF4G1", "RMRP", "RCC1", "COMMD3-BMI1", "MAX", "BCAT1", "RPL11",
    "SNAI1", "ACTL6A", "LONP1", "BMI1", "DNAJC5", "CALD1", "CAD", "BAX", "NME1-NME2", "NME2",
    "NME1", "KIR3DL1", "NCL", "PDCD10", "CREBBP", "BIRC5", "ARTN",
];

/// Candidates from a Pathway Commons SIF network (`A<TAB>relation<TAB>B`).
///
/// Targets are the expression-controlled downstream of the factor, plus `MYC_TARGETS` for MYC.
/// Modulators are its complex/interaction partners plus state-change controllers upstream of it.
#[derive(Debug, Clone, Default)]
pub struct SifCandidates {
    expression_downstream: BTreeMap<String, BTreeSet<String>>,
    state_change_upstream: BTreeMap<String, BTreeSet<String>>,
    ppi_neighbors: BTreeMap<String, BTreeSet<String>>,
}

impl SifCandidates {
    pub fn load(path: &Path) -> Result<Self> {
        let reader = open_maybe_gz(path)?;
        let mut out = Self::default();
        let mut n_edges = 0usize;
        for line in reader.lines() {
            let line = line?;
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 3 {
                continue;
            }
            if out.add_edge(fields[0].trim(), fields[1].trim(), fields[2].trim()) {
                n_edges += 1;
            }
        }
        info!("loaded SIF network {}: relevant edges={}", path.display(), n_edges);
        Ok(out)
    }

    /// Records one edge; returns false for relations that play no role here.
    pub fn add_edge(&mut self, source: &str, relation: &str, target: &str) -> bool {
        match relation {
            CONTROLS_EXPRESSION_OF => {
                self.expression_downstream
                    .entry(source.to_string())
                    .or_default()
                    .insert(target.to_string());
            }
            CONTROLS_STATE_CHANGE_OF => {
                self.state_change_upstream
                    .entry(target.to_string())
                    .or_default()
                    .insert(source.to_string());
            }
            IN_COMPLEX_WITH | INTERACTS_WITH => {
                self.ppi_neighbors
                    .entry(source.to_string())
                    .or_default()
                    .insert(target.to_string());
                self.ppi_neighbors
                    .entry(target.to_string())
                    .or_default()
                    .insert(source.to_string());
            }
            _ => return false,
        }
        true
    }
}

impl CandidateSource for SifCandidates {
    fn modulators(&self, factor: &str) -> BTreeSet<String> {
        let mut out = self.ppi_neighbors.get(factor).cloned().unwrap_or_default();
        if let Some(upstream) = self.state_change_upstream.get(factor) {
            out.extend(upstream.iter().cloned());
        }
        out
    }

    fn targets(&self, factor: &str) -> BTreeSet<String> {
        let mut out = self
            .expression_downstream
            .get(factor)
            .cloned()
            .unwrap_or_default();
        if factor == MYC {
            out.extend(MYC_TARGETS.iter().map(|s| s.to_string()));
        }
        out
    }
}
