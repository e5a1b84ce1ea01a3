//! Correlation network of the modulators in a result, in SIF with a companion `.format` file
//! carrying node colours and tooltips.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::input::ExpressionSource;
use crate::model::category::ModulationCategory;
use crate::model::triplet::Triplet;
use crate::stats::binomial::balance_pvalue;
use crate::stats::correlation::pearson;

pub const MIN_CORRELATION: f64 = 0.3;
pub const POSITIVE_RELATION: &str = "positively-correlated-with";
pub const NEGATIVE_RELATION: &str = "negatively-correlated-with";

/// Score at which a node reaches the full attenuator or enhancer colour.
const SCORE_LIMIT: f64 = 10.0;
const ATTENUATOR_COLOR: [u8; 3] = [255, 200, 200];
const ENHANCER_COLOR: [u8; 3] = [200, 255, 200];

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationEdge {
    pub source: String,
    pub target: String,
    pub correlation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModulatorNode {
    pub symbol: String,
    pub enhancers: u64,
    pub attenuators: u64,
    pub p_value: f64,
    /// `-log2(p)`, negative when attenuation dominates.
    pub score: f64,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModulatorNetwork {
    pub nodes: Vec<ModulatorNode>,
    pub edges: Vec<CorrelationEdge>,
}

/// Nodes are the distinct modulators of `triplets` that `expression` knows, sorted by
/// symbol. Pairs with `|r| >= min_correlation` become edges.
pub fn build_modulator_network(
    triplets: &[Triplet],
    expression: &dyn ExpressionSource,
    min_correlation: f64,
) -> ModulatorNetwork {
    let mut tallies: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for triplet in triplets {
        let tally = tallies.entry(triplet.modulator.as_str()).or_default();
        match triplet.category {
            Some(ModulationCategory::EnhancesActivation | ModulationCategory::EnhancesInhibition) => {
                tally.0 += 1
            }
            Some(
                ModulationCategory::AttenuatesActivation | ModulationCategory::AttenuatesInhibition,
            ) => tally.1 += 1,
            _ => {}
        }
    }

    let mut genes = Vec::with_capacity(tallies.len());
    let mut nodes = Vec::with_capacity(tallies.len());
    for (symbol, (enhancers, attenuators)) in tallies {
        let Some(gene) = expression.get(symbol) else {
            debug!("modulator {symbol} has no expression, left out of the network");
            continue;
        };
        genes.push(gene);
        nodes.push(node_for(symbol, enhancers, attenuators));
    }

    let mut edges = Vec::new();
    for (i, a) in genes.iter().enumerate() {
        for b in &genes[i + 1..] {
            let r = pearson(a.values(), b.values());
            if r.abs() >= min_correlation {
                edges.push(CorrelationEdge {
                    source: a.symbol().to_string(),
                    target: b.symbol().to_string(),
                    correlation: r,
                });
            }
        }
    }

    ModulatorNetwork { nodes, edges }
}

fn node_for(symbol: &str, enhancers: u64, attenuators: u64) -> ModulatorNode {
    let p_value = balance_pvalue(attenuators, enhancers);
    let magnitude = if p_value > 0.0 { -p_value.log2() } else { f64::INFINITY };
    let score = if attenuators > enhancers { -magnitude } else { magnitude };
    ModulatorNode {
        symbol: symbol.to_string(),
        enhancers,
        attenuators,
        p_value,
        score,
        color: score_color(score),
    }
}

/// White at 0, fading linearly to the attenuator (negative) or enhancer (positive) colour at
/// `|score| = 10`, flat beyond.
pub fn score_color(score: f64) -> [u8; 3] {
    let toward = if score < 0.0 { ATTENUATOR_COLOR } else { ENHANCER_COLOR };
    let t = (score.abs() / SCORE_LIMIT).min(1.0);
    toward.map(|c| (255.0 + t * (f64::from(c) - 255.0)).round() as u8)
}

/// One `A<TAB>relation<TAB>B` line per edge, then a bare line for each node without edges.
pub fn render_sif(network: &ModulatorNetwork) -> String {
    let mut out = String::new();
    for edge in &network.edges {
        let relation = if edge.correlation > 0.0 { POSITIVE_RELATION } else { NEGATIVE_RELATION };
        let _ = writeln!(out, "{}\t{relation}\t{}", edge.source, edge.target);
    }
    for node in &network.nodes {
        let linked = network
            .edges
            .iter()
            .any(|e| e.source == node.symbol || e.target == node.symbol);
        if !linked {
            let _ = writeln!(out, "{}", node.symbol);
        }
    }
    out
}

pub fn render_format(network: &ModulatorNetwork) -> String {
    let mut out = String::new();
    for node in &network.nodes {
        let [r, g, b] = node.color;
        let _ = writeln!(out, "node\t{}\tcolor\t{r} {g} {b}", node.symbol);
        let _ = writeln!(out, "node\t{}\ttooltip\t{}", node.symbol, node.p_value);
    }
    out
}

/// Writes `<stem>.sif` and `<stem>.format` next to `triplet_path`. Returns both paths.
pub fn write_modulator_network(
    triplet_path: &Path,
    triplets: &[Triplet],
    expression: &dyn ExpressionSource,
) -> Result<(PathBuf, PathBuf)> {
    let network = build_modulator_network(triplets, expression, MIN_CORRELATION);
    let sif_path = triplet_path.with_extension("sif");
    let format_path = triplet_path.with_extension("format");
    if let Some(parent) = sif_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&sif_path, render_sif(&network))?;
    fs::write(&format_path, render_format(&network))?;
    info!(
        "modulator network: {} nodes, {} edges to {}",
        network.nodes.len(),
        network.edges.len(),
        sif_path.display()
    );
    Ok((sif_path, format_path))
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/network.rs"]
mod tests;
