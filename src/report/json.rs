use serde::Serialize;

use crate::error::Result;
use crate::model::category::category_order;
use crate::model::triplet::Triplet;
use crate::pipeline::SelectionOutcome;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: String,
    pub version: String,
    pub factor: String,
    pub n_samples: usize,
    pub thresholds: ThresholdSummary,
    pub stages: StageSummary,
    pub categories: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThresholdSummary {
    pub fdr: f64,
    pub category_pvalue: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageSummary {
    pub tested: usize,
    pub gamma_selected: usize,
    pub beta_m_selected: usize,
    pub monotonic: usize,
    pub unstable_ratio: usize,
    pub categorized: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: &'static str,
    pub count: usize,
}

pub fn build_run_summary(
    factor: &str,
    n_samples: usize,
    fdr: f64,
    category_pvalue: f64,
    outcome: &SelectionOutcome,
) -> RunSummary {
    RunSummary {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        factor: factor.to_string(),
        n_samples,
        thresholds: ThresholdSummary {
            fdr,
            category_pvalue,
        },
        stages: StageSummary {
            tested: outcome.n_tested,
            gamma_selected: outcome.n_gamma,
            beta_m_selected: outcome.n_beta_m,
            monotonic: outcome.n_monotonic,
            unstable_ratio: outcome.n_unstable_ratio,
            categorized: outcome.triplets.len(),
        },
        categories: count_categories(&outcome.triplets),
    }
}

/// Per-category counts in matching order, zeros included.
pub fn count_categories(triplets: &[Triplet]) -> Vec<CategoryCount> {
    category_order()
        .iter()
        .map(|&category| CategoryCount {
            category: category.name(),
            count: triplets
                .iter()
                .filter(|t| t.category == Some(category))
                .count(),
        })
        .collect()
}

pub fn render_summary_json(summary: &RunSummary) -> Result<String> {
    let mut json = serde_json::to_string_pretty(summary)?;
    json.push('\n');
    Ok(json)
}
