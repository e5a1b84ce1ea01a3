//! `parameters.txt` reader: one `key = value` per line, `#` comments, blank lines skipped.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GemError, Result};
use crate::input::read_gene_list;

pub const PARAMETER_FILENAME: &str = "parameters.txt";
pub const DEFAULT_FDR_THRESHOLD: f64 = 0.1;
pub const DEFAULT_CATEGORY_PVALUE_THRESHOLD: f64 = 0.05;
pub const DEFAULT_TRIPLET_FILENAME: &str = "results.txt";
pub const DEFAULT_SVG_FILENAME: &str = "results.svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Modulator,
    Target,
    Factor,
    ModulatorsFile,
    TargetsFile,
    CustomExpressionFile,
    TcgaDirectory,
    TcgaStudy,
    UseSubtype,
    FdrThr,
    CategoryPvalThr,
    ResultTripletFilename,
    ResultSvgFilename,
    SifFile,
    GeoPlatformFile,
    GeoSeriesFile,
    ExpressionStdevThr,
}

pub fn parameter_order() -> &'static [Parameter] {
    &[
        Parameter::Modulator,
        Parameter::Target,
        Parameter::Factor,
        Parameter::ModulatorsFile,
        Parameter::TargetsFile,
        Parameter::CustomExpressionFile,
        Parameter::TcgaDirectory,
        Parameter::TcgaStudy,
        Parameter::UseSubtype,
        Parameter::FdrThr,
        Parameter::CategoryPvalThr,
        Parameter::ResultTripletFilename,
        Parameter::ResultSvgFilename,
        Parameter::SifFile,
        Parameter::GeoPlatformFile,
        Parameter::GeoSeriesFile,
        Parameter::ExpressionStdevThr,
    ]
}

impl Parameter {
    pub fn key(self) -> &'static str {
        match self {
            Parameter::Modulator => "modulator",
            Parameter::Target => "target",
            Parameter::Factor => "factor",
            Parameter::ModulatorsFile => "modulators-file",
            Parameter::TargetsFile => "targets-file",
            Parameter::CustomExpressionFile => "custom-expression-file",
            Parameter::TcgaDirectory => "tcga-directory",
            Parameter::TcgaStudy => "tcga-study",
            Parameter::UseSubtype => "use-subtype",
            Parameter::FdrThr => "fdr-thr",
            Parameter::CategoryPvalThr => "category-pval-thr",
            Parameter::ResultTripletFilename => "result-triplet-filename",
            Parameter::ResultSvgFilename => "result-svg-filename",
            Parameter::SifFile => "sif-file",
            Parameter::GeoPlatformFile => "geo-platform-file",
            Parameter::GeoSeriesFile => "geo-series-file",
            Parameter::ExpressionStdevThr => "expression-stdev-thr",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        parameter_order().iter().copied().find(|p| p.key() == key)
    }
}

/// Where the expression cohort comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionInput {
    Simple(PathBuf),
    Tcga {
        directory: PathBuf,
        study: String,
        subtypes: BTreeSet<String>,
    },
    Geo {
        platform: PathBuf,
        series: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct RunParameters {
    pub base_dir: PathBuf,
    pub factor: Option<String>,
    pub modulators: BTreeSet<String>,
    pub targets: BTreeSet<String>,
    pub custom_expression_file: Option<PathBuf>,
    pub tcga_directory: Option<PathBuf>,
    pub tcga_study: Option<String>,
    pub subtypes: BTreeSet<String>,
    pub fdr_threshold: f64,
    pub category_pvalue_threshold: f64,
    pub result_triplet_path: PathBuf,
    pub result_svg_path: PathBuf,
    pub sif_file: Option<PathBuf>,
    pub geo_platform_file: Option<PathBuf>,
    pub geo_series_file: Option<PathBuf>,
    pub expression_stdev_threshold: f64,
}

impl RunParameters {
    pub fn with_base_dir(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            factor: None,
            modulators: BTreeSet::new(),
            targets: BTreeSet::new(),
            custom_expression_file: None,
            tcga_directory: None,
            tcga_study: None,
            subtypes: BTreeSet::new(),
            fdr_threshold: DEFAULT_FDR_THRESHOLD,
            category_pvalue_threshold: DEFAULT_CATEGORY_PVALUE_THRESHOLD,
            result_triplet_path: base_dir.join(DEFAULT_TRIPLET_FILENAME),
            result_svg_path: base_dir.join(DEFAULT_SVG_FILENAME),
            sif_file: None,
            geo_platform_file: None,
            geo_series_file: None,
            expression_stdev_threshold: 0.0,
        }
    }

    pub fn resolve_path(&self, value: &str) -> PathBuf {
        let path = Path::new(value);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    fn set(&mut self, param: Parameter, value: &str) -> Result<()> {
        match param {
            Parameter::Modulator => {
                self.modulators.insert(value.to_string());
            }
            Parameter::Target => {
                self.targets.insert(value.to_string());
            }
            Parameter::Factor => self.factor = Some(value.to_string()),
            Parameter::ModulatorsFile => {
                let symbols = read_gene_list(&self.resolve_path(value))?;
                self.modulators.extend(symbols);
            }
            Parameter::TargetsFile => {
                let symbols = read_gene_list(&self.resolve_path(value))?;
                self.targets.extend(symbols);
            }
            Parameter::CustomExpressionFile => {
                self.custom_expression_file = Some(self.resolve_path(value))
            }
            Parameter::TcgaDirectory => self.tcga_directory = Some(self.resolve_path(value)),
            Parameter::TcgaStudy => self.tcga_study = Some(value.to_string()),
            Parameter::UseSubtype => {
                self.subtypes.insert(value.to_string());
            }
            Parameter::FdrThr => self.fdr_threshold = parse_probability(param, value)?,
            Parameter::CategoryPvalThr => {
                self.category_pvalue_threshold = parse_probability(param, value)?
            }
            Parameter::ResultTripletFilename => {
                self.result_triplet_path = self.resolve_path(value)
            }
            Parameter::ResultSvgFilename => self.result_svg_path = self.resolve_path(value),
            Parameter::SifFile => self.sif_file = Some(self.resolve_path(value)),
            Parameter::GeoPlatformFile => self.geo_platform_file = Some(self.resolve_path(value)),
            Parameter::GeoSeriesFile => self.geo_series_file = Some(self.resolve_path(value)),
            Parameter::ExpressionStdevThr => {
                self.expression_stdev_threshold = parse_number(param, value)?
            }
        }
        Ok(())
    }

    pub fn factor(&self) -> Result<&str> {
        self.factor
            .as_deref()
            .ok_or_else(|| GemError::MissingInput("no factor given (key 'factor')".to_string()))
    }

    /// Chooses the expression input; a custom file wins over TCGA, which wins over GEO.
    pub fn expression_input(&self) -> Result<ExpressionInput> {
        if let Some(path) = &self.custom_expression_file {
            return Ok(ExpressionInput::Simple(path.clone()));
        }
        if let (Some(directory), Some(study)) = (&self.tcga_directory, &self.tcga_study) {
            return Ok(ExpressionInput::Tcga {
                directory: directory.clone(),
                study: study.clone(),
                subtypes: self.subtypes.clone(),
            });
        }
        if let (Some(platform), Some(series)) = (&self.geo_platform_file, &self.geo_series_file) {
            return Ok(ExpressionInput::Geo {
                platform: platform.clone(),
                series: series.clone(),
            });
        }
        Err(GemError::MissingInput(
            "no expression data configured (custom-expression-file, tcga-directory + tcga-study, or geo-platform-file + geo-series-file)"
                .to_string(),
        ))
    }
}

pub fn load_parameters(path: &Path) -> Result<RunParameters> {
    let text = fs::read_to_string(path).map_err(|e| {
        GemError::MissingInput(format!("cannot read parameters {}: {e}", path.display()))
    })?;
    let base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    parse_parameters(&text, base_dir)
}

pub fn parse_parameters(text: &str, base_dir: &Path) -> Result<RunParameters> {
    let mut params = RunParameters::with_base_dir(base_dir);
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(GemError::InvalidParameter {
                key: trimmed.to_string(),
                reason: "expected 'key = value'".to_string(),
            });
        };
        let key = key.trim();
        let param =
            Parameter::from_key(key).ok_or_else(|| GemError::UnknownParameter(key.to_string()))?;
        params.set(param, value.trim())?;
    }
    Ok(params)
}

fn parse_number(param: Parameter, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GemError::InvalidParameter {
            key: param.key().to_string(),
            reason: format!("'{value}' is not a number"),
        })
}

fn parse_probability(param: Parameter, value: &str) -> Result<f64> {
    let v = parse_number(param, value)?;
    if !(0.0..=1.0).contains(&v) {
        return Err(GemError::InvalidParameter {
            key: param.key().to_string(),
            reason: format!("{v} is outside [0, 1]"),
        });
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
