mod candidates;
mod config;
mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod stats;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{PARAMETER_FILENAME, load_parameters};
use crate::error::Result;
use crate::pipeline::run_selection;
use crate::pipeline::stage1_expression::run_stage1;
use crate::pipeline::stage2_candidates::run_stage2;
use crate::pipeline::stage6_report::{Stage6Input, write_reports};
use crate::report::json::build_run_summary;
use crate::report::recurrence::integrate_runs;
use crate::report::svg::{GroupBy, write_gem_plot};
use crate::report::triplet_file::read_triplet_file;

#[derive(Debug, Parser)]
#[command(
    name = "kira-gem",
    version,
    about = "Find modulators of a transcription factor's effect on its targets"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, PartialEq)]
enum Command {
    /// Run one analysis described by a parameters file.
    Run {
        #[arg(long)]
        params: PathBuf,
    },
    /// Run every directory under a root that holds a parameters.txt.
    Scan {
        #[arg(long)]
        root: PathBuf,
    },
    /// Render a saved triplet file as an SVG figure.
    Plot {
        #[arg(long)]
        triplets: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Group boxes by target instead of modulator.
        #[arg(long)]
        by_target: bool,
    },
    /// Collect triplets recurring across the result files of a directory.
    Recurrent {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 2)]
        min: usize,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Run { params } => run_analysis(&params).map(|_| ()),
        Command::Scan { root } => {
            let dirs = find_parameter_dirs(&root)?;
            info!("found {} analysis directories under {}", dirs.len(), root.display());
            for dir in dirs {
                info!("directory = {}", dir.display());
                run_analysis(&dir.join(PARAMETER_FILENAME))?;
            }
            Ok(())
        }
        Command::Plot {
            triplets,
            out,
            by_target,
        } => {
            let loaded = read_triplet_file(&triplets)?;
            let group_by = if by_target {
                GroupBy::Target
            } else {
                GroupBy::Modulator
            };
            write_gem_plot(&out, &loaded, group_by)
        }
        Command::Recurrent { input, out, min } => {
            let levels = integrate_runs(&input, &out, min)?;
            if levels.is_empty() {
                info!("no triplet recurs in at least {} result files", min);
            }
            Ok(())
        }
    }
}

/// Loads parameters, builds and selects triplets, and writes all reports. Returns the number
/// of reported triplets.
fn run_analysis(params_path: &Path) -> Result<usize> {
    let params = load_parameters(params_path)?;
    let factor = params.factor()?.to_string();

    let expression = run_stage1(&params)?;
    let triplets = run_stage2(&params, expression.as_ref())?;
    info!("Size of triplets tested      = {}", triplets.len());

    let outcome = run_selection(
        triplets,
        params.fdr_threshold,
        params.category_pvalue_threshold,
    );
    info!("Size of significant triplets = {}", outcome.triplets.len());

    let summary = build_run_summary(
        &factor,
        expression.n_samples(),
        params.fdr_threshold,
        params.category_pvalue_threshold,
        &outcome,
    );
    write_reports(&Stage6Input {
        triplets: &outcome.triplets,
        triplet_path: &params.result_triplet_path,
        svg_path: &params.result_svg_path,
        summary: &summary,
        expression: Some(expression.as_ref()),
    })?;

    Ok(outcome.triplets.len())
}

/// Directories under `root` (itself included) containing a parameters file, sorted.
fn find_parameter_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        if dir.join(PARAMETER_FILENAME).is_file() {
            out.push(dir.clone());
        }
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            // symlinked directories are not followed
            if entry.file_type()?.is_dir() {
                stack.push(entry.path());
            }
        }
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
