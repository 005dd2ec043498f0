//! Strategy output aggregation
//!
//! Collects every Monte Carlo run file written for one strategy, keeps each
//! run's value series for overlay charts and summarizes the distribution of
//! their end values.

use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::AggregatorConfig;
use crate::discovery::find_run_files;
use crate::error::{OutputError, Result};
use crate::series::{load_value_series, ValueSeries};
use crate::stats::{histogram, HistogramBin, Quartiles};

/// One loaded simulation run
#[derive(Debug, Clone)]
pub struct RunSeries {
    pub path: PathBuf,
    pub series: ValueSeries,
}

/// Matching file that could not be read as a run table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything known about one strategy's Monte Carlo outputs
#[derive(Debug, Clone)]
pub struct StrategySummary {
    pub strategy: String,
    /// Runs in discovery order
    pub runs: Vec<RunSeries>,
    /// Last value of each run, aligned with `runs`
    pub terminal_values: Vec<f64>,
    pub quartiles: Quartiles,
    pub histogram: Vec<HistogramBin>,
    pub skipped: Vec<SkippedFile>,
}

impl StrategySummary {
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Value series only, for overlay plotting
    pub fn series(&self) -> impl Iterator<Item = &ValueSeries> {
        self.runs.iter().map(|r| &r.series)
    }
}

/// Discover, load and summarize all run files of `strategy_name`
///
/// Files whose table is malformed are skipped and listed in
/// [`StrategySummary::skipped`]; any other read failure aborts the pass.
pub fn summarize(config: &AggregatorConfig, strategy_name: &str) -> Result<StrategySummary> {
    if strategy_name.is_empty() {
        return Err(OutputError::InvalidStrategyName);
    }

    let files = find_run_files(&config.output_dir, &config.marker, strategy_name)?;
    info!(
        "Found {} run files for '{}' in {:?}",
        files.len(),
        strategy_name,
        config.output_dir
    );

    // Collect preserves discovery order
    let loaded: Vec<(PathBuf, Result<ValueSeries>)> = files
        .into_par_iter()
        .map(|path| {
            let series = load_value_series(&path);
            (path, series)
        })
        .collect();

    let mut runs = Vec::with_capacity(loaded.len());
    let mut terminal_values = Vec::with_capacity(loaded.len());
    let mut skipped = Vec::new();

    for (path, result) in loaded {
        match result {
            Ok(series) => {
                // Loader rejects empty columns, so a terminal value exists
                if let Some(end) = series.terminal_value() {
                    terminal_values.push(end);
                    runs.push(RunSeries { path, series });
                }
            }
            Err(OutputError::MalformedTable { path, reason }) => {
                warn!("Skipping malformed run file {:?}: {}", path, reason);
                skipped.push(SkippedFile { path, reason });
            }
            Err(e) => return Err(e),
        }
    }

    let quartiles =
        Quartiles::from_values(&terminal_values).ok_or_else(|| OutputError::EmptyResult {
            strategy: strategy_name.to_string(),
            dir: config.output_dir.clone(),
        })?;
    let histogram = histogram(&terminal_values, config.effective_bins());

    info!(
        "Summarized {} runs ({} skipped): q25={:.2} q50={:.2} q75={:.2}",
        runs.len(),
        skipped.len(),
        quartiles.q25,
        quartiles.q50,
        quartiles.q75
    );

    Ok(StrategySummary {
        strategy: strategy_name.to_string(),
        runs,
        terminal_values,
        quartiles,
        histogram,
        skipped,
    })
}
