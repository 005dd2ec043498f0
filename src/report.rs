//! Text and JSON views of loaded outputs

use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::aggregate::{SkippedFile, StrategySummary};
use crate::series::ValueSeries;
use crate::stats::{HistogramBin, Quartiles};

/// One-line end value summary, as printed after a Monte Carlo run
pub fn format_quartiles_line(q: &Quartiles) -> String {
    format!(
        "Modes on end values: 25% : {} - 50% : {} - 75% : {}",
        q.q25, q.q50, q.q75
    )
}

/// Machine-readable view of a [`StrategySummary`]
#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub strategy: String,
    pub run_count: usize,
    pub quartiles: Quartiles,
    pub min_end_value: f64,
    pub max_end_value: f64,
    pub mean_end_value: f64,
    pub terminal_values: Vec<f64>,
    pub histogram: Vec<HistogramBin>,
    pub skipped: Vec<SkippedFile>,
}

impl StrategyReport {
    pub fn from_summary(summary: &StrategySummary) -> Self {
        let values = &summary.terminal_values;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len().max(1) as f64;

        Self {
            strategy: summary.strategy.clone(),
            run_count: summary.run_count(),
            quartiles: summary.quartiles,
            min_end_value: min,
            max_end_value: max,
            mean_end_value: mean,
            terminal_values: values.clone(),
            histogram: summary.histogram.clone(),
            skipped: summary.skipped.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Multi-line report for the terminal
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "=".repeat(60)));
        out.push_str(&format!("STRATEGY: {}\n", self.strategy));
        out.push_str(&format!("{}\n", "=".repeat(60)));
        out.push_str(&format!("Runs: {} ({} skipped)\n", self.run_count, self.skipped.len()));
        out.push_str(&format!(
            "End value: min {:.2} | mean {:.2} | max {:.2}\n",
            self.min_end_value, self.mean_end_value, self.max_end_value
        ));
        out.push_str(&format_quartiles_line(&self.quartiles));
        out.push('\n');

        let peak = self.histogram.iter().map(|b| b.count).max().unwrap_or(0);
        if peak > 0 {
            out.push_str(&format!("{}\n", "-".repeat(60)));
            out.push_str("End Value Distribution\n");
            for bin in &self.histogram {
                let bar = bin.count * 40 / peak;
                out.push_str(&format!(
                    "  {:>12.2} - {:>12.2} | {:<40} {}\n",
                    bin.lower,
                    bin.upper,
                    "#".repeat(bar),
                    bin.count
                ));
            }
        }
        out
    }
}

/// Headline numbers of a single value series
#[derive(Debug, Clone, Serialize)]
pub struct SeriesOverview {
    pub path: PathBuf,
    pub days: usize,
    pub first_value: f64,
    pub final_value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub total_return: Option<f64>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl SeriesOverview {
    /// `None` for an empty series
    pub fn new(path: &Path, series: &ValueSeries) -> Option<Self> {
        let first_value = series.first_value()?;
        let final_value = series.terminal_value()?;
        let total_return = (first_value != 0.0).then(|| final_value / first_value - 1.0);
        let dates = series.dates();

        Some(Self {
            path: path.to_path_buf(),
            days: series.len(),
            first_value,
            final_value,
            min_value: series.min_value()?,
            max_value: series.max_value()?,
            total_return,
            first_date: dates.and_then(|d| d.first().copied()),
            last_date: dates.and_then(|d| d.last().copied()),
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("File: {}\n", self.path.display()));
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => {
                out.push_str(&format!("Days: {} ({} to {})\n", self.days, first, last))
            }
            _ => out.push_str(&format!("Days: {}\n", self.days)),
        }
        out.push_str(&format!(
            "Portfolio Value: first {:.2} | final {:.2} | min {:.2} | max {:.2}\n",
            self.first_value, self.final_value, self.min_value, self.max_value
        ));
        if let Some(ret) = self.total_return {
            out.push_str(&format!("Total return: {:.2}%\n", ret * 100.0));
        }
        out
    }
}
