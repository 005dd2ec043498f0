//! Configuration for the strategy output aggregator

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory the simulator writes its CSV outputs into
pub const DEFAULT_OUTPUT_DIR: &str = "../strat_outputs/";

/// Filename marker shared by every Monte Carlo run file
pub const DEFAULT_MARKER: &str = "MonteCarloSimu_";

/// Bin count of the end value distribution
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// Upper bound on histogram bins
pub const MAX_HISTOGRAM_BINS: usize = 10_000;

/// Where to look for run files and how to bucket their end values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Directory holding the simulator CSV outputs
    pub output_dir: PathBuf,

    /// Substring every Monte Carlo run filename contains
    pub marker: String,

    /// Number of equal-width histogram bins over the terminal values
    pub histogram_bins: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            marker: DEFAULT_MARKER.to_string(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl AggregatorConfig {
    /// Config rooted at a specific output directory, other fields default
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Bin count actually used, within [1, MAX_HISTOGRAM_BINS]
    pub fn effective_bins(&self) -> usize {
        self.histogram_bins.clamp(1, MAX_HISTOGRAM_BINS)
    }
}
