// Library crate - discovery, loading and summarizing of strategy outputs

pub mod config;
pub mod error;
pub mod series;
pub mod discovery;
pub mod stats;
pub mod aggregate;
pub mod report;

// Re-export commonly used types
pub use config::AggregatorConfig;
pub use error::{OutputError, Result};
pub use series::{load_value_series, ValueSeries};
pub use discovery::{find_run_files, is_run_file};
pub use stats::{histogram, quantile, HistogramBin, Quartiles};
pub use aggregate::{summarize, RunSeries, SkippedFile, StrategySummary};
pub use report::{format_quartiles_line, SeriesOverview, StrategyReport};
