//! Error types for reading and summarizing strategy outputs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for aggregator operations.
pub type Result<T> = std::result::Result<T, OutputError>;

/// Failures while discovering, loading or summarizing run files.
#[derive(Error, Debug)]
pub enum OutputError {
    /// Output directory missing or not listable.
    #[error("Output directory not found: {path:?}")]
    DirectoryNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Single file requested but not present.
    #[error("File not found: {path:?}")]
    FileNotFound { path: PathBuf },

    /// Table lacks a usable "Value" column or is not semicolon-delimited.
    #[error("Malformed table {path:?}: {reason}")]
    MalformedTable { path: PathBuf, reason: String },

    /// No run file survived the filters, so there is nothing to summarize.
    #[error("No data: no run files matching strategy '{strategy}' in {dir:?}")]
    EmptyResult { strategy: String, dir: PathBuf },

    /// Empty strategy filter would match every run file.
    #[error("Strategy name must not be empty")]
    InvalidStrategyName,

    /// Any other read failure.
    #[error("Failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OutputError {
    /// Create a malformed table error.
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedTable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when the error only concerns one file's contents.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedTable { .. })
    }
}
