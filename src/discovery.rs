use std::path::{Path, PathBuf};

use crate::error::{OutputError, Result};

/// Filename filter: both substrings present, case-sensitive
pub fn is_run_file(file_name: &str, marker: &str, strategy_name: &str) -> bool {
    file_name.contains(marker) && file_name.contains(strategy_name)
}

/// Find all run files in `output_dir` belonging to `strategy_name`
///
/// Only regular files are considered. Returned paths are sorted so repeated
/// passes over the same directory load runs in the same order.
pub fn find_run_files(output_dir: &Path, marker: &str, strategy_name: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(output_dir).map_err(|e| OutputError::DirectoryNotFound {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| OutputError::Io {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        // Names that are not valid UTF-8 cannot contain the filters verbatim
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_run_file(file_name, marker, strategy_name) {
            continue;
        }

        if !path.is_file() {
            tracing::debug!("Skipping non-file entry {:?}", path);
            continue;
        }

        files.push(path);
    }

    files.sort();
    Ok(files)
}
