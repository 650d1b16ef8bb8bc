use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::MergeError;
use crate::suite::suite_model::Report;

// ============================================================================
// Pattern resolution
// ============================================================================

/// Expand glob patterns into file paths, in pattern order.
///
/// Each pattern contributes its matches in the order the glob walk yields
/// them. A pattern with no matches aborts the whole resolution. Paths are
/// not deduplicated across patterns, so overlapping patterns load (and
/// count) the same file more than once.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, MergeError> {
    let mut files = Vec::new();

    for pattern in patterns {
        let entries = glob::glob(pattern).map_err(|source| MergeError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;

        let matched = entries.collect::<Result<Vec<_>, _>>()?;
        if matched.is_empty() {
            return Err(MergeError::PatternMatch {
                pattern: pattern.clone(),
            });
        }

        debug!(pattern = %pattern, matches = matched.len(), "Resolved pattern");
        files.extend(matched);
    }

    Ok(files)
}

// ============================================================================
// Report loading
// ============================================================================

/// Load and parse every file. Files are read in parallel; the returned
/// reports keep the order of `files`. The first failure aborts the load.
pub fn load_reports(files: &[PathBuf]) -> Result<Vec<Report>, MergeError> {
    let reports = files
        .par_iter()
        .map(|path| load_report(path))
        .collect::<Result<Vec<_>, _>>()?;

    info!(count = reports.len(), "Loaded reports");
    Ok(reports)
}

/// Load a single report file.
pub fn load_report(path: &Path) -> Result<Report, MergeError> {
    let content = std::fs::read_to_string(path).map_err(|source| MergeError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| MergeError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
