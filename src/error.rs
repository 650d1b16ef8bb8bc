use std::path::PathBuf;

use thiserror::Error;

/// Every way a merge can fail. Nothing in the pipeline recovers locally:
/// each variant propagates unchanged to the caller of `merge`.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A glob pattern matched zero files
    #[error("Pattern {pattern} matched no report files")]
    PatternMatch { pattern: String },

    /// A glob pattern could not be compiled
    #[error("Invalid pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// A directory could not be read while expanding a pattern
    #[error("Failed to expand pattern: {0}")]
    Glob(#[from] glob::GlobError),

    /// A resolved report file could not be read
    #[error("Failed to read report {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A resolved report file is not valid JSON or does not match the report schema
    #[error("Failed to parse report {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// No report was available to take the time span and metadata from
    #[error("No reports to merge")]
    MissingReport,

    /// Writing the snapshot or the rendered document failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the aggregate failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The renderer could not produce a document
    #[error("Render error: {0}")]
    Render(String),
}
