use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the upstream reporter writes its JSON files by default.
pub const DEFAULT_FILES_PATTERN: &str = "./mochawesome-report/mochawesome*.json";

/// Where the merged snapshot and document are written by default.
pub const DEFAULT_REPORT_DIR: &str = "./mocha-reporter/";

/// Output document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Html,
    Junit,
}

/// Possibly-partial merge options, as given by a caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOptions {
    /// Glob patterns; empty means the default pattern
    pub files: Vec<String>,
    /// Output directory; `None` or empty means the default directory
    pub report_dir: Option<PathBuf>,
    pub format: Option<ReportFormat>,
}

/// Fully-populated options the pipeline runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub files: Vec<String>,
    pub report_dir: PathBuf,
    pub format: ReportFormat,
}

/// Fill every missing option with its default.
pub fn resolve_options(options: MergeOptions) -> ResolvedOptions {
    let files = if options.files.is_empty() {
        vec![DEFAULT_FILES_PATTERN.to_string()]
    } else {
        options.files
    };

    let report_dir = options
        .report_dir
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR));

    ResolvedOptions {
        files,
        report_dir,
        format: options.format.unwrap_or_default(),
    }
}
