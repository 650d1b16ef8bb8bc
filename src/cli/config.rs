use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::merge::options::{MergeOptions, ReportFormat};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "report-merge",
    version,
    about = "Merge mochawesome JSON reports into one report"
)]
pub struct Cli {
    /// Report files or glob patterns
    pub files: Vec<String>,

    /// Report files or glob patterns (same as the positional arguments)
    #[arg(short = 'f', long = "files", num_args = 1..)]
    pub files_flag: Vec<String>,

    /// Output directory for report.json and the rendered report
    #[arg(short = 'r', long = "report-dir", alias = "reportDir")]
    pub report_dir: Option<PathBuf>,

    /// Rendered report format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Do not print the merge summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to config file (default: report-merge.yaml in current dir)
    #[arg(long)]
    pub config: Option<String>,
}

impl Cli {
    /// Positional and `--files` patterns, positional first.
    pub fn patterns(&self) -> Vec<String> {
        self.files
            .iter()
            .chain(self.files_flag.iter())
            .cloned()
            .collect()
    }
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `report-merge.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub files: Vec<String>,

    pub report_dir: Option<PathBuf>,

    pub format: Option<ReportFormat>,
}

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("report-merge.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Option Builder (merge CLI args with config file)
// ============================================================================

/// CLI > config file. Anything still missing is filled in by
/// `resolve_options` with the built-in defaults.
pub fn build_merge_options(cli: &Cli, config: &AppConfig) -> MergeOptions {
    let patterns = cli.patterns();
    let files = if patterns.is_empty() {
        config.files.clone()
    } else {
        patterns
    };

    MergeOptions {
        files,
        report_dir: cli.report_dir.clone().or_else(|| config.report_dir.clone()),
        format: cli.format.or(config.format),
    }
}
