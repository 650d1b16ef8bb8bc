//! Merge mochawesome JSON reports from independent test-runner invocations
//! into one aggregate: recomputed stats, the combined suite tree, a JSON
//! snapshot and a rendered document.

pub mod cli;
pub mod error;
pub mod merge;
pub mod report;
pub mod suite;

pub use error::MergeError;
pub use merge::aggregate::{AggregateResult, MergeOutput, build_aggregate, merge, merge_with, run_merge};
pub use merge::options::{MergeOptions, ReportFormat, ResolvedOptions, resolve_options};
