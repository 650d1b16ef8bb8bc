use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::MergeError;
use crate::merge::options::{MergeOptions, ResolvedOptions, resolve_options};
use crate::merge::span::merge_time_span;
use crate::merge::stats::{AggregateStats, generate_stats};
use crate::report::renderer::{ReportRenderer, build_renderer};
use crate::report::sink::persist;
use crate::suite::collect::collect_suites;
use crate::suite::loader::{load_reports, resolve_patterns};
use crate::suite::suite_model::{Report, Suite};

// ============================================================================
// Aggregate result: the merged view of every input report
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub stats: AggregateStats,

    /// Top-level suites of all reports, in report order
    pub results: Vec<Suite>,

    /// Metadata of the first report. Omitted only when that report had none;
    /// an explicit `null` is written back out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// What one pipeline run produced: the aggregate and the rendered document.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    pub aggregate: AggregateResult,
    pub document: String,
}

/// Combine loaded reports into one aggregate.
///
/// The stats' own timestamps are overwritten by the merged span of the
/// reports, so the span always wins.
pub fn build_aggregate(reports: Vec<Report>) -> Result<AggregateResult, MergeError> {
    let span = merge_time_span(&reports)?;
    let results = collect_suites(&reports);
    let stats = generate_stats(&results).with_span(span);

    let meta = reports
        .into_iter()
        .next()
        .map(|first| first.meta)
        .ok_or(MergeError::MissingReport)?;

    Ok(AggregateResult {
        stats,
        results,
        meta,
    })
}

/// Run the whole pipeline with the renderer matching `options.format`.
/// Returns the rendered document.
pub fn merge(options: MergeOptions) -> Result<String, MergeError> {
    let format = options.format.unwrap_or_default();
    let renderer = build_renderer(format);
    merge_with(options, renderer.as_ref())
}

/// Run the whole pipeline with a caller-supplied renderer.
pub fn merge_with(
    options: MergeOptions,
    renderer: &dyn ReportRenderer,
) -> Result<String, MergeError> {
    let options = resolve_options(options);
    run_merge(&options, renderer).map(|output| output.document)
}

/// Aggregate, snapshot and render with already-resolved options.
pub fn run_merge(
    options: &ResolvedOptions,
    renderer: &dyn ReportRenderer,
) -> Result<MergeOutput, MergeError> {
    let aggregate = aggregate_reports(options)?;
    let document = persist(&aggregate, options, renderer)?;
    Ok(MergeOutput {
        aggregate,
        document,
    })
}

/// Resolve, load and combine the input reports without writing anything.
pub fn aggregate_reports(options: &ResolvedOptions) -> Result<AggregateResult, MergeError> {
    let files = resolve_patterns(&options.files)?;
    let reports = load_reports(&files)?;
    let aggregate = build_aggregate(reports)?;

    info!(
        suites = aggregate.stats.suites,
        tests = aggregate.stats.tests,
        passes = aggregate.stats.passes,
        failures = aggregate.stats.failures,
        "Merged reports"
    );

    Ok(aggregate)
}
