use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::merge::span::{TimeSpan, iso_millis};
use crate::suite::collect::collect_all_tests;
use crate::suite::suite_model::{Suite, millis};

// ============================================================================
// Aggregate statistics: recomputed from the merged suite tree
// ============================================================================

/// Summary counters of a merged run, in the layout of the upstream
/// reporter's own stats block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub suites: usize,
    pub tests: usize,
    pub passes: usize,
    pub pending: usize,
    pub failures: usize,

    #[serde(with = "iso_millis")]
    pub start: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub end: DateTime<Utc>,

    /// Sum of test durations in milliseconds
    #[serde(serialize_with = "millis::serialize")]
    pub duration: f64,

    /// Always equal to `tests`
    pub tests_registered: usize,

    /// `passes * 100 / tests`; NaN when there are no tests
    pub pass_percent: f64,

    /// `pending * 100 / tests`; NaN when there are no tests
    pub pending_percent: f64,

    /// Reserved, always 0
    pub other: usize,
    /// Reserved, always false
    pub has_other: bool,

    pub skipped: usize,
    pub has_skipped: bool,
}

/// Compute stats over every test in `suites`.
///
/// `suites` counts the suites passed in, not the nested ones. `start` and
/// `end` are stamped with the current time; the aggregate builder replaces
/// them with the merged span of the input reports.
///
/// Percentages divide by the test count without a zero guard: an empty
/// tree yields NaN, which serializes as JSON `null`.
pub fn generate_stats(suites: &[Suite]) -> AggregateStats {
    let tests = collect_all_tests(suites);

    let passes = tests.iter().filter(|t| t.pass).count();
    let pending = tests.iter().filter(|t| t.pending).count();
    let failures = tests.iter().filter(|t| t.fail).count();
    let skipped = tests.iter().filter(|t| t.skipped).count();
    let duration: f64 = tests.iter().map(|t| t.duration).sum();

    let total = tests.len();
    let now = Utc::now();

    AggregateStats {
        suites: suites.len(),
        tests: total,
        passes,
        pending,
        failures,
        start: now,
        end: now,
        duration,
        tests_registered: total,
        pass_percent: (passes * 100) as f64 / total as f64,
        pending_percent: (pending * 100) as f64 / total as f64,
        other: 0,
        has_other: false,
        skipped,
        has_skipped: skipped > 0,
    }
}

impl AggregateStats {
    /// Replace the computed timestamps with a merged report span.
    pub fn with_span(mut self, span: TimeSpan) -> Self {
        self.start = span.start;
        self.end = span.end;
        self
    }

    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }
}
