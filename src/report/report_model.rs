use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::merge::aggregate::AggregateResult;

// ============================================================================
// Render context: presentation fields derived from an aggregate
// ============================================================================

pub const PASSED_COLOR: &str = "#2cd860";
pub const FAILED_COLOR: &str = "#de3f3f";
pub const SKIPPED_COLOR: &str = "#fdb563";
pub const PENDING_COLOR: &str = "#666";

pub const FAILED_TESTS_LABEL: &str = "Failed tests list";

/// Everything a renderer needs besides the suite tree itself.
///
/// Percentages are pre-rounded strings so every renderer shows the same
/// numbers; an aggregate without tests shows `"NaN"`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub duration: f64,

    pub lastrun_date: String,
    pub daterun_start: String,
    pub daterun_end: String,
    pub opsys: &'static str,

    pub chart: ChartStops,

    pub run_suites: usize,
    pub run_numerator: usize,

    pub pass_percent: String,
    pub pass_numerator: usize,
    pub fail_percent: String,
    pub fail_numerator: usize,
    pub skip_percent: String,
    pub skip_numerator: usize,
    pub pending_percent: String,
    pub pending_numerator: usize,

    pub tests_list_label: &'static str,
}

/// Colour stops of the summary pie chart. Each stop ends at the cumulative
/// percentage of all bands before it, stacked pass, fail, skip, pending.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStops {
    pub passed: String,
    pub failed: String,
    pub skipped: String,
    pub pending: String,
}

impl ChartStops {
    pub fn new(pass: &str, fail: &str, skip: &str, pending: &str) -> Self {
        Self {
            passed: format!("{c} 0, {c} {pass}%,", c = PASSED_COLOR),
            failed: format!("{c} 0, {c} {}%,", cumulative(&[pass, fail]), c = FAILED_COLOR),
            skipped: format!(
                "{c} 0, {c} {}%,",
                cumulative(&[pass, fail, skip]),
                c = SKIPPED_COLOR
            ),
            pending: format!(
                "{c} 0, {c} {}%",
                cumulative(&[pass, fail, skip, pending]),
                c = PENDING_COLOR
            ),
        }
    }

    /// Body of a CSS `conic-gradient(...)`.
    pub fn gradient(&self) -> String {
        format!("{} {} {} {}", self.passed, self.failed, self.skipped, self.pending)
    }
}

impl RenderContext {
    /// Derive presentation fields. Dates are shown in the local time zone.
    pub fn build(result: &AggregateResult, now: DateTime<Utc>, opsys: &'static str) -> Self {
        let stats = &result.stats;

        let pass_percent = percent_label(stats.passes, stats.tests);
        let fail_percent = percent_label(stats.failures, stats.tests);
        let skip_percent = percent_label(stats.skipped, stats.tests);
        let pending_percent = percent_label(stats.pending, stats.tests);

        let chart = ChartStops::new(&pass_percent, &fail_percent, &skip_percent, &pending_percent);

        Self {
            duration: stats.duration,
            lastrun_date: format_run_date(&now.with_timezone(&Local)),
            daterun_start: format_run_date(&stats.start.with_timezone(&Local)),
            daterun_end: format_run_date(&stats.end.with_timezone(&Local)),
            opsys,
            chart,
            run_suites: stats.suites,
            run_numerator: stats.tests,
            pass_percent,
            pass_numerator: stats.passes,
            fail_percent,
            fail_numerator: stats.failures,
            skip_percent,
            skip_numerator: stats.skipped,
            pending_percent,
            pending_numerator: stats.pending,
            tests_list_label: FAILED_TESTS_LABEL,
        }
    }
}

/// `count / total * 100` with two decimals. No zero guard: `0 / 0` is `"NaN"`.
pub fn percent_label(count: usize, total: usize) -> String {
    to_fixed_2(count as f64 / total as f64 * 100.0)
}

/// Two-decimal rendering that rounds exact ties away from zero.
///
/// `{:.2}` rounds ties to even. A double sits exactly halfway between two
/// hundredths only when it is an odd multiple of 1/8 (`x.125`, `x.375`,
/// `x.625`, `x.875`), so those are bumped explicitly.
pub fn to_fixed_2(value: f64) -> String {
    let eighths = value * 8.0;
    if value.is_finite() && eighths.fract() == 0.0 && eighths.rem_euclid(2.0) == 1.0 {
        format!("{:.2}", (value * 100.0).round() / 100.0)
    } else {
        format!("{:.2}", value)
    }
}

/// Sum of already-rounded percentage labels, with four decimals.
fn cumulative(labels: &[&str]) -> String {
    let sum: f64 = labels
        .iter()
        .map(|label| label.parse::<f64>().unwrap_or(f64::NAN))
        .sum();
    format!("{:.4}", sum)
}

/// e.g. `Monday 15 Jan 2024, 10:30:00`
pub fn format_run_date<Tz>(ts: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    ts.format("%A %-d %b %Y, %H:%M:%S").to_string()
}

/// Label of the host operating system.
pub fn host_os_label() -> &'static str {
    os_label(std::env::consts::OS)
}

/// Map a platform identifier (`std::env::consts::OS`) to a display label.
pub fn os_label(os: &str) -> &'static str {
    match os {
        "aix" => "AIX",
        "macos" => "Mac",
        "freebsd" => "freebsd",
        "linux" => "Linux",
        "openbsd" => "openbsd",
        "solaris" | "illumos" => "sunos",
        "windows" => "Windows",
        _ => "unknown",
    }
}
