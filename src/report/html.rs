use chrono::Utc;

use crate::error::MergeError;
use crate::merge::aggregate::AggregateResult;
use crate::report::renderer::ReportRenderer;
use crate::report::report_model::{
    FAILED_COLOR, PASSED_COLOR, PENDING_COLOR, RenderContext, SKIPPED_COLOR, host_os_label,
};
use crate::suite::collect::collect_all_tests;
use crate::suite::suite_model::{Suite, Test};

// ============================================================================
// HTML reporter: self-contained merged report page
// ============================================================================

/// Renders `report.html`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl ReportRenderer for HtmlRenderer {
    fn file_name(&self) -> &str {
        "report.html"
    }

    fn render(&self, result: &AggregateResult) -> Result<String, MergeError> {
        let ctx = RenderContext::build(result, Utc::now(), host_os_label());
        Ok(generate_html_report(&ctx, result))
    }
}

/// Generate a self-contained HTML report.
///
/// Features:
/// - Green/red header based on whether any test failed
/// - Pie chart of outcomes (CSS conic-gradient) with a legend
/// - Run start/end, generation date and host OS
/// - List of failed tests with their error messages
/// - The merged suite tree
/// - Inline CSS (no external dependencies)
pub fn generate_html_report(ctx: &RenderContext, result: &AggregateResult) -> String {
    let all_passed = ctx.fail_numerator == 0;
    let header_color = if all_passed { "#4CAF50" } else { "#f44336" };
    let status_text = if all_passed {
        "ALL TESTS PASSED"
    } else {
        "SOME TESTS FAILED"
    };

    let failed: Vec<&Test> = collect_all_tests(&result.results)
        .into_iter()
        .filter(|t| t.fail)
        .collect();

    let mut failed_list = String::new();
    if failed.is_empty() {
        failed_list.push_str("<p class=\"empty\">No failed tests</p>\n");
    } else {
        failed_list.push_str("<ul class=\"failures\">\n");
        for test in failed {
            failed_list.push_str(&format!("<li><strong>{}</strong>", escape_html(display_title(test))));
            if let Some(msg) = test.error_message() {
                failed_list.push_str(&format!("<pre>{}</pre>", escape_html(msg)));
            }
            failed_list.push_str("</li>\n");
        }
        failed_list.push_str("</ul>\n");
    }

    let mut suites = String::new();
    for suite in &result.results {
        render_suite(suite, &mut suites);
    }

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Merged Test Report</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 0; background: #f5f5f5; }}
.header {{ background: {header_color}; color: white; padding: 20px 30px; }}
.header h1 {{ margin: 0 0 8px 0; font-size: 24px; }}
.header p {{ margin: 0; font-size: 16px; opacity: 0.9; }}
.content {{ max-width: 900px; margin: 20px auto; padding: 0 20px; }}
.panel {{ background: white; border-radius: 6px; padding: 16px 20px; margin-bottom: 12px; }}
.summary {{ display: flex; align-items: center; gap: 30px; }}
.pie {{ width: 160px; height: 160px; border-radius: 50%; background: conic-gradient({gradient}); flex-shrink: 0; }}
.legend td {{ padding: 2px 8px; font-size: 14px; }}
.swatch {{ display: inline-block; width: 12px; height: 12px; border-radius: 2px; }}
.run-info {{ color: #666; font-size: 14px; }}
.failures li {{ color: #c62828; font-size: 14px; margin-bottom: 6px; }}
.failures pre {{ white-space: pre-wrap; margin: 4px 0 0 0; font-size: 12px; color: #444; }}
.suite {{ border-left: 4px solid #ccc; padding-left: 12px; margin: 8px 0; }}
.suite h3 {{ margin: 0 0 6px 0; font-size: 15px; }}
.suite ul {{ margin: 0; padding-left: 18px; }}
.test {{ font-size: 13px; margin-bottom: 2px; }}
.test.pass {{ color: #2e7d32; }}
.test.fail {{ color: #c62828; }}
.test.pending, .test.skipped {{ color: #8a6d3b; }}
</style>
</head>
<body>
<div class="header">
<h1>{status_text}</h1>
<p>{suites} suites: {passed} passed, {failed} failed ({total} total) in {duration}ms</p>
</div>
<div class="content">
<div class="panel summary">
<div class="pie"></div>
<table class="legend">
<tr><td><span class="swatch" style="background: {passed_color}"></span></td><td>Passed</td><td>{passed}</td><td>{pass_percent}%</td></tr>
<tr><td><span class="swatch" style="background: {failed_color}"></span></td><td>Failed</td><td>{failed}</td><td>{fail_percent}%</td></tr>
<tr><td><span class="swatch" style="background: {skipped_color}"></span></td><td>Skipped</td><td>{skipped}</td><td>{skip_percent}%</td></tr>
<tr><td><span class="swatch" style="background: {pending_color}"></span></td><td>Pending</td><td>{pending}</td><td>{pending_percent}%</td></tr>
</table>
<div class="run-info">
<p>Run start: {daterun_start}</p>
<p>Run end: {daterun_end}</p>
<p>Generated: {lastrun_date}</p>
<p>OS: {opsys}</p>
</div>
</div>
<div class="panel">
<h2>{tests_list_label}</h2>
{failed_list}</div>
<div class="panel">
<h2>Suites</h2>
{suite_tree}</div>
</div>
</body>
</html>"##,
        header_color = header_color,
        status_text = status_text,
        gradient = ctx.chart.gradient(),
        suites = ctx.run_suites,
        total = ctx.run_numerator,
        duration = ctx.duration,
        passed = ctx.pass_numerator,
        failed = ctx.fail_numerator,
        skipped = ctx.skip_numerator,
        pending = ctx.pending_numerator,
        pass_percent = ctx.pass_percent,
        fail_percent = ctx.fail_percent,
        skip_percent = ctx.skip_percent,
        pending_percent = ctx.pending_percent,
        passed_color = PASSED_COLOR,
        failed_color = FAILED_COLOR,
        skipped_color = SKIPPED_COLOR,
        pending_color = PENDING_COLOR,
        daterun_start = ctx.daterun_start,
        daterun_end = ctx.daterun_end,
        lastrun_date = ctx.lastrun_date,
        opsys = ctx.opsys,
        tests_list_label = ctx.tests_list_label,
        failed_list = failed_list,
        suite_tree = suites,
    )
}

fn render_suite(suite: &Suite, out: &mut String) {
    out.push_str("<div class=\"suite\">\n");
    if !suite.title.is_empty() {
        out.push_str(&format!("<h3>{}</h3>\n", escape_html(&suite.title)));
    }

    if !suite.tests.is_empty() {
        out.push_str("<ul>\n");
        for test in &suite.tests {
            out.push_str(&format!(
                "<li class=\"test {}\">{} ({}ms)</li>\n",
                outcome_class(test),
                escape_html(&test.title),
                test.duration
            ));
        }
        out.push_str("</ul>\n");
    }

    for child in &suite.suites {
        render_suite(child, out);
    }
    out.push_str("</div>\n");
}

fn outcome_class(test: &Test) -> &'static str {
    if test.fail {
        "fail"
    } else if test.pass {
        "pass"
    } else if test.skipped {
        "skipped"
    } else if test.pending {
        "pending"
    } else {
        "other"
    }
}

fn display_title(test: &Test) -> &str {
    if test.full_title.is_empty() {
        &test.title
    } else {
        &test.full_title
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
