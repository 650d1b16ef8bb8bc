use crate::merge::aggregate::AggregateResult;
use crate::suite::collect::collect_tests;

// ============================================================================
// Console reporter: formatted terminal summary
// ============================================================================

/// Format a merged report for terminal output.
///
/// Produces output like:
/// ```text
/// === Merged Report: 2 suites ===
///
/// ✓ PASS  Checkout (4 tests)
/// ✗ FAIL  Login (2 tests)
///     [FAIL] Login rejects bad password — expected 401 to equal 200
///
/// === Results: 5 passed, 1 failed, 0 pending, 0 skipped (6 total) in 1.2s ===
/// ```
pub fn format_console_summary(result: &AggregateResult) -> String {
    let stats = &result.stats;
    let mut out = String::new();

    out.push_str(&format!("=== Merged Report: {} suites ===\n\n", stats.suites));

    for suite in &result.results {
        let tests = collect_tests(suite);
        let failed: Vec<_> = tests.iter().filter(|t| t.fail).collect();
        let marker = if failed.is_empty() {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };
        let name = if suite.title.is_empty() {
            "(root)"
        } else {
            suite.title.as_str()
        };

        out.push_str(&format!("{}  {} ({} tests)\n", marker, name, tests.len()));

        for test in failed {
            let detail = test.error_message().unwrap_or("test failed");
            out.push_str(&format!("    [FAIL] {} — {}\n", test.full_title, detail));
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed, {} pending, {} skipped ({} total) in {:.1}s ===\n",
        stats.passes,
        stats.failures,
        stats.pending,
        stats.skipped,
        stats.tests,
        stats.duration / 1000.0
    ));

    out
}
