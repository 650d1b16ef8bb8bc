use crate::error::MergeError;
use crate::merge::aggregate::AggregateResult;
use crate::merge::span::format_timestamp;
use crate::report::renderer::ReportRenderer;
use crate::suite::collect::collect_all_tests;
use crate::suite::suite_model::{Suite, Test};

// ============================================================================
// JUnit XML reporter: standard CI integration format
// ============================================================================

/// Renders `report.xml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JunitRenderer;

impl ReportRenderer for JunitRenderer {
    fn file_name(&self) -> &str {
        "report.xml"
    }

    fn render(&self, result: &AggregateResult) -> Result<String, MergeError> {
        Ok(generate_junit_xml(result))
    }
}

/// Generate JUnit XML for CI systems (Jenkins, GitHub Actions, GitLab CI).
///
/// Every suite node that owns tests becomes one `<testsuite>`, visited
/// pre-order; nested suite titles are joined with ` / `.
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuites name="merged" tests="3" failures="1" skipped="0" time="0.120" timestamp="...">
///   <testsuite name="Login" tests="2" failures="1" skipped="0" time="0.080">
///     <testcase name="accepts valid user" classname="Login" time="0.050" />
///     <testcase name="rejects bad password" classname="Login" time="0.030">
///       <failure message="expected 401" type="AssertionError">expected 401</failure>
///     </testcase>
///   </testsuite>
/// </testsuites>
/// ```
pub fn generate_junit_xml(result: &AggregateResult) -> String {
    let stats = &result.stats;

    let mut suites = String::new();
    for suite in &result.results {
        push_suite(suite, &[], &mut suites);
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuites name=\"merged\" tests=\"{tests}\" failures=\"{failures}\" skipped=\"{skipped}\" time=\"{time}\" timestamp=\"{timestamp}\">\n{suites}</testsuites>\n",
        tests = stats.tests,
        failures = stats.failures,
        skipped = collect_all_tests(&result.results)
            .into_iter()
            .filter(|t| is_skipped(t))
            .count(),
        time = seconds(stats.duration),
        timestamp = format_timestamp(&stats.start),
        suites = suites,
    )
}

fn push_suite<'a>(suite: &'a Suite, parents: &[&'a str], out: &mut String) {
    let mut path: Vec<&str> = parents.to_vec();
    if !suite.title.is_empty() {
        path.push(&suite.title);
    }

    if !suite.tests.is_empty() {
        let name = if path.is_empty() {
            "root".to_string()
        } else {
            path.join(" / ")
        };

        let failures = suite.tests.iter().filter(|t| t.fail).count();
        let skipped = suite.tests.iter().filter(|t| is_skipped(t)).count();
        let duration: f64 = suite.tests.iter().map(|t| t.duration).sum();

        out.push_str(&format!(
            "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" skipped=\"{}\" time=\"{}\">\n",
            escape_xml(&name),
            suite.tests.len(),
            failures,
            skipped,
            seconds(duration),
        ));
        for test in &suite.tests {
            push_case(test, &name, out);
        }
        out.push_str("  </testsuite>\n");
    }

    for child in &suite.suites {
        push_suite(child, &path, out);
    }
}

fn push_case(test: &Test, classname: &str, out: &mut String) {
    let open = format!(
        "    <testcase name=\"{}\" classname=\"{}\" time=\"{}\"",
        escape_xml(&test.title),
        escape_xml(classname),
        seconds(test.duration),
    );

    if test.fail {
        let message = test.error_message().unwrap_or("test failed");
        out.push_str(&format!(
            "{open}>\n      <failure message=\"{msg}\" type=\"AssertionError\">{msg}</failure>\n    </testcase>\n",
            open = open,
            msg = escape_xml(message),
        ));
    } else if is_skipped(test) {
        out.push_str(&format!("{}>\n      <skipped />\n    </testcase>\n", open));
    } else {
        out.push_str(&format!("{} />\n", open));
    }
}

fn is_skipped(test: &Test) -> bool {
    !test.fail && (test.skipped || test.pending)
}

fn seconds(ms: f64) -> String {
    format!("{:.3}", ms / 1000.0)
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
