use crate::suite::suite_model::{Report, Suite, Test};

/// Flatten the top-level suites of every report into one list, keeping
/// report order and the order within each report. Absent slots are dropped.
pub fn collect_suites(reports: &[Report]) -> Vec<Suite> {
    reports
        .iter()
        .flat_map(|report| report.results.iter().flatten().cloned())
        .collect()
}

/// All test leaves of a suite tree, pre-order: the suite's own tests first,
/// then each child suite's tests in child order.
///
/// Suite trees come from JSON documents and cannot contain cycles, so the
/// walk has no visited set or depth bound.
pub fn collect_tests(suite: &Suite) -> Vec<&Test> {
    let mut tests: Vec<&Test> = suite.tests.iter().collect();
    for child in &suite.suites {
        tests.extend(collect_tests(child));
    }
    tests
}

/// `collect_tests` applied to each suite, concatenated in suite order.
pub fn collect_all_tests(suites: &[Suite]) -> Vec<&Test> {
    suites.iter().flat_map(collect_tests).collect()
}
