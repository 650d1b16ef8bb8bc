mod common;

use common::utils::{fixture, report, report_json, suite_json, test_json, write_report};
use report_merge::MergeError;
use report_merge::suite::collect::{collect_all_tests, collect_suites, collect_tests};
use report_merge::suite::loader::load_report;
use report_merge::suite::suite_model::{Report, Suite, Test};
use serde_json::json;

// ============================================================================
// Helper builders
// ============================================================================

/// A chain of `depth` nested suites, each owning one test.
fn deep_suite(depth: usize) -> Suite {
    let mut suite = Suite::new(&format!("level {}", depth)).with_tests(vec![Test::new("t", 1).passed()]);
    for level in (0..depth.saturating_sub(1)).rev() {
        suite = Suite::new(&format!("level {}", level))
            .with_tests(vec![Test::new("t", 1).passed()])
            .with_suites(vec![suite]);
    }
    suite
}

/// One root suite with `width` children, each owning one test.
fn wide_suite(width: usize) -> Suite {
    let children = (0..width)
        .map(|i| Suite::new(&format!("child {}", i)).with_tests(vec![Test::new("t", 1).passed()]))
        .collect();
    Suite::new("root").with_suites(children)
}

// ============================================================================
// Report parsing
// ============================================================================

#[test]
fn parse_fixture_report() {
    let report = load_report(&fixture("mochawesome_a.json")).unwrap();

    assert_eq!(report.results.len(), 1);
    let root = report.results[0].as_ref().unwrap();
    assert_eq!(root.title, "");
    assert_eq!(root.suites[0].title, "Login");
    assert_eq!(root.suites[0].tests.len(), 2);
    assert_eq!(report.meta.as_ref().unwrap()["mocha"]["version"], "10.2.0");
}

#[test]
fn parse_keeps_false_slots_as_absent() {
    let report = load_report(&fixture("mochawesome_b.json")).unwrap();
    assert_eq!(report.results.len(), 2);
    assert!(report.results[0].is_none());
    assert_eq!(report.results[1].as_ref().unwrap().title, "Checkout");
}

#[test]
fn parse_null_slot_as_absent() {
    let raw = report_json(
        "2024-01-01T00:00:00.000Z",
        "2024-01-01T00:01:00.000Z",
        vec![json!(null), suite_json("A", vec![], vec![])],
    );
    let report: Report = serde_json::from_value(raw).unwrap();
    assert!(report.results[0].is_none());
    assert!(report.results[1].is_some());
}

#[test]
fn parse_preserves_unknown_suite_and_test_fields() {
    let report = load_report(&fixture("mochawesome_a.json")).unwrap();
    let login = &report.results[0].as_ref().unwrap().suites[0];

    assert_eq!(login.extra["uuid"], "a2e7f3c4-1b5d-4e8a-b6c2-9d0e1f2a3b4c");
    assert_eq!(login.extra["_timeout"], 2000);

    let failing = &login.tests[1];
    assert_eq!(failing.full_title, "Login rejects bad password");
    assert_eq!(failing.extra["state"], "failed");
    assert_eq!(
        failing.error_message(),
        Some("AssertionError: expected 401 to equal 200")
    );

    // Round-trips back out with the extra fields in place
    let out = serde_json::to_value(login).unwrap();
    assert_eq!(out["fullFile"], "");
    assert_eq!(out["tests"][1]["err"]["diff"], "- 401\n+ 200\n");
    assert_eq!(out["tests"][1]["fullTitle"], "Login rejects bad password");
}

#[test]
fn parse_missing_flags_default_to_false() {
    let raw = json!({ "title": "bare", "duration": 5 });
    let test: Test = serde_json::from_value(raw).unwrap();
    assert!(!test.pass && !test.fail && !test.pending && !test.skipped);
    assert_eq!(test.error_message(), None);
}

#[test]
fn empty_error_message_is_none() {
    let raw = json!({ "title": "t", "duration": 1, "err": { "message": "" } });
    let test: Test = serde_json::from_value(raw).unwrap();
    assert_eq!(test.error_message(), None);
}

#[test]
fn parse_rejects_suite_without_tests_array() {
    let raw = report_json(
        "2024-01-01T00:00:00.000Z",
        "2024-01-01T00:01:00.000Z",
        vec![json!({ "title": "broken", "suites": [] })],
    );
    let err = serde_json::from_value::<Report>(raw).unwrap_err();
    assert!(err.to_string().contains("tests"), "got: {}", err);
}

#[test]
fn parse_rejects_missing_stats_start() {
    let raw = json!({ "stats": { "end": "2024-01-01T00:00:00.000Z" }, "results": [] });
    assert!(serde_json::from_value::<Report>(raw).is_err());
}

#[test]
fn parse_rejects_malformed_timestamp() {
    let raw = report_json("yesterday", "2024-01-01T00:00:00.000Z", vec![]);
    assert!(serde_json::from_value::<Report>(raw).is_err());
}

#[test]
fn parse_rejects_negative_duration() {
    let raw = json!({ "title": "t", "duration": -3 });
    assert!(serde_json::from_value::<Test>(raw).is_err());
}

#[test]
fn parse_accepts_offset_timestamps() {
    let raw = report_json("2024-01-01T12:00:00+02:00", "2024-01-01T12:30:00+02:00", vec![]);
    let report: Report = serde_json::from_value(raw).unwrap();
    assert_eq!(report.stats.start.to_rfc3339(), "2024-01-01T10:00:00+00:00");
}

#[test]
fn parse_without_meta_yields_none() {
    let raw = json!({
        "stats": { "start": "2024-01-01T00:00:00Z", "end": "2024-01-01T00:00:01Z" },
        "results": [],
    });
    let report: Report = serde_json::from_value(raw).unwrap();
    assert!(report.meta.is_none());
}

#[test]
fn parse_keeps_explicit_null_meta() {
    let raw = json!({
        "stats": { "start": "2024-01-01T00:00:00Z", "end": "2024-01-01T00:00:01Z" },
        "results": [],
        "meta": null,
    });
    let report: Report = serde_json::from_value(raw).unwrap();
    assert_eq!(report.meta, Some(serde_json::Value::Null));
}

#[test]
fn parse_reads_timestamps_without_offset_as_utc() {
    let raw = report_json("2024-01-01T12:00:00.250", "2024-01-02", vec![]);
    let report: Report = serde_json::from_value(raw).unwrap();
    assert_eq!(report.stats.start.to_rfc3339(), "2024-01-01T12:00:00.250+00:00");
    assert_eq!(report.stats.end.to_rfc3339(), "2024-01-02T00:00:00+00:00");
}

#[test]
fn parse_accepts_fractional_duration() {
    let raw = json!({ "title": "t", "duration": 12.5 });
    let test: Test = serde_json::from_value(raw).unwrap();
    assert_eq!(test.duration, 12.5);

    // Whole durations are written back as integers
    let whole: Test = serde_json::from_value(json!({ "title": "t", "duration": 7 })).unwrap();
    assert_eq!(serde_json::to_value(&whole).unwrap()["duration"], 7);
    assert_eq!(serde_json::to_value(&test).unwrap()["duration"], 12.5);
}

#[test]
fn fractional_durations_load_and_sum() {
    let dir = tempfile::tempdir().unwrap();
    let mut fast = test_json("fast", "passed", 0);
    fast["duration"] = json!(12.5);
    let mut slow = test_json("slow", "failed", 0);
    slow["duration"] = json!(0.25);
    let path = write_report(
        dir.path(),
        "fractional.json",
        &report_json(
            "2024-01-01T00:00:00.000Z",
            "2024-01-01T00:01:00.000Z",
            vec![suite_json("timing", vec![fast, slow], vec![])],
        ),
    );

    let aggregate = report_merge::build_aggregate(vec![load_report(&path).unwrap()]).unwrap();
    assert_eq!(aggregate.stats.duration, 12.75);
    let out = serde_json::to_value(&aggregate.stats).unwrap();
    assert_eq!(out["duration"], 12.75);
}

#[test]
fn load_report_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    match load_report(&missing) {
        Err(MergeError::Read { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected Read error, got {:?}", other),
    }
}

#[test]
fn load_report_reports_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_report(&path).unwrap_err();
    assert!(matches!(err, MergeError::Parse { .. }));
    assert!(err.to_string().contains("broken.json"), "got: {}", err);
}

#[test]
fn load_report_reports_schema_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_report(dir.path(), "wrong.json", &json!({ "results": "nope" }));
    assert!(matches!(load_report(&path), Err(MergeError::Parse { .. })));
}

// ============================================================================
// Suite flattening
// ============================================================================

#[test]
fn collect_suites_drops_absent_and_keeps_order() {
    let mut first = report(
        "2024-01-01T00:00:00Z",
        "2024-01-01T00:01:00Z",
        vec![Suite::new("a1"), Suite::new("a2")],
    );
    first.results.insert(1, None);
    let second = report("2024-01-01T00:00:00Z", "2024-01-01T00:01:00Z", vec![Suite::new("b1")]);

    let suites = collect_suites(&[first, second]);
    let titles: Vec<&str> = suites.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["a1", "a2", "b1"]);
}

#[test]
fn collect_suites_of_no_reports_is_empty() {
    assert!(collect_suites(&[]).is_empty());
}

// ============================================================================
// Test collection
// ============================================================================

#[test]
fn collect_tests_empty_suite() {
    assert!(collect_tests(&Suite::new("empty")).is_empty());
}

#[test]
fn collect_tests_is_preorder_tests_before_children() {
    let suite = Suite::new("root")
        .with_tests(vec![Test::new("r1", 1), Test::new("r2", 1)])
        .with_suites(vec![
            Suite::new("a")
                .with_tests(vec![Test::new("a1", 1)])
                .with_suites(vec![Suite::new("aa").with_tests(vec![Test::new("aa1", 1)])]),
            Suite::new("b").with_tests(vec![Test::new("b1", 1)]),
        ]);

    let titles: Vec<&str> = collect_tests(&suite).into_iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["r1", "r2", "a1", "aa1", "b1"]);
}

#[test]
fn collect_tests_count_independent_of_shape() {
    assert_eq!(collect_tests(&deep_suite(50)).len(), 50);
    // Root of the wide tree has no tests of its own
    assert_eq!(collect_tests(&wide_suite(50)).len(), 50);
}

#[test]
fn collect_tests_handles_deep_nesting() {
    assert_eq!(collect_tests(&deep_suite(500)).len(), 500);
}

#[test]
fn collect_all_tests_concatenates_in_suite_order() {
    let suites = vec![
        Suite::new("x").with_tests(vec![Test::new("x1", 1)]),
        Suite::new("y").with_suites(vec![Suite::new("yy").with_tests(vec![Test::new("yy1", 1)])]),
        Suite::new("z").with_tests(vec![Test::new("z1", 1)]),
    ];
    let titles: Vec<&str> = collect_all_tests(&suites).into_iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["x1", "yy1", "z1"]);
}

#[test]
fn collect_tests_from_parsed_json_tree() {
    let raw = suite_json(
        "root",
        vec![test_json("one", "passed", 1)],
        vec![suite_json(
            "child",
            vec![test_json("two", "failed", 2), test_json("three", "pending", 0)],
            vec![],
        )],
    );
    let suite: Suite = serde_json::from_value(raw).unwrap();
    assert_eq!(collect_tests(&suite).len(), 3);
}
