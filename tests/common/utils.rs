#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use report_merge::suite::suite_model::{Report, ReportStats, Suite};
use serde_json::{Value, json};

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn ts(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid RFC 3339 timestamp")
}

/// An in-memory report spanning `[start, end]`.
pub fn report(start: &str, end: &str, suites: Vec<Suite>) -> Report {
    Report {
        stats: ReportStats {
            start: ts(start),
            end: ts(end),
        },
        results: suites.into_iter().map(Some).collect(),
        meta: Some(json!({ "source": start })),
    }
}

pub fn test_json(title: &str, state: &str, duration: u64) -> Value {
    json!({
        "title": title,
        "fullTitle": title,
        "duration": duration,
        "state": state,
        "pass": state == "passed",
        "fail": state == "failed",
        "pending": state == "pending",
        "skipped": state == "skipped",
        "err": {},
    })
}

pub fn suite_json(title: &str, tests: Vec<Value>, suites: Vec<Value>) -> Value {
    json!({
        "uuid": format!("uuid-{}", title),
        "title": title,
        "tests": tests,
        "suites": suites,
    })
}

pub fn report_json(start: &str, end: &str, results: Vec<Value>) -> Value {
    json!({
        "stats": { "start": start, "end": end, "tests": 0 },
        "results": results,
        "meta": { "mocha": { "version": "10.2.0" } },
    })
}

/// Write `report` as `<dir>/<name>` and return the path.
pub fn write_report(dir: &Path, name: &str, report: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(report).unwrap()).unwrap();
    path
}

/// Glob pattern for `<dir>/<file_pattern>`.
pub fn pattern_in(dir: &Path, file_pattern: &str) -> String {
    dir.join(file_pattern).to_string_lossy().into_owned()
}
