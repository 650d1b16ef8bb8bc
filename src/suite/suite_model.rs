use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

use crate::merge::span::iso_millis;

// ============================================================================
// Input schema: one mochawesome JSON file per test-runner invocation
// ============================================================================

/// A single test run as written by the upstream reporter.
#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    pub stats: ReportStats,

    /// Top-level suites. `false`/`null` slots are kept as `None` and dropped
    /// when suites are flattened.
    #[serde(deserialize_with = "suite_slots")]
    pub results: Vec<Option<Suite>>,

    /// Opaque run metadata, carried through from the first report only.
    /// `None` when the field is absent; an explicit `null` is kept.
    #[serde(default, deserialize_with = "present")]
    pub meta: Option<Value>,
}

/// The part of a report's own stats block that the merge reads.
/// Every other counter is recomputed from the suite tree.
///
/// Timestamps without an offset (`2024-01-15T10:30:00`, `2024-01-15`) are
/// read as UTC.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReportStats {
    #[serde(deserialize_with = "iso_millis::deserialize")]
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "iso_millis::deserialize")]
    pub end: DateTime<Utc>,
}

/// A grouping node. Fields other than `title`, `tests` and `suites`
/// (uuid, file, hooks, per-suite counters...) pass through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suite {
    #[serde(default)]
    pub title: String,

    pub tests: Vec<Test>,

    pub suites: Vec<Suite>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single test leaf.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub full_title: String,

    #[serde(default)]
    pub pass: bool,

    #[serde(default)]
    pub fail: bool,

    #[serde(default)]
    pub pending: bool,

    #[serde(default)]
    pub skipped: bool,

    /// Milliseconds, possibly fractional
    #[serde(with = "millis")]
    pub duration: f64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Suite {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            tests: Vec::new(),
            suites: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_tests(mut self, tests: Vec<Test>) -> Self {
        self.tests = tests;
        self
    }

    pub fn with_suites(mut self, suites: Vec<Suite>) -> Self {
        self.suites = suites;
        self
    }
}

impl Test {
    /// A test with no outcome flag set.
    pub fn new(title: &str, duration: impl Into<f64>) -> Self {
        Self {
            title: title.to_string(),
            full_title: title.to_string(),
            pass: false,
            fail: false,
            pending: false,
            skipped: false,
            duration: duration.into(),
            extra: Map::new(),
        }
    }

    pub fn passed(mut self) -> Self {
        self.pass = true;
        self
    }

    pub fn failed(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn pending(mut self) -> Self {
        self.pending = true;
        self
    }

    pub fn skipped(mut self) -> Self {
        self.skipped = true;
        self
    }

    /// Message of the recorded assertion error (`err.message`), if any.
    pub fn error_message(&self) -> Option<&str> {
        self.extra
            .get("err")
            .and_then(|err| err.get("message"))
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty())
    }
}

fn suite_slots<'de, D>(deserializer: D) -> Result<Vec<Option<Suite>>, D::Error>
where
    D: Deserializer<'de>,
{
    let slots = Vec::<Value>::deserialize(deserializer)?;
    slots
        .into_iter()
        .map(|slot| match slot {
            Value::Bool(false) | Value::Null => Ok(None),
            other => serde_json::from_value(other)
                .map(Some)
                .map_err(de::Error::custom),
        })
        .collect()
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Non-negative millisecond durations. Whole values are written back as JSON
/// integers, so `120` stays `120` rather than `120.0`.
pub(crate) mod millis {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(ms: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if ms.fract() == 0.0 && *ms >= 0.0 && *ms <= u64::MAX as f64 {
            serializer.serialize_u64(*ms as u64)
        } else {
            serializer.serialize_f64(*ms)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let ms = f64::deserialize(deserializer)?;
        if ms.is_finite() && ms >= 0.0 {
            Ok(ms)
        } else {
            Err(de::Error::custom(format!(
                "invalid duration {}, expected a non-negative number of milliseconds",
                ms
            )))
        }
    }
}
