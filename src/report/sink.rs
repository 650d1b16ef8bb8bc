use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::MergeError;
use crate::merge::aggregate::AggregateResult;
use crate::merge::options::ResolvedOptions;
use crate::report::renderer::ReportRenderer;

pub const SNAPSHOT_FILE: &str = "report.json";

/// Write the snapshot, then render and write the document.
///
/// The snapshot goes to disk before rendering starts, so a failing renderer
/// leaves `report.json` behind without a rendered document.
pub fn persist(
    aggregate: &AggregateResult,
    options: &ResolvedOptions,
    renderer: &dyn ReportRenderer,
) -> Result<String, MergeError> {
    std::fs::create_dir_all(&options.report_dir)?;

    let snapshot = write_snapshot(aggregate, &options.report_dir)?;
    debug!(path = %snapshot.display(), "Wrote snapshot");

    let document = renderer.render(aggregate)?;
    let output = options.report_dir.join(renderer.file_name());
    std::fs::write(&output, &document)?;
    info!(path = %output.display(), "Wrote report");

    Ok(document)
}

/// Write `<dir>/report.json`, pretty-printed with four-space indentation.
pub fn write_snapshot(aggregate: &AggregateResult, dir: &Path) -> Result<PathBuf, MergeError> {
    let path = dir.join(SNAPSHOT_FILE);
    std::fs::write(&path, to_snapshot_json(aggregate)?)?;
    Ok(path)
}

pub fn to_snapshot_json(aggregate: &AggregateResult) -> Result<Vec<u8>, MergeError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    aggregate.serialize(&mut serializer)?;
    Ok(buf)
}
