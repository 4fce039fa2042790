//! Save/load helpers.

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::graph::GraphStore;

use super::{export_json_with_run, import_any, GraphFormat, ImportReport, RunMetadata};

/// Writes the store to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or a file operation fails.
pub fn save_to_file(store: &GraphStore, path: impl AsRef<Path>, format: GraphFormat) -> Result<()> {
    save_to_file_with_run(store, path, format, RunMetadata::default())
}

/// Writes the store and `run` to `path` as pretty-printed JSON.
///
/// The file is written to a sibling temp file first and renamed into place.
///
/// # Errors
///
/// Returns an error if serialization or a file operation fails.
pub fn save_to_file_with_run(
    store: &GraphStore,
    path: impl AsRef<Path>,
    format: GraphFormat,
    run: RunMetadata,
) -> Result<()> {
    let path = path.as_ref();
    let json = export_json_with_run(store, format, run)?;

    let mut temp_path = path.as_os_str().to_owned();
    temp_path.push(".tmp");
    std::fs::write(&temp_path, json.as_bytes())?;
    std::fs::rename(&temp_path, path)?;

    info!(path = %path.display(), nodes = store.node_count(), "Graph saved");
    Ok(())
}

/// Replaces the store contents with the document at `path` (either shape).
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid graph; the
/// store is left untouched in that case.
pub fn load_from_file(store: &mut GraphStore, path: impl AsRef<Path>) -> Result<ImportReport> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let report = import_any(store, &json)?;
    info!(path = %path.display(), nodes = report.nodes, edges = report.edges, "Graph loaded");
    Ok(report)
}
