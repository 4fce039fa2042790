//! Conversion between a [`GraphStore`] and its JSON documents.
//!
//! Two shapes are understood:
//!
//! - [`PlainGraph`]: positions and unordered pairs only.
//! - [`ExtendedGraph`]: weights, direction, node state and run metadata.
//!
//! Every import is staged: the document is replayed into a fresh store and
//! only a successful result replaces the live one.
//!
//! # Example
//!
//! ```rust
//! use graphstep_core::graph::{EdgeOptions, GraphStore};
//! use graphstep_core::serialization::{export_json, import_json, GraphFormat};
//!
//! let mut store = GraphStore::new();
//! let a = store.add_node(0.0, 0.0).unwrap().id();
//! let b = store.add_node(5.0, 5.0).unwrap().id();
//! store.add_edge(a, b, EdgeOptions::directed().with_weight(2.0)).unwrap();
//!
//! let json = export_json(&store, GraphFormat::Extended).unwrap();
//! let mut copy = GraphStore::new();
//! import_json(&mut copy, &json, GraphFormat::Extended).unwrap();
//! assert_eq!(copy.edge_count(), 1);
//! ```

mod extended;
mod file;
mod plain;


use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{EdgeId, EdgeOptions, GraphStore, Node, NodeId, RestoreError, ID_LIMIT};

pub use extended::{EdgeObject, EdgeRecord, ExtendedGraph, RunMetadata};
pub use file::{load_from_file, save_to_file, save_to_file_with_run};
pub use plain::{PlainGraph, PlainNode};

/// File name used when saving without an explicit path.
pub const DEFAULT_FILE_NAME: &str = "grafo.json";

/// Document shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    /// `{nodes:[{id,x,y}], edges:[[from,to]]}`.
    Plain,
    /// `{nodes:[{id,x,y,weight,state}], edges:[{id,from,to,weight,directed}], ...}`.
    Extended,
}

/// Counts reported by a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    /// Nodes restored.
    pub nodes: usize,
    /// Edges restored.
    pub edges: usize,
    /// Edges dropped because they broke a structural rule.
    pub skipped_edges: usize,
}

/// An edge waiting to be replayed into a staged store.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StagedEdge {
    pub(crate) id: Option<EdgeId>,
    pub(crate) from: NodeId,
    pub(crate) to: NodeId,
    pub(crate) options: EdgeOptions,
}

/// Replays nodes then edges into a fresh store with the same capacity and
/// swaps it in on success.
pub(crate) fn stage_import(
    store: &mut GraphStore,
    nodes: impl IntoIterator<Item = Node>,
    edges: impl IntoIterator<Item = StagedEdge>,
    next_node_id: Option<NodeId>,
) -> Result<ImportReport> {
    let mut staged = GraphStore::with_max_nodes(store.capacity());
    let mut report = ImportReport::default();

    for node in nodes {
        let id = node.id();
        staged.restore_node(node).map_err(|err| match err {
            RestoreError::DuplicateNode(id) => {
                Error::Serialization(format!("duplicate node id {id}"))
            }
            RestoreError::IdOutOfRange(id) => id_out_of_range("node", id),
            RestoreError::Structural(rejection) => {
                Error::Serialization(format!("node {id}: {rejection}"))
            }
        })?;
        report.nodes += 1;
    }

    for edge in edges {
        match staged.restore_edge(edge.id, edge.from, edge.to, edge.options) {
            Ok(_) => report.edges += 1,
            Err(RestoreError::Structural(rejection)) => {
                warn!(
                    from = edge.from,
                    to = edge.to,
                    reason = %rejection,
                    "Skipping edge during import"
                );
                report.skipped_edges += 1;
            }
            Err(RestoreError::IdOutOfRange(id) | RestoreError::DuplicateNode(id)) => {
                return Err(id_out_of_range("edge", id));
            }
        }
    }

    if let Some(next) = next_node_id {
        staged
            .reserve_node_ids(next)
            .map_err(|_| id_out_of_range("nextNodeId", next))?;
    }

    debug!(
        nodes = report.nodes,
        edges = report.edges,
        skipped = report.skipped_edges,
        "Graph imported"
    );
    *store = staged;
    Ok(report)
}

fn id_out_of_range(what: &str, id: u64) -> Error {
    Error::Serialization(format!("{what} id {id} exceeds the limit of {ID_LIMIT}"))
}

/// Guesses the shape of a parsed document.
///
/// Extended when any node carries `weight` or `state`, or any edge is an
/// object. Everything else is read as plain.
#[must_use]
pub fn detect_format(document: &Value) -> GraphFormat {
    let node_is_extended = document
        .get("nodes")
        .and_then(Value::as_array)
        .is_some_and(|nodes| {
            nodes
                .iter()
                .any(|n| n.get("weight").is_some() || n.get("state").is_some())
        });
    let edge_is_object = document
        .get("edges")
        .and_then(Value::as_array)
        .is_some_and(|edges| edges.iter().any(Value::is_object));

    if node_is_extended || edge_is_object {
        GraphFormat::Extended
    } else {
        GraphFormat::Plain
    }
}

/// Serializes the store in the requested shape, with empty run metadata.
pub fn export_value(store: &GraphStore, format: GraphFormat) -> Result<Value> {
    export_value_with_run(store, format, RunMetadata::default())
}

/// Serializes the store in the requested shape. The plain shape has no
/// room for `run` and drops it.
pub fn export_value_with_run(
    store: &GraphStore,
    format: GraphFormat,
    run: RunMetadata,
) -> Result<Value> {
    let value = match format {
        GraphFormat::Plain => serde_json::to_value(PlainGraph::from_store(store))?,
        GraphFormat::Extended => {
            serde_json::to_value(ExtendedGraph::from_store_with_run(store, run))?
        }
    };
    Ok(value)
}

/// Serializes the store to a pretty-printed JSON string.
pub fn export_json(store: &GraphStore, format: GraphFormat) -> Result<String> {
    export_json_with_run(store, format, RunMetadata::default())
}

/// Like [`export_json`], carrying `run` in the extended shape.
pub fn export_json_with_run(
    store: &GraphStore,
    format: GraphFormat,
    run: RunMetadata,
) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export_value_with_run(
        store, format, run,
    )?)?)
}

/// Replaces the store contents with a parsed document of a known shape.
pub fn import_value(
    store: &mut GraphStore,
    document: Value,
    format: GraphFormat,
) -> Result<ImportReport> {
    if !document.is_object() {
        return Err(Error::Serialization(
            "graph document must be a JSON object".to_string(),
        ));
    }
    match format {
        GraphFormat::Plain => serde_json::from_value::<PlainGraph>(document)?.apply_to(store),
        GraphFormat::Extended => {
            serde_json::from_value::<ExtendedGraph>(document)?.apply_to(store)
        }
    }
}

/// Replaces the store contents with a JSON document of a known shape.
pub fn import_json(store: &mut GraphStore, json: &str, format: GraphFormat) -> Result<ImportReport> {
    import_value(store, serde_json::from_str(json)?, format)
}

/// Replaces the store contents with a JSON document of either shape.
pub fn import_any(store: &mut GraphStore, json: &str) -> Result<ImportReport> {
    let document: Value = serde_json::from_str(json)?;
    let format = detect_format(&document);
    debug!(?format, "Detected graph document format");
    import_value(store, document, format)
}
