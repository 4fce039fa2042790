//! Extended format: full-fidelity nodes and edges plus run metadata.
//!
//! ```json
//! { "nodes": [{"id":1,"x":0,"y":0,"weight":null,"state":"default"}],
//!   "edges": [{"id":1,"from":1,"to":2,"weight":null,"directed":true}],
//!   "current_node": null, "finished": false, "step": 0 }
//! ```
//!
//! Used for save/load and, in pieces, as the executor wire format.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{Edge, EdgeId, EdgeOptions, GraphStore, Node, NodeId};

use super::{stage_import, ImportReport, StagedEdge};

fn default_directed() -> bool {
    true
}

/// Object form of an edge. Missing `directed` means directed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeObject {
    /// Edge id; assigned on import when absent.
    #[serde(default)]
    pub id: Option<EdgeId>,
    /// Source node.
    pub from: NodeId,
    /// Target node.
    pub to: NodeId,
    /// Optional weight.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Direction flag.
    #[serde(default = "default_directed")]
    pub directed: bool,
}

impl From<&Edge> for EdgeObject {
    fn from(edge: &Edge) -> Self {
        Self {
            id: Some(edge.id()),
            from: edge.from(),
            to: edge.to(),
            weight: edge.weight(),
            directed: edge.is_directed(),
        }
    }
}

/// An edge as it appears on the wire: object form, or a legacy `[from, to]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeRecord {
    /// `[from, to]`, imported as a directed, unweighted edge.
    Pair([NodeId; 2]),
    /// `{id, from, to, weight, directed}`.
    Object(EdgeObject),
}

impl EdgeRecord {
    /// Normalizes to the object form.
    #[must_use]
    pub fn into_object(self) -> EdgeObject {
        match self {
            Self::Object(object) => object,
            Self::Pair([from, to]) => EdgeObject {
                id: None,
                from,
                to,
                weight: None,
                directed: true,
            },
        }
    }
}

impl From<EdgeRecord> for StagedEdge {
    fn from(record: EdgeRecord) -> Self {
        let object = record.into_object();
        Self {
            id: object.id,
            from: object.from,
            to: object.to,
            options: EdgeOptions {
                weight: object.weight,
                directed: object.directed,
            },
        }
    }
}

/// Run metadata carried alongside the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Node the executor is currently processing.
    #[serde(default)]
    pub current_node: Option<NodeId>,
    /// Whether the run has completed.
    #[serde(default)]
    pub finished: bool,
    /// Step counter.
    #[serde(default)]
    pub step: u64,
}

/// The extended graph document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedGraph {
    /// Nodes in store order.
    pub nodes: Vec<Node>,
    /// Edges in store order.
    pub edges: Vec<EdgeRecord>,
    /// Run metadata, flattened into the top level.
    #[serde(flatten)]
    pub run: RunMetadata,
}

impl ExtendedGraph {
    /// Exports the store with empty run metadata.
    #[must_use]
    pub fn from_store(store: &GraphStore) -> Self {
        Self::from_store_with_run(store, RunMetadata::default())
    }

    /// Exports the store together with the given run metadata.
    #[must_use]
    pub fn from_store_with_run(store: &GraphStore, run: RunMetadata) -> Self {
        Self {
            nodes: store.all_nodes().into_iter().cloned().collect(),
            edges: store
                .all_edges()
                .into_iter()
                .map(|e| EdgeRecord::Object(e.into()))
                .collect(),
            run,
        }
    }

    /// Replaces the store contents with this document.
    ///
    /// On error the store is left untouched.
    pub fn apply_to(self, store: &mut GraphStore) -> Result<ImportReport> {
        let edges = self.edges.into_iter().map(StagedEdge::from);
        stage_import(store, self.nodes, edges, None)
    }
}
