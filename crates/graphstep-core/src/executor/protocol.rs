//! Request and response bodies exchanged with the executor.

use serde::{Deserialize, Serialize};

use crate::graph::{GraphStore, NodeId, NodeState};
use crate::serialization::{EdgeObject, EdgeRecord};

/// Node entry of a run request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunNode {
    /// Node id.
    pub id: NodeId,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Optional weight.
    pub weight: Option<f64>,
}

/// Which algorithm to run and where to start it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParams {
    /// Algorithm name understood by the executor, e.g. `bfs`.
    pub algorithm: String,
    /// Traversal source.
    pub source: NodeId,
    /// Optional target (shortest-path algorithms).
    pub target: Option<NodeId>,
}

impl RunParams {
    /// Creates parameters without a target.
    pub fn new(algorithm: impl Into<String>, source: NodeId) -> Self {
        Self {
            algorithm: algorithm.into(),
            source,
            target: None,
        }
    }

    /// Sets the target node.
    #[must_use]
    pub fn with_target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }
}

/// Body of `POST /api/grafo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Nodes in store order.
    pub nodes: Vec<RunNode>,
    /// Edges in store order.
    pub edges: Vec<EdgeObject>,
    /// Algorithm name.
    pub algorithm: String,
    /// Traversal source.
    pub source: NodeId,
    /// Optional target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<NodeId>,
}

impl RunRequest {
    /// Snapshots the store into a run request.
    #[must_use]
    pub fn from_store(store: &GraphStore, params: &RunParams) -> Self {
        Self {
            nodes: store
                .all_nodes()
                .into_iter()
                .map(|n| RunNode {
                    id: n.id(),
                    x: n.x(),
                    y: n.y(),
                    weight: n.weight(),
                })
                .collect(),
            edges: store.all_edges().into_iter().map(EdgeObject::from).collect(),
            algorithm: params.algorithm.clone(),
            source: params.source,
            target: params.target,
        }
    }
}

/// Per-node state reported by the executor. Other node fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateNode {
    /// Node id.
    pub id: NodeId,
    /// Traversal state.
    #[serde(default)]
    pub state: NodeState,
}

/// Graph portion of an executor response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphPayload {
    /// Node states.
    #[serde(default)]
    pub nodes: Vec<StateNode>,
    /// Edges as the executor sees them; informational only.
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// Body returned by `POST /api/step`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepResponse {
    /// Current graph state.
    #[serde(default)]
    pub graph: GraphPayload,
    /// Node being processed, if any.
    #[serde(default)]
    pub current_node: Option<NodeId>,
    /// Whether the run has completed.
    #[serde(default)]
    pub finished: bool,
    /// Executor-side step counter.
    #[serde(default)]
    pub step: u64,
}

/// Body returned by `GET /algoritmo/estado`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PollResponse {
    /// Current graph state.
    #[serde(default)]
    pub graph: GraphPayload,
    /// Whether the run has completed.
    #[serde(default)]
    pub finished: bool,
}
