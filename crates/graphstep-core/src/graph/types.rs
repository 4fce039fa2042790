//! Graph types for the editable in-memory graph.
//!
//! Nodes and edges serialize directly into the Extended wire shape
//! (`{id, x, y, weight, state}` / `{id, from, to, weight, directed}`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Node identifier. Unique within the node namespace of a store.
pub type NodeId = u64;

/// Edge identifier. Unique within the edge namespace of a store.
pub type EdgeId = u64;

/// Presentation/animation tag carried by every node.
///
/// The state never influences structural operations. It is written by the
/// animation stepper (from executor responses) and by selection highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// Untouched by any algorithm run.
    #[default]
    #[serde(alias = "DEFAULT")]
    Default,
    /// Known to the algorithm but not reached yet.
    #[serde(alias = "UNVISITED")]
    Unvisited,
    /// Fully processed.
    #[serde(alias = "VISITED")]
    Visited,
    /// Discovered and waiting in the frontier.
    #[serde(alias = "VISITING")]
    Visiting,
    /// Highlighted by the user's selection.
    #[serde(alias = "SELECTED")]
    Selected,
}

impl NodeState {
    /// Returns the wire name of this state.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Unvisited => "unvisited",
            Self::Visited => "visited",
            Self::Visiting => "visiting",
            Self::Selected => "selected",
        }
    }
}

impl std::fmt::Display for NodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vertex of the editable graph.
///
/// # Example
///
/// ```rust
/// use graphstep_core::graph::{GraphStore, NodeState};
///
/// let mut store = GraphStore::new();
/// let node = store.add_node(10.0, 20.0).unwrap();
///
/// assert_eq!(node.id(), 1);
/// assert_eq!(node.position(), (10.0, 20.0));
/// assert_eq!(node.weight(), None);
/// assert_eq!(node.state(), NodeState::Default);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    id: NodeId,
    x: f64,
    y: f64,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    state: NodeState,
}

impl Node {
    /// Creates a node at the given position with no weight and default state.
    #[must_use]
    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            weight: None,
            state: NodeState::Default,
        }
    }

    /// Returns the node ID.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the x coordinate.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y coordinate.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns `(x, y)`.
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Returns the optional user-assigned weight.
    #[must_use]
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// Returns the animation state.
    #[must_use]
    pub fn state(&self) -> NodeState {
        self.state
    }

    pub(crate) fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub(crate) fn set_weight(&mut self, weight: Option<f64>) {
        self.weight = weight;
    }

    pub(crate) fn set_state(&mut self, state: NodeState) {
        self.state = state;
    }
}

/// A connection between two distinct nodes.
///
/// Edge identity is independent of its endpoints and directedness: toggling
/// `directed` keeps the same id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    id: EdgeId,
    from: NodeId,
    to: NodeId,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default = "default_directed")]
    directed: bool,
}

fn default_directed() -> bool {
    true
}

impl Edge {
    /// Creates an edge. Structural validation happens in the store.
    #[must_use]
    pub fn new(id: EdgeId, from: NodeId, to: NodeId, options: EdgeOptions) -> Self {
        Self {
            id,
            from,
            to,
            weight: options.weight,
            directed: options.directed,
        }
    }

    /// Returns the edge ID.
    #[must_use]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Returns the source node ID.
    #[must_use]
    pub fn from(&self) -> NodeId {
        self.from
    }

    /// Returns the target node ID.
    #[must_use]
    pub fn to(&self) -> NodeId {
        self.to
    }

    /// Returns the optional weight.
    #[must_use]
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// Returns true if the edge only runs `from -> to`.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns true if the edge lies between `a` and `b` in either orientation.
    #[must_use]
    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    pub(crate) fn set_weight(&mut self, weight: Option<f64>) {
        self.weight = weight;
    }

    pub(crate) fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }
}

/// Options for a new edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeOptions {
    /// Optional weight.
    pub weight: Option<f64>,
    /// Whether the edge only runs `from -> to`.
    pub directed: bool,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            weight: None,
            directed: true,
        }
    }
}

impl EdgeOptions {
    /// Options for a directed, unweighted edge.
    #[must_use]
    pub fn directed() -> Self {
        Self::default()
    }

    /// Options for an undirected, unweighted edge.
    #[must_use]
    pub fn undirected() -> Self {
        Self {
            weight: None,
            directed: false,
        }
    }

    /// Sets the weight (builder pattern).
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Why the store refused a structural edit.
///
/// These are ordinary outcomes of interactive editing, reported as values
/// rather than raised.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralRejection {
    /// Both endpoints are the same node.
    #[error("self-loop edges are not allowed")]
    SelfLoop,

    /// An endpoint does not exist in the store.
    #[error("unknown endpoint: node {0}")]
    UnknownEndpoint(NodeId),

    /// The pair is already connected in a conflicting way.
    #[error("nodes are already connected")]
    DuplicateConnection,

    /// The store already holds the maximum number of live nodes.
    #[error("node capacity exceeded (max {0})")]
    CapacityExceeded(usize),
}
