//! In-memory graph store with structural invariants.
//!
//! Keeps bidirectional adjacency indexes (outgoing/incoming edge ids per
//! node) next to insertion-ordered node and edge maps, so iteration order
//! is stable and exports are reproducible.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, info};

use super::types::{Edge, EdgeId, EdgeOptions, Node, NodeId, NodeState, StructuralRejection};

/// Default bound on the number of live nodes.
pub const DEFAULT_MAX_NODES: usize = 10;

/// Exclusive upper bound for node and edge ids read from documents.
///
/// 2^53 is the largest range JSON readers hold exactly; keeping restored
/// ids below it leaves the counters room to grow without overflow.
pub const ID_LIMIT: u64 = 1 << 53;

/// Owned, mutable aggregate of nodes and edges.
///
/// Every mutation keeps these invariants:
///
/// 1. no edge references a missing node (node removal cascades),
/// 2. no self-loops,
/// 3. a directed `A -> B` conflicts with another directed `A -> B` or with
///    any undirected edge on `{A, B}`; an undirected edge conflicts with any
///    edge on `{A, B}`,
/// 4. node and edge ids are unique (monotonic counters, reset by `clear`),
/// 5. at most `max_nodes` live nodes.
///
/// Not-found and rejected edits are reported through `bool`, `Option` or
/// `Result<_, StructuralRejection>`; nothing here panics on user input.
#[derive(Debug, Clone)]
pub struct GraphStore {
    /// All nodes in insertion order.
    nodes: IndexMap<NodeId, Node>,
    /// All edges in insertion order.
    edges: IndexMap<EdgeId, Edge>,
    /// Outgoing edges: from_id -> Vec<edge_id>.
    outgoing: HashMap<NodeId, Vec<EdgeId>>,
    /// Incoming edges: to_id -> Vec<edge_id>.
    incoming: HashMap<NodeId, Vec<EdgeId>>,
    next_node_id: NodeId,
    next_edge_id: EdgeId,
    max_nodes: usize,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::with_max_nodes(DEFAULT_MAX_NODES)
    }
}

impl GraphStore {
    /// Creates an empty store with the default node bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store holding at most `max_nodes` live nodes.
    #[must_use]
    pub fn with_max_nodes(max_nodes: usize) -> Self {
        Self {
            nodes: IndexMap::with_capacity(max_nodes),
            edges: IndexMap::new(),
            outgoing: HashMap::with_capacity(max_nodes),
            incoming: HashMap::with_capacity(max_nodes),
            next_node_id: 1,
            next_edge_id: 1,
            max_nodes,
        }
    }

    /// Returns the bound on live nodes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.max_nodes
    }

    /// Returns true if no more nodes can be added.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.nodes.len() >= self.max_nodes
    }

    /// Returns the id the next `add_node` will assign.
    #[must_use]
    pub fn next_node_id(&self) -> NodeId {
        self.next_node_id
    }

    // ── Node CRUD ──────────────────────────────────────────────────────

    /// Adds a node at `(x, y)` with the next unused id.
    ///
    /// # Errors
    ///
    /// Returns `StructuralRejection::CapacityExceeded` when the store is full;
    /// the store is left unchanged.
    pub fn add_node(&mut self, x: f64, y: f64) -> Result<Node, StructuralRejection> {
        if self.is_full() {
            debug!(max = self.max_nodes, "add_node rejected: capacity reached");
            return Err(StructuralRejection::CapacityExceeded(self.max_nodes));
        }
        let id = self.next_node_id;
        self.next_node_id += 1;

        let node = Node::new(id, x, y);
        self.nodes.insert(id, node.clone());
        debug!(node = id, x, y, "node added");
        Ok(node)
    }

    /// Gets a node by ID.
    #[must_use]
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Removes a node and all its connected edges (cascade delete).
    ///
    /// Returns false if the node does not exist.
    pub fn remove_node(&mut self, node_id: NodeId) -> bool {
        if self.nodes.shift_remove(&node_id).is_none() {
            return false;
        }
        let removed = self.remove_node_edges(node_id);
        debug!(node = node_id, cascaded_edges = removed, "node removed");
        true
    }

    /// Returns true if a node with the given ID exists.
    #[must_use]
    pub fn has_node(&self, node_id: NodeId) -> bool {
        self.nodes.contains_key(&node_id)
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns all node IDs in insertion order.
    #[must_use]
    pub fn all_node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Returns all nodes in insertion order.
    #[must_use]
    pub fn all_nodes(&self) -> Vec<&Node> {
        self.nodes.values().collect()
    }

    /// Moves a node. Returns false if the node does not exist.
    pub fn update_node_position(&mut self, id: NodeId, x: f64, y: f64) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.set_position(x, y);
                true
            }
            None => false,
        }
    }

    /// Sets or clears a node weight. Returns false if the node does not exist.
    pub fn set_node_weight(&mut self, id: NodeId, weight: Option<f64>) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.set_weight(weight);
                true
            }
            None => false,
        }
    }

    /// Sets a node's animation state; silently ignores unknown ids.
    pub fn set_node_state(&mut self, id: NodeId, state: NodeState) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_state(state);
        }
    }

    /// Puts every node back into `NodeState::Default`.
    pub fn reset_node_states(&mut self) {
        for node in self.nodes.values_mut() {
            node.set_state(NodeState::Default);
        }
    }

    // ── Edge CRUD ──────────────────────────────────────────────────────

    /// Connects `from` and `to`.
    ///
    /// # Errors
    ///
    /// - `SelfLoop` if `from == to`,
    /// - `UnknownEndpoint` if either node is missing,
    /// - `DuplicateConnection` if the pair is already connected in a way that
    ///   conflicts with `options.directed`.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        options: EdgeOptions,
    ) -> Result<Edge, StructuralRejection> {
        self.check_connection(from, to, options.directed)?;

        let id = self.next_edge_id;
        self.next_edge_id += 1;

        let edge = Edge::new(id, from, to, options);
        self.attach_edge(edge.clone());
        debug!(
            edge = id,
            from,
            to,
            directed = options.directed,
            "edge added"
        );
        Ok(edge)
    }

    /// Gets an edge by its ID.
    #[must_use]
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Checks if an edge with the given ID exists.
    #[must_use]
    pub fn has_edge(&self, edge_id: EdgeId) -> bool {
        self.edges.contains_key(&edge_id)
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns all edge IDs in insertion order.
    #[must_use]
    pub fn all_edge_ids(&self) -> Vec<EdgeId> {
        self.edges.keys().copied().collect()
    }

    /// Returns all edges in insertion order.
    #[must_use]
    pub fn all_edges(&self) -> Vec<&Edge> {
        self.edges.values().collect()
    }

    /// Gets all edges leaving a node (`from == node_id`), whatever their direction flag.
    #[must_use]
    pub fn get_outgoing(&self, node_id: NodeId) -> Vec<&Edge> {
        self.outgoing
            .get(&node_id)
            .map(|ids| ids.iter().filter_map(|id| self.edges.get(id)).collect())
            .unwrap_or_default()
    }

    /// Gets all edges arriving at a node (`to == node_id`), whatever their direction flag.
    #[must_use]
    pub fn get_incoming(&self, node_id: NodeId) -> Vec<&Edge> {
        self.incoming
            .get(&node_id)
            .map(|ids| ids.iter().filter_map(|id| self.edges.get(id)).collect())
            .unwrap_or_default()
    }

    /// Returns the out-degree of a node.
    #[must_use]
    pub fn out_degree(&self, node_id: NodeId) -> usize {
        self.outgoing.get(&node_id).map_or(0, Vec::len)
    }

    /// Returns the in-degree of a node.
    #[must_use]
    pub fn in_degree(&self, node_id: NodeId) -> usize {
        self.incoming.get(&node_id).map_or(0, Vec::len)
    }

    /// Returns every edge between `a` and `b`, in either orientation.
    #[must_use]
    pub fn edges_between(&self, a: NodeId, b: NodeId) -> Vec<&Edge> {
        self.get_outgoing(a)
            .into_iter()
            .chain(self.get_incoming(a))
            .filter(|e| e.joins(a, b))
            .collect()
    }

    /// Returns the nodes reachable in one hop from `node_id`.
    ///
    /// Directed edges contribute only their forward direction; undirected
    /// edges contribute both.
    #[must_use]
    pub fn neighbors(&self, node_id: NodeId) -> Vec<NodeId> {
        let forward = self.get_outgoing(node_id).into_iter().map(Edge::to);
        let backward = self
            .get_incoming(node_id)
            .into_iter()
            .filter(|e| !e.is_directed())
            .map(|e| e.from());
        forward.chain(backward).collect()
    }

    /// Returns true if `b` is a neighbor of `a` (see [`Self::neighbors`]).
    #[must_use]
    pub fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.edges_between(a, b)
            .iter()
            .any(|e| !e.is_directed() || e.from() == a)
    }

    /// Removes an edge by ID. Returns false if it does not exist.
    pub fn remove_edge(&mut self, edge_id: EdgeId) -> bool {
        let removed = self.detach_edge(edge_id).is_some();
        if removed {
            debug!(edge = edge_id, "edge removed");
        }
        removed
    }

    /// Sets or clears an edge weight. Returns false if the edge does not exist.
    pub fn set_edge_weight(&mut self, id: EdgeId, weight: Option<f64>) -> bool {
        match self.edges.get_mut(&id) {
            Some(edge) => {
                edge.set_weight(weight);
                true
            }
            None => false,
        }
    }

    /// Changes an edge's direction flag in place.
    ///
    /// Turning an edge undirected first deletes every other edge between the
    /// same pair, collapsing an `A -> B` / `B -> A` pair into one undirected
    /// edge. Turning it directed only flips the flag.
    ///
    /// Returns false if the edge does not exist.
    pub fn set_edge_directed(&mut self, id: EdgeId, directed: bool) -> bool {
        let Some(edge) = self.edges.get(&id) else {
            return false;
        };

        if !directed {
            let siblings: Vec<EdgeId> = self
                .edges_between(edge.from(), edge.to())
                .iter()
                .map(|e| e.id())
                .filter(|&sibling| sibling != id)
                .collect();
            for sibling in &siblings {
                self.detach_edge(*sibling);
            }
            if !siblings.is_empty() {
                info!(edge = id, removed = ?siblings, "collapsed sibling edges into undirected edge");
            }
        }

        if let Some(edge) = self.edges.get_mut(&id) {
            edge.set_directed(directed);
        }
        true
    }

    /// Clears all nodes and edges and resets id counters.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.outgoing.clear();
        self.incoming.clear();
        self.next_node_id = 1;
        self.next_edge_id = 1;
    }

    // ── Restore (used by import) ───────────────────────────────────────

    /// Inserts a node with a caller-chosen id, keeping the id counter ahead.
    pub(crate) fn restore_node(&mut self, node: Node) -> Result<(), RestoreError> {
        let id = node.id();
        if id >= ID_LIMIT {
            return Err(RestoreError::IdOutOfRange(id));
        }
        if self.nodes.contains_key(&id) {
            return Err(RestoreError::DuplicateNode(id));
        }
        if self.is_full() {
            return Err(RestoreError::Structural(
                StructuralRejection::CapacityExceeded(self.max_nodes),
            ));
        }
        self.next_node_id = self.next_node_id.max(id + 1);
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Inserts an edge, assigning an id when `id` is `None` or already taken.
    pub(crate) fn restore_edge(
        &mut self,
        id: Option<EdgeId>,
        from: NodeId,
        to: NodeId,
        options: EdgeOptions,
    ) -> Result<EdgeId, RestoreError> {
        if let Some(id) = id.filter(|&id| id >= ID_LIMIT) {
            return Err(RestoreError::IdOutOfRange(id));
        }
        self.check_connection(from, to, options.directed)
            .map_err(RestoreError::Structural)?;

        let id = match id {
            Some(id) if !self.edges.contains_key(&id) => id,
            _ => self.next_edge_id,
        };
        self.next_edge_id = self.next_edge_id.max(id + 1);
        self.attach_edge(Edge::new(id, from, to, options));
        Ok(id)
    }

    /// Raises the node id counter to at least `next`.
    pub(crate) fn reserve_node_ids(&mut self, next: NodeId) -> Result<(), RestoreError> {
        if next > ID_LIMIT {
            return Err(RestoreError::IdOutOfRange(next));
        }
        self.next_node_id = self.next_node_id.max(next);
        Ok(())
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn check_connection(
        &self,
        from: NodeId,
        to: NodeId,
        directed: bool,
    ) -> Result<(), StructuralRejection> {
        if from == to {
            return Err(StructuralRejection::SelfLoop);
        }
        for endpoint in [from, to] {
            if !self.has_node(endpoint) {
                return Err(StructuralRejection::UnknownEndpoint(endpoint));
            }
        }
        let conflict = self.edges_between(from, to).iter().any(|existing| {
            !directed || !existing.is_directed() || existing.from() == from
        });
        if conflict {
            return Err(StructuralRejection::DuplicateConnection);
        }
        Ok(())
    }

    fn attach_edge(&mut self, edge: Edge) {
        let id = edge.id();
        self.outgoing.entry(edge.from()).or_default().push(id);
        self.incoming.entry(edge.to()).or_default().push(id);
        self.edges.insert(id, edge);
    }

    /// Removes an edge, cleaning up both adjacency indexes.
    fn detach_edge(&mut self, edge_id: EdgeId) -> Option<Edge> {
        let edge = self.edges.shift_remove(&edge_id)?;
        if let Some(ids) = self.outgoing.get_mut(&edge.from()) {
            ids.retain(|&id| id != edge_id);
        }
        if let Some(ids) = self.incoming.get_mut(&edge.to()) {
            ids.retain(|&id| id != edge_id);
        }
        Some(edge)
    }

    /// Removes all edges connected to a node (cascade delete).
    fn remove_node_edges(&mut self, node_id: NodeId) -> usize {
        let outgoing_ids = self.outgoing.remove(&node_id).unwrap_or_default();
        let incoming_ids = self.incoming.remove(&node_id).unwrap_or_default();

        let mut removed = 0;
        for edge_id in outgoing_ids {
            if let Some(edge) = self.edges.shift_remove(&edge_id) {
                if let Some(ids) = self.incoming.get_mut(&edge.to()) {
                    ids.retain(|&id| id != edge_id);
                }
                removed += 1;
            }
        }
        for edge_id in incoming_ids {
            if let Some(edge) = self.edges.shift_remove(&edge_id) {
                if let Some(ids) = self.outgoing.get_mut(&edge.from()) {
                    ids.retain(|&id| id != edge_id);
                }
                removed += 1;
            }
        }
        removed
    }
}

/// Why a node, edge or id counter could not be restored during import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RestoreError {
    DuplicateNode(NodeId),
    IdOutOfRange(u64),
    Structural(StructuralRejection),
}
