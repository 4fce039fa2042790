//! Plain format: `{ nodes: [{id,x,y}], edges: [[from,to]], nextNodeId? }`.
//!
//! Drops weights, direction and state. Every edge is an unordered pair.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{EdgeOptions, GraphStore, Node, NodeId};

use super::{stage_import, ImportReport, StagedEdge};

/// Node entry of the plain format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainNode {
    /// Node id.
    pub id: NodeId,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

/// The plain (legacy) graph document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainGraph {
    /// Nodes in store order.
    pub nodes: Vec<PlainNode>,
    /// Unordered pairs, smaller id first.
    pub edges: Vec<[NodeId; 2]>,
    /// Id the next created node should get.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_node_id: Option<NodeId>,
}

impl PlainGraph {
    /// Exports the store. Parallel edges on the same pair collapse into one.
    #[must_use]
    pub fn from_store(store: &GraphStore) -> Self {
        let nodes = store
            .all_nodes()
            .into_iter()
            .map(|n| PlainNode {
                id: n.id(),
                x: n.x(),
                y: n.y(),
            })
            .collect();

        let mut seen = HashSet::new();
        let edges = store
            .all_edges()
            .into_iter()
            .map(|e| [e.from().min(e.to()), e.from().max(e.to())])
            .filter(|pair| seen.insert(*pair))
            .collect();

        Self {
            nodes,
            edges,
            next_node_id: Some(store.next_node_id()),
        }
    }

    /// Replaces the store contents with this document.
    ///
    /// Edges are created undirected. On error the store is left untouched.
    pub fn apply_to(self, store: &mut GraphStore) -> Result<ImportReport> {
        let nodes = self.nodes.into_iter().map(|n| Node::new(n.id, n.x, n.y));
        let edges = self.edges.into_iter().map(|[from, to]| StagedEdge {
            id: None,
            from,
            to,
            options: EdgeOptions::undirected(),
        });
        stage_import(store, nodes, edges, self.next_node_id)
    }
}
