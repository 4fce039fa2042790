//! Transient UI state held by the interaction controller.

use serde::Serialize;

use crate::graph::{Edge, EdgeId, NodeId, StructuralRejection};

/// What the weight editor is open on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum EditingTarget {
    /// A node weight.
    Node(NodeId),
    /// An edge weight.
    Edge(EdgeId),
}

/// What a context menu was opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum MenuTarget {
    /// A node.
    Node(NodeId),
    /// An edge.
    Edge(EdgeId),
}

/// An open context menu and where it was opened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContextMenu {
    /// Element the menu acts on.
    pub target: MenuTarget,
    /// Pointer x in canvas space.
    pub x: f64,
    /// Pointer y in canvas space.
    pub y: f64,
}

/// A node being dragged, with the pointer offset captured on press.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragState {
    /// Node under the pointer.
    pub node: NodeId,
    /// `pointer.x - node.x` at press time.
    pub offset_x: f64,
    /// `pointer.y - node.y` at press time.
    pub offset_y: f64,
}

/// Result of clicking a node.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Nothing was selected; the node is now selected.
    Selected(NodeId),
    /// The selected node was clicked again and is no longer selected.
    Deselected(NodeId),
    /// An edge from the selected node to the clicked one was created.
    Connected(Edge),
    /// The edge was refused; the selection is cleared anyway.
    ConnectRejected(StructuralRejection),
    /// The clicked node does not exist.
    UnknownNode(NodeId),
}

/// Result of committing the weight editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The weight was written.
    Applied {
        /// Element that was edited.
        target: EditingTarget,
        /// New weight; `None` clears it.
        weight: Option<f64>,
    },
    /// The input was not a number. Editing ended without a change.
    InvalidInput(String),
    /// The element disappeared while being edited.
    TargetMissing(EditingTarget),
    /// The editor was not open.
    NotEditing,
}

/// Parses weight input: blank clears the weight, otherwise a finite number.
pub(crate) fn parse_weight(input: &str) -> Option<Option<f64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Some)
}
