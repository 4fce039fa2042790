//! Gesture-to-mutation dispatcher.

use tracing::{debug, info};

use super::state::{
    parse_weight, ClickOutcome, ContextMenu, DragState, EditOutcome, EditingTarget, MenuTarget,
};
use crate::graph::{EdgeId, EdgeOptions, GraphStore, Node, NodeId, NodeState, StructuralRejection};

/// Turns pointer and keyboard gestures into [`GraphStore`] edits.
///
/// The controller owns only transient state (selection, open editor, open
/// menu, drag). The store is borrowed per call.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    selection: Option<NodeId>,
    /// State the selected node had before it was highlighted.
    prior_state: NodeState,
    editing: Option<EditingTarget>,
    menu: Option<ContextMenu>,
    drag: Option<DragState>,
    default_edge: EdgeOptions,
}

impl InteractionController {
    /// Creates a controller whose click-to-connect gesture uses `default_edge`.
    #[must_use]
    pub fn new(default_edge: EdgeOptions) -> Self {
        Self {
            default_edge,
            ..Self::default()
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    /// Currently selected node.
    #[must_use]
    pub fn selected_node(&self) -> Option<NodeId> {
        self.selection
    }

    /// Element whose weight is being edited.
    #[must_use]
    pub fn editing_target(&self) -> Option<EditingTarget> {
        self.editing
    }

    /// Open context menu.
    #[must_use]
    pub fn context_menu(&self) -> Option<ContextMenu> {
        self.menu
    }

    /// Drag in progress.
    #[must_use]
    pub fn drag_state(&self) -> Option<DragState> {
        self.drag
    }

    /// Options used by [`click_node`](Self::click_node) when connecting.
    #[must_use]
    pub fn default_edge_options(&self) -> EdgeOptions {
        self.default_edge
    }

    /// Changes the options used when connecting by click.
    pub fn set_default_edge_options(&mut self, options: EdgeOptions) {
        self.default_edge = options;
    }

    // ── Creation and selection ─────────────────────────────────────────

    /// Adds a node at the pointer and closes any open menu.
    pub fn double_click_canvas(
        &mut self,
        store: &mut GraphStore,
        x: f64,
        y: f64,
    ) -> Result<Node, StructuralRejection> {
        self.menu = None;
        let node = store.add_node(x, y)?;
        debug!(id = node.id(), x, y, "Node created");
        Ok(node)
    }

    /// Single click on empty canvas: closes the menu.
    pub fn click_canvas(&mut self) {
        self.close_menu();
    }

    /// Selects, deselects or connects, using the default edge options.
    pub fn click_node(&mut self, store: &mut GraphStore, node_id: NodeId) -> ClickOutcome {
        self.click_node_with(store, node_id, self.default_edge)
    }

    /// Like [`click_node`](Self::click_node) with explicit connect options.
    ///
    /// With nothing selected the node becomes selected. Clicking the selected
    /// node deselects it. Clicking another node tries to connect the two and
    /// clears the selection whatever the result.
    pub fn click_node_with(
        &mut self,
        store: &mut GraphStore,
        node_id: NodeId,
        options: EdgeOptions,
    ) -> ClickOutcome {
        self.menu = None;
        if !store.has_node(node_id) {
            return ClickOutcome::UnknownNode(node_id);
        }

        let selected = self.selection.filter(|&id| store.has_node(id));
        match selected {
            None => {
                self.selection = Some(node_id);
                self.prior_state = store
                    .get_node(node_id)
                    .map_or(NodeState::Default, Node::state);
                store.set_node_state(node_id, NodeState::Selected);
                ClickOutcome::Selected(node_id)
            }
            Some(selected) if selected == node_id => {
                self.clear_selection(store);
                ClickOutcome::Deselected(node_id)
            }
            Some(selected) => {
                self.clear_selection(store);
                match store.add_edge(selected, node_id, options) {
                    Ok(edge) => {
                        debug!(id = edge.id(), from = selected, to = node_id, "Nodes connected");
                        ClickOutcome::Connected(edge)
                    }
                    Err(rejection) => {
                        debug!(from = selected, to = node_id, %rejection, "Connection refused");
                        ClickOutcome::ConnectRejected(rejection)
                    }
                }
            }
        }
    }

    /// Drops the selection and gives the node back the state it had before.
    ///
    /// A node whose highlight was already overwritten keeps its new state.
    pub fn clear_selection(&mut self, store: &mut GraphStore) {
        let Some(id) = self.selection.take() else {
            return;
        };
        let prior = std::mem::take(&mut self.prior_state);
        if store.get_node(id).is_some_and(|n| n.state() == NodeState::Selected) {
            store.set_node_state(id, prior);
        }
    }

    // ── Weight editing ─────────────────────────────────────────────────

    /// Opens the weight editor on a node. Returns false if it does not exist.
    pub fn begin_edit_node(&mut self, store: &GraphStore, node_id: NodeId) -> bool {
        if !store.has_node(node_id) {
            return false;
        }
        self.menu = None;
        self.editing = Some(EditingTarget::Node(node_id));
        true
    }

    /// Opens the weight editor on an edge. Returns false if it does not exist.
    pub fn begin_edit_edge(&mut self, store: &GraphStore, edge_id: EdgeId) -> bool {
        if !store.has_edge(edge_id) {
            return false;
        }
        self.menu = None;
        self.editing = Some(EditingTarget::Edge(edge_id));
        true
    }

    /// Parses `input` and writes it as the edited element's weight.
    ///
    /// Editing ends in every case.
    pub fn commit_edit(&mut self, store: &mut GraphStore, input: &str) -> EditOutcome {
        let Some(target) = self.editing.take() else {
            return EditOutcome::NotEditing;
        };
        let Some(weight) = parse_weight(input) else {
            debug!(input, "Rejected weight input");
            return EditOutcome::InvalidInput(input.to_string());
        };

        let applied = match target {
            EditingTarget::Node(id) => store.set_node_weight(id, weight),
            EditingTarget::Edge(id) => store.set_edge_weight(id, weight),
        };
        if applied {
            EditOutcome::Applied { target, weight }
        } else {
            EditOutcome::TargetMissing(target)
        }
    }

    /// Closes the editor without writing anything (Escape).
    pub fn cancel_edit(&mut self) -> bool {
        self.editing.take().is_some()
    }

    // ── Dragging ───────────────────────────────────────────────────────

    /// Starts dragging `node_id`. Refused while that node's weight is being edited.
    pub fn pointer_down(&mut self, store: &GraphStore, node_id: NodeId, px: f64, py: f64) -> bool {
        if self.editing == Some(EditingTarget::Node(node_id)) {
            return false;
        }
        let Some(node) = store.get_node(node_id) else {
            return false;
        };
        self.drag = Some(DragState {
            node: node_id,
            offset_x: px - node.x(),
            offset_y: py - node.y(),
        });
        true
    }

    /// Moves the dragged node so it keeps its offset to the pointer.
    pub fn pointer_move(&mut self, store: &mut GraphStore, px: f64, py: f64) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let moved = store.update_node_position(drag.node, px - drag.offset_x, py - drag.offset_y);
        if !moved {
            self.drag = None;
        }
        moved
    }

    /// Ends the drag.
    pub fn pointer_up(&mut self) -> bool {
        self.drag.take().is_some()
    }

    // ── Context menu ───────────────────────────────────────────────────

    /// Opens the menu on a node.
    pub fn open_node_menu(&mut self, store: &GraphStore, node_id: NodeId, x: f64, y: f64) -> bool {
        self.open_menu(store.has_node(node_id), MenuTarget::Node(node_id), x, y)
    }

    /// Opens the menu on an edge.
    pub fn open_edge_menu(&mut self, store: &GraphStore, edge_id: EdgeId, x: f64, y: f64) -> bool {
        self.open_menu(store.has_edge(edge_id), MenuTarget::Edge(edge_id), x, y)
    }

    fn open_menu(&mut self, exists: bool, target: MenuTarget, x: f64, y: f64) -> bool {
        if exists {
            self.menu = Some(ContextMenu { target, x, y });
        }
        exists
    }

    /// Closes the menu without acting.
    pub fn close_menu(&mut self) -> bool {
        self.menu.take().is_some()
    }

    /// Menu action: delete the node the menu was opened on.
    pub fn menu_delete_node(&mut self, store: &mut GraphStore) -> bool {
        match self.menu {
            Some(ContextMenu {
                target: MenuTarget::Node(id),
                ..
            }) => {
                self.menu = None;
                self.delete_node(store, id)
            }
            _ => false,
        }
    }

    /// Menu action: delete the edge the menu was opened on.
    pub fn menu_delete_edge(&mut self, store: &mut GraphStore) -> bool {
        match self.menu {
            Some(ContextMenu {
                target: MenuTarget::Edge(id),
                ..
            }) => {
                self.menu = None;
                self.delete_edge(store, id)
            }
            _ => false,
        }
    }

    /// Menu action: flip the direction of the edge the menu was opened on.
    pub fn menu_toggle_directed(&mut self, store: &mut GraphStore) -> bool {
        match self.menu {
            Some(ContextMenu {
                target: MenuTarget::Edge(id),
                ..
            }) => {
                self.menu = None;
                self.toggle_directed(store, id)
            }
            _ => false,
        }
    }

    // ── Direct edits ───────────────────────────────────────────────────

    /// Removes a node and forgets any transient state that referenced it.
    pub fn delete_node(&mut self, store: &mut GraphStore, node_id: NodeId) -> bool {
        let removed = store.remove_node(node_id);
        if removed {
            self.forget_missing(store);
        }
        removed
    }

    /// Removes an edge and closes an editor open on it.
    pub fn delete_edge(&mut self, store: &mut GraphStore, edge_id: EdgeId) -> bool {
        let removed = store.remove_edge(edge_id);
        if removed {
            self.forget_missing(store);
        }
        removed
    }

    /// Flips an edge between directed and undirected.
    pub fn toggle_directed(&mut self, store: &mut GraphStore, edge_id: EdgeId) -> bool {
        let Some(directed) = store.get_edge(edge_id).map(|e| e.is_directed()) else {
            return false;
        };
        let changed = store.set_edge_directed(edge_id, !directed);
        // Going undirected may have removed a sibling edge.
        self.forget_missing(store);
        changed
    }

    /// Empties the store and all transient state.
    pub fn clear(&mut self, store: &mut GraphStore) {
        store.clear();
        self.reset();
        info!("Graph cleared");
    }

    /// Drops all transient state without touching the store.
    pub fn reset(&mut self) {
        self.selection = None;
        self.prior_state = NodeState::Default;
        self.editing = None;
        self.menu = None;
        self.drag = None;
    }

    /// Drops selection, editor, menu or drag that point at missing elements.
    pub fn forget_missing(&mut self, store: &GraphStore) {
        if self.selection.is_some_and(|id| !store.has_node(id)) {
            self.selection = None;
        }
        let editing_missing = match self.editing {
            Some(EditingTarget::Node(id)) => !store.has_node(id),
            Some(EditingTarget::Edge(id)) => !store.has_edge(id),
            None => false,
        };
        if editing_missing {
            self.editing = None;
        }
        let menu_missing = match self.menu {
            Some(ContextMenu {
                target: MenuTarget::Node(id),
                ..
            }) => !store.has_node(id),
            Some(ContextMenu {
                target: MenuTarget::Edge(id),
                ..
            }) => !store.has_edge(id),
            None => false,
        };
        if menu_missing {
            self.menu = None;
        }
        if self.drag.is_some_and(|d| !store.has_node(d.node)) {
            self.drag = None;
        }
    }
}
