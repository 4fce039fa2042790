//! Session facade: one store, one controller, one stepper.
//!
//! [`GraphSession`] is the programmatic surface of the crate. It forwards
//! gestures to the [`InteractionController`], animation controls to the
//! [`AnimationStepper`] and refuses structural edits while a run is
//! animating, so the executor's view of the graph and the store never
//! diverge mid-run.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::animation::{AnimationPhase, AnimationStepper, StartOutcome, StepOutcome};
use crate::config::GraphstepConfig;
use crate::error::{Error, Result};
use crate::executor::{AlgorithmExecutor, HttpExecutor, RunParams};
use crate::graph::{Edge, EdgeId, EdgeOptions, GraphStore, Node, NodeId, SharedGraph};
use crate::interaction::{ClickOutcome, ContextMenu, EditOutcome, EditingTarget, InteractionController};
use crate::serialization::{self, GraphFormat, ImportReport, RunMetadata};

/// Everything a view needs to draw the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Nodes in store order.
    pub nodes: Vec<Node>,
    /// Edges in store order.
    pub edges: Vec<Edge>,
    /// Selected node.
    pub selected_node: Option<NodeId>,
    /// Element whose weight editor is open.
    pub editing_target: Option<EditingTarget>,
    /// Open context menu.
    pub context_menu: Option<ContextMenu>,
    /// Whether a run is open and not finished.
    pub is_animating: bool,
    /// Stepper phase.
    pub phase: AnimationPhase,
    /// Steps applied in the current run.
    pub step: u64,
    /// Node the executor last reported as current.
    pub current_node: Option<NodeId>,
}

/// An editable graph bound to a remote executor.
#[derive(Debug)]
pub struct GraphSession {
    graph: SharedGraph,
    controller: InteractionController,
    stepper: AnimationStepper,
    config: GraphstepConfig,
    last_source: Option<NodeId>,
}

impl GraphSession {
    /// Creates an empty session over the given executor.
    pub fn new(config: GraphstepConfig, executor: Arc<dyn AlgorithmExecutor>) -> Self {
        let graph: SharedGraph = Arc::new(Mutex::new(GraphStore::with_max_nodes(
            config.graph.max_nodes,
        )));
        let default_edge = EdgeOptions {
            weight: None,
            directed: config.graph.default_directed,
        };
        let stepper = AnimationStepper::new(graph.clone(), executor, &config.animation);
        Self {
            graph,
            controller: InteractionController::new(default_edge),
            stepper,
            config,
            last_source: None,
        }
    }

    /// Creates an empty session talking to the configured HTTP executor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration does not validate, or an
    /// error if the HTTP client cannot be built.
    pub fn with_http(config: GraphstepConfig) -> Result<Self> {
        config.validate()?;
        let executor = HttpExecutor::new(&config.executor)?;
        Ok(Self::new(config, Arc::new(executor)))
    }

    /// Shared handle to the store.
    #[must_use]
    pub fn graph(&self) -> SharedGraph {
        self.graph.clone()
    }

    /// The interaction controller.
    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// The animation stepper.
    #[must_use]
    pub fn stepper(&self) -> &AnimationStepper {
        &self.stepper
    }

    /// Configuration the session was built with.
    #[must_use]
    pub fn config(&self) -> &GraphstepConfig {
        &self.config
    }

    /// Returns true while edits are refused.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.stepper.is_animating()
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.is_locked() {
            debug!("Edit refused while animating");
            return Err(Error::AnimationRunning);
        }
        Ok(())
    }

    /// Runs `f` on the controller and the locked store, if editing is allowed.
    fn edit<T>(
        &mut self,
        f: impl FnOnce(&mut InteractionController, &mut GraphStore) -> T,
    ) -> Result<T> {
        self.ensure_editable()?;
        let mut store = self.graph.lock();
        Ok(f(&mut self.controller, &mut *store))
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Current view of the session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        // Stepper state first: the stepper may hold its own lock while taking the store's.
        let status = self.stepper.status();
        let store = self.graph.lock();
        SessionSnapshot {
            nodes: store.all_nodes().into_iter().cloned().collect(),
            edges: store.all_edges().into_iter().cloned().collect(),
            selected_node: self.controller.selected_node(),
            editing_target: self.controller.editing_target(),
            context_menu: self.controller.context_menu(),
            is_animating: status.is_animating(),
            phase: status.phase,
            step: status.step,
            current_node: status.current_node,
        }
    }

    /// Copy of a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.graph.lock().get_node(id).cloned()
    }

    /// Copy of an edge.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<Edge> {
        self.graph.lock().get_edge(id).cloned()
    }

    /// Neighbors of a node (directed edges forward only).
    #[must_use]
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.graph.lock().neighbors(id)
    }

    // ── Gestures ───────────────────────────────────────────────────────

    /// Adds a node at the pointer.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating, [`Error::Rejected`] at capacity.
    pub fn double_click_canvas(&mut self, x: f64, y: f64) -> Result<Node> {
        Ok(self.edit(|ctl, store| ctl.double_click_canvas(store, x, y))??)
    }

    /// Click on empty canvas. Always allowed.
    pub fn click_canvas(&mut self) {
        self.controller.click_canvas();
    }

    /// Selects, deselects or connects.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn click_node(&mut self, id: NodeId) -> Result<ClickOutcome> {
        self.edit(|ctl, store| ctl.click_node(store, id))
    }

    /// Like [`click_node`](Self::click_node) with explicit connect options.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn click_node_with(&mut self, id: NodeId, options: EdgeOptions) -> Result<ClickOutcome> {
        self.edit(|ctl, store| ctl.click_node_with(store, id, options))
    }

    /// Connects two nodes directly.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating, [`Error::Rejected`] if the
    /// store refuses the edge.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, options: EdgeOptions) -> Result<Edge> {
        Ok(self.edit(|_, store| store.add_edge(from, to, options))??)
    }

    /// Opens the weight editor on a node.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn begin_edit_node(&mut self, id: NodeId) -> Result<bool> {
        self.edit(|ctl, store| ctl.begin_edit_node(store, id))
    }

    /// Opens the weight editor on an edge.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn begin_edit_edge(&mut self, id: EdgeId) -> Result<bool> {
        self.edit(|ctl, store| ctl.begin_edit_edge(store, id))
    }

    /// Commits the weight editor.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn commit_edit(&mut self, input: &str) -> Result<EditOutcome> {
        self.edit(|ctl, store| ctl.commit_edit(store, input))
    }

    /// Closes the weight editor without writing. Always allowed.
    pub fn cancel_edit(&mut self) -> bool {
        self.controller.cancel_edit()
    }

    /// Starts dragging a node.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn pointer_down(&mut self, id: NodeId, px: f64, py: f64) -> Result<bool> {
        self.edit(|ctl, store| ctl.pointer_down(store, id, px, py))
    }

    /// Moves the dragged node.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn pointer_move(&mut self, px: f64, py: f64) -> Result<bool> {
        self.edit(|ctl, store| ctl.pointer_move(store, px, py))
    }

    /// Ends the drag. Always allowed.
    pub fn pointer_up(&mut self) -> bool {
        self.controller.pointer_up()
    }

    /// Opens the context menu on a node. Always allowed.
    pub fn open_node_menu(&mut self, id: NodeId, x: f64, y: f64) -> bool {
        let store = self.graph.lock();
        self.controller.open_node_menu(&store, id, x, y)
    }

    /// Opens the context menu on an edge. Always allowed.
    pub fn open_edge_menu(&mut self, id: EdgeId, x: f64, y: f64) -> bool {
        let store = self.graph.lock();
        self.controller.open_edge_menu(&store, id, x, y)
    }

    /// Closes the context menu. Always allowed.
    pub fn close_menu(&mut self) -> bool {
        self.controller.close_menu()
    }

    /// Menu action: delete node.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn menu_delete_node(&mut self) -> Result<bool> {
        self.edit(InteractionController::menu_delete_node)
    }

    /// Menu action: delete edge.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn menu_delete_edge(&mut self) -> Result<bool> {
        self.edit(InteractionController::menu_delete_edge)
    }

    /// Menu action: toggle edge direction.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn menu_toggle_directed(&mut self) -> Result<bool> {
        self.edit(InteractionController::menu_toggle_directed)
    }

    /// Deletes a node and its edges.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn delete_node(&mut self, id: NodeId) -> Result<bool> {
        self.edit(|ctl, store| ctl.delete_node(store, id))
    }

    /// Deletes an edge.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn delete_edge(&mut self, id: EdgeId) -> Result<bool> {
        self.edit(|ctl, store| ctl.delete_edge(store, id))
    }

    /// Flips an edge between directed and undirected.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn toggle_directed(&mut self, id: EdgeId) -> Result<bool> {
        self.edit(|ctl, store| ctl.toggle_directed(store, id))
    }

    /// Empties the graph.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating.
    pub fn clear(&mut self) -> Result<()> {
        self.edit(InteractionController::clear)?;
        self.last_source = None;
        Ok(())
    }

    // ── Serialization ──────────────────────────────────────────────────

    /// Exports the graph as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self, format: GraphFormat) -> Result<String> {
        let run = self.run_metadata();
        serialization::export_json_with_run(&self.graph.lock(), format, run)
    }

    /// Run status as written into extended documents.
    fn run_metadata(&self) -> RunMetadata {
        let status = self.stepper.status();
        RunMetadata {
            current_node: status.current_node,
            finished: status.phase == AnimationPhase::Finished,
            step: status.step,
        }
    }

    /// Replaces the graph with a JSON document of either format.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating, or the import error; the
    /// graph is unchanged on error.
    pub fn import_json(&mut self, json: &str) -> Result<ImportReport> {
        let report = self.edit(|_, store| serialization::import_any(store, json))??;
        self.after_import();
        Ok(report)
    }

    /// Saves the graph to `path`, or to the configured file name.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save(&self, path: Option<&Path>, format: GraphFormat) -> Result<()> {
        let path = path.unwrap_or_else(|| Path::new(&self.config.storage.file_name));
        let run = self.run_metadata();
        serialization::save_to_file_with_run(&self.graph.lock(), path, format, run)
    }

    /// Loads the graph from `path`, or from the configured file name.
    ///
    /// # Errors
    ///
    /// [`Error::AnimationRunning`] while animating, or the load error; the
    /// graph is unchanged on error.
    pub fn load(&mut self, path: Option<&Path>) -> Result<ImportReport> {
        let default_path = self.config.storage.file_name.clone();
        let path = path.unwrap_or_else(|| Path::new(&default_path));
        let report = self.edit(|_, store| serialization::load_from_file(store, path))??;
        self.after_import();
        Ok(report)
    }

    fn after_import(&mut self) {
        self.controller.reset();
        self.last_source = None;
    }

    // ── Animation ──────────────────────────────────────────────────────

    /// Resolves the run parameters for `algorithm`.
    ///
    /// The source is the selected node, else the previous run's source, else
    /// the first node.
    fn run_params(&mut self, algorithm: &str) -> Result<RunParams> {
        let source = {
            let store = self.graph.lock();
            self.controller
                .selected_node()
                .or(self.last_source)
                .filter(|&id| store.has_node(id))
                .or_else(|| store.all_node_ids().first().copied())
        };
        let Some(source) = source else {
            return Err(Error::InvalidRun("graph is empty".to_string()));
        };

        // The selection highlight would otherwise linger under the executor's states.
        self.controller.clear_selection(&mut *self.graph.lock());
        self.last_source = Some(source);
        Ok(RunParams::new(algorithm, source))
    }

    /// Starts `algorithm` with automatic stepping, or stops the current run.
    ///
    /// # Errors
    ///
    /// Returns the error that prevented the run from starting.
    pub async fn play(&mut self, algorithm: &str) -> Result<StartOutcome> {
        if self.stepper.stop() {
            return Ok(StartOutcome::Stopped);
        }
        let params = self.run_params(algorithm)?;
        self.play_with(params).await
    }

    /// Starts a run with explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns the error that prevented the run from starting.
    pub async fn play_with(&mut self, params: RunParams) -> Result<StartOutcome> {
        info!(algorithm = %params.algorithm, source = params.source, "Play");
        self.last_source = Some(params.source);
        self.stepper.start(params).await
    }

    /// Stops the run. Returns false if nothing was running.
    pub fn stop(&self) -> bool {
        self.stepper.stop()
    }

    /// Performs one step, opening a manual run if none is active.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the run.
    pub async fn next_step(&mut self, algorithm: &str) -> Result<StepOutcome> {
        if self.stepper.is_animating() {
            return self.stepper.step().await;
        }
        let params = self.run_params(algorithm)?;
        self.stepper.next_step(params).await
    }

    /// Resets every node state and starts `algorithm` again.
    ///
    /// # Errors
    ///
    /// Returns the error that prevented the run from starting.
    pub async fn restart(&mut self, algorithm: &str) -> Result<StartOutcome> {
        self.stepper.stop();
        let params = self.run_params(algorithm)?;
        self.stepper.restart(params).await
    }
}
