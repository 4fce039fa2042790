//! Animation stepper state machine.

use std::fmt;
use std::ops::ControlFlow;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::schedule::ScheduledTask;
use crate::config::{AnimationConfig, PlaybackMode};
use crate::error::{Error, Result};
use crate::executor::{AlgorithmExecutor, RunParams, RunRequest, StateNode};
use crate::graph::{NodeId, SharedGraph};

/// Where the stepper is in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationPhase {
    /// No run, or the run was stopped.
    #[default]
    Idle,
    /// A run is open and waiting for its next step.
    Running,
    /// A request to the executor is outstanding.
    Stepping,
    /// The executor reported the run as finished.
    Finished,
}

impl AnimationPhase {
    /// Returns true while a run is open and not finished.
    #[must_use]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Running | Self::Stepping)
    }
}

impl fmt::Display for AnimationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stepping => "stepping",
            Self::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Node states were applied to the store.
    Applied {
        /// Step counter after this step.
        step: u64,
        /// Whether the run is now finished.
        finished: bool,
    },
    /// The response belonged to a run that was stopped or restarted.
    Discarded,
    /// There is no open run to step.
    Inactive,
}

/// Result of [`AnimationStepper::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A run was opened and its first step performed.
    Started(StepOutcome),
    /// The stepper was animating, so `start` stopped it instead.
    Stopped,
}

/// Point-in-time view of the stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepperStatus {
    /// Current phase.
    pub phase: AnimationPhase,
    /// Steps applied in the current run.
    pub step: u64,
    /// Node the executor last reported as current.
    pub current_node: Option<NodeId>,
    /// Whether automatic stepping is scheduled.
    pub scheduled: bool,
}

impl StepperStatus {
    /// Returns true while a run is open and not finished.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.phase.is_animating()
    }
}

#[derive(Default)]
struct RunState {
    phase: AnimationPhase,
    step: u64,
    current_node: Option<NodeId>,
    /// Bumped whenever a run is opened or stopped; stale responses compare unequal.
    generation: u64,
    schedule: Option<ScheduledTask>,
    last_error: Option<String>,
}

impl RunState {
    fn cancel_schedule(&mut self) {
        if let Some(task) = self.schedule.take() {
            task.cancel();
        }
    }
}

struct StateUpdate {
    nodes: Vec<StateNode>,
    current_node: Option<NodeId>,
    finished: bool,
    remote_step: Option<u64>,
}

struct StepperInner {
    graph: SharedGraph,
    executor: Arc<dyn AlgorithmExecutor>,
    step_interval: Duration,
    playback: PlaybackMode,
    // Lock order: `state` may be held while taking `graph`, never the reverse.
    state: Mutex<RunState>,
    in_flight: tokio::sync::Mutex<()>,
}

/// Drives a remote run and mirrors its node states into the store.
///
/// Cloning is cheap; clones share the same run.
#[derive(Clone)]
pub struct AnimationStepper {
    inner: Arc<StepperInner>,
}

impl fmt::Debug for AnimationStepper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationStepper")
            .field("executor", &self.inner.executor.executor_type())
            .field("step_interval", &self.inner.step_interval)
            .field("playback", &self.inner.playback)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl AnimationStepper {
    /// Creates an idle stepper over `graph`.
    pub fn new(
        graph: SharedGraph,
        executor: Arc<dyn AlgorithmExecutor>,
        config: &AnimationConfig,
    ) -> Self {
        Self {
            inner: Arc::new(StepperInner {
                graph,
                executor,
                step_interval: config.step_interval(),
                playback: config.playback,
                state: Mutex::new(RunState::default()),
                in_flight: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> StepperStatus {
        let state = self.inner.state.lock();
        StepperStatus {
            phase: state.phase,
            step: state.step,
            current_node: state.current_node,
            scheduled: state.schedule.as_ref().is_some_and(ScheduledTask::is_active),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> AnimationPhase {
        self.inner.state.lock().phase
    }

    /// Returns true while a run is open and not finished.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.phase().is_animating()
    }

    /// Steps applied in the current run.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.inner.state.lock().step
    }

    /// Takes the error that ended the last scheduled run, if any.
    pub fn take_last_error(&self) -> Option<String> {
        self.inner.state.lock().last_error.take()
    }

    /// Starts a run and schedules automatic steps, or stops the current one.
    ///
    /// # Errors
    ///
    /// Returns an error if the run parameters are invalid or the executor
    /// refuses the run or the first step. The stepper is idle afterwards.
    pub async fn start(&self, params: RunParams) -> Result<StartOutcome> {
        if self.stop() {
            return Ok(StartOutcome::Stopped);
        }

        let Some(generation) = self.open_run(&params).await? else {
            return Ok(StartOutcome::Started(StepOutcome::Discarded));
        };
        let outcome = self.step().await?;

        if let StepOutcome::Applied { finished: false, .. } = outcome {
            let mut state = self.inner.state.lock();
            if state.generation == generation && state.phase == AnimationPhase::Running {
                state.schedule = Some(self.schedule());
                debug!(interval = ?self.inner.step_interval, "Automatic stepping scheduled");
            }
        }
        Ok(StartOutcome::Started(outcome))
    }

    /// Requests the next state and applies it to the store.
    ///
    /// Steps never overlap; a caller arriving while another step is in
    /// flight waits for it.
    ///
    /// # Errors
    ///
    /// Returns the transport error that ended the run; the stepper is idle
    /// afterwards and the store keeps its last applied state.
    pub async fn step(&self) -> Result<StepOutcome> {
        let _in_flight = self.inner.in_flight.lock().await;

        let generation = {
            let mut state = self.inner.state.lock();
            if state.phase != AnimationPhase::Running {
                return Ok(StepOutcome::Inactive);
            }
            state.phase = AnimationPhase::Stepping;
            state.generation
        };

        let result = self.fetch().await;

        let mut state = self.inner.state.lock();
        if state.generation != generation {
            debug!(generation, "Discarding stale step response");
            return Ok(StepOutcome::Discarded);
        }

        let update = match result {
            Ok(update) => update,
            Err(err) => {
                warn!(error = %err, "Step failed, stopping animation");
                state.generation += 1;
                state.phase = AnimationPhase::Idle;
                state.cancel_schedule();
                return Err(err);
            }
        };

        {
            let mut graph = self.inner.graph.lock();
            for node in &update.nodes {
                graph.set_node_state(node.id, node.state);
            }
        }

        state.step = match update.remote_step {
            Some(remote) if remote > state.step => remote,
            _ => state.step + 1,
        };
        state.current_node = update.current_node;

        if update.finished {
            info!(step = state.step, "Run finished");
            state.phase = AnimationPhase::Finished;
            state.cancel_schedule();
        } else {
            state.phase = AnimationPhase::Running;
        }

        Ok(StepOutcome::Applied {
            step: state.step,
            finished: update.finished,
        })
    }

    /// Cancels automatic stepping and returns to idle. Node states are kept.
    ///
    /// Returns false if nothing was running.
    pub fn stop(&self) -> bool {
        let mut state = self.inner.state.lock();
        if !state.phase.is_animating() {
            return false;
        }
        state.generation += 1;
        state.phase = AnimationPhase::Idle;
        state.cancel_schedule();
        info!(step = state.step, "Animation stopped");
        true
    }

    /// Stops, resets the counter and every node state, then starts again.
    ///
    /// # Errors
    ///
    /// Same as [`start`](Self::start).
    pub async fn restart(&self, params: RunParams) -> Result<StartOutcome> {
        self.stop();
        {
            let mut state = self.inner.state.lock();
            state.step = 0;
            state.current_node = None;
            state.phase = AnimationPhase::Idle;
        }
        self.inner.graph.lock().reset_node_states();
        self.start(params).await
    }

    /// Performs exactly one step.
    ///
    /// From idle or finished this opens a new manual run first (counter back
    /// to zero, nothing scheduled).
    ///
    /// # Errors
    ///
    /// Same as [`start`](Self::start).
    pub async fn next_step(&self, params: RunParams) -> Result<StepOutcome> {
        if !self.is_animating() && self.open_run(&params).await?.is_none() {
            return Ok(StepOutcome::Discarded);
        }
        self.step().await
    }

    /// Uploads the graph and moves to `Running`.
    ///
    /// Returns the run generation, or `None` if the run was stopped while
    /// the executor was still answering.
    async fn open_run(&self, params: &RunParams) -> Result<Option<u64>> {
        let request = {
            let graph = self.inner.graph.lock();
            if !graph.has_node(params.source) {
                return Err(Error::InvalidRun(format!(
                    "source node {} does not exist",
                    params.source
                )));
            }
            if let Some(target) = params.target.filter(|&t| !graph.has_node(t)) {
                return Err(Error::InvalidRun(format!(
                    "target node {target} does not exist"
                )));
            }
            RunRequest::from_store(&graph, params)
        };

        let generation = {
            let mut state = self.inner.state.lock();
            state.cancel_schedule();
            state.generation += 1;
            state.phase = AnimationPhase::Stepping;
            state.step = 0;
            state.current_node = None;
            state.last_error = None;
            state.generation
        };

        info!(
            algorithm = %params.algorithm,
            source = params.source,
            executor = self.inner.executor.executor_type(),
            "Opening run"
        );
        let result = self.inner.executor.start_run(&request).await;

        let mut state = self.inner.state.lock();
        if state.generation != generation {
            debug!("Run was stopped while starting");
            return Ok(None);
        }
        match result {
            Ok(()) => {
                state.phase = AnimationPhase::Running;
                Ok(Some(generation))
            }
            Err(err) => {
                warn!(error = %err, "Executor refused the run");
                state.generation += 1;
                state.phase = AnimationPhase::Idle;
                Err(err)
            }
        }
    }

    async fn fetch(&self) -> Result<StateUpdate> {
        match self.inner.playback {
            PlaybackMode::Step => {
                let resp = self.inner.executor.next_step().await?;
                Ok(StateUpdate {
                    nodes: resp.graph.nodes,
                    current_node: resp.current_node,
                    finished: resp.finished,
                    remote_step: Some(resp.step),
                })
            }
            PlaybackMode::Poll => {
                let resp = self.inner.executor.poll_state().await?;
                Ok(StateUpdate {
                    nodes: resp.graph.nodes,
                    current_node: None,
                    finished: resp.finished,
                    remote_step: None,
                })
            }
        }
    }

    fn schedule(&self) -> ScheduledTask {
        let weak: Weak<StepperInner> = Arc::downgrade(&self.inner);
        ScheduledTask::every(self.inner.step_interval, move || {
            let weak = weak.clone();
            async move {
                let Some(inner) = weak.upgrade() else {
                    return ControlFlow::Break(());
                };
                let stepper = AnimationStepper { inner };
                match stepper.step().await {
                    Ok(StepOutcome::Applied {
                        finished: false, ..
                    }) => ControlFlow::Continue(()),
                    Ok(_) => ControlFlow::Break(()),
                    Err(err) => {
                        stepper.inner.state.lock().last_error = Some(err.to_string());
                        ControlFlow::Break(())
                    }
                }
            }
        })
    }
}
