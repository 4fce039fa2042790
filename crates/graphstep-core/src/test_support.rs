//! Shared fixtures for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::executor::{
    AlgorithmExecutor, GraphPayload, PollResponse, RunRequest, StateNode, StepResponse,
};
use crate::graph::{GraphStore, NodeId, NodeState, SharedGraph};

/// Executor that replays a fixed list of responses.
#[derive(Default)]
pub(crate) struct ScriptedExecutor {
    script: Mutex<VecDeque<Result<StepResponse>>>,
    reject_start: Mutex<Option<u16>>,
    delay: Duration,
    requests: Mutex<Vec<RunRequest>>,
    step_calls: AtomicUsize,
}

impl ScriptedExecutor {
    pub(crate) fn new(responses: Vec<StepResponse>) -> Self {
        Self {
            script: Mutex::new(responses.into_iter().map(Ok).collect()),
            ..Self::default()
        }
    }

    /// Every step or poll takes `delay` of (tokio) time.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// `start_run` answers with `status`.
    pub(crate) fn rejecting_start(self, status: u16) -> Self {
        *self.reject_start.lock() = Some(status);
        self
    }

    /// Appends a transport failure to the script.
    pub(crate) fn then_fail(self, message: &str) -> Self {
        self.script
            .lock()
            .push_back(Err(Error::Transport(message.to_string())));
        self
    }

    /// Appends more responses (a second run).
    pub(crate) fn push_responses(&self, responses: Vec<StepResponse>) {
        self.script.lock().extend(responses.into_iter().map(Ok));
    }

    pub(crate) fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(crate) fn requests(&self) -> Vec<RunRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn step_calls(&self) -> usize {
        self.step_calls.load(Ordering::SeqCst)
    }

    async fn next_response(&self) -> Result<StepResponse> {
        self.step_calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("script exhausted".to_string())))
    }
}

#[async_trait]
impl AlgorithmExecutor for ScriptedExecutor {
    fn executor_type(&self) -> &'static str {
        "scripted"
    }

    async fn start_run(&self, request: &RunRequest) -> Result<()> {
        self.requests.lock().push(request.clone());
        match *self.reject_start.lock() {
            Some(status) => Err(Error::ExecutorRejected {
                status,
                body: "rejected".to_string(),
            }),
            None => Ok(()),
        }
    }

    async fn next_step(&self) -> Result<StepResponse> {
        self.next_response().await
    }

    async fn poll_state(&self) -> Result<PollResponse> {
        let step = self.next_response().await?;
        Ok(PollResponse {
            graph: step.graph,
            finished: step.finished,
        })
    }
}

/// Responses of a traversal that visits `order` one node per step.
///
/// At step `k` the k-th node is `visiting`, earlier ones `visited` and the
/// rest `unvisited`. The last step is finished.
pub(crate) fn visit_sequence(order: &[NodeId]) -> Vec<StepResponse> {
    (0..order.len())
        .map(|k| {
            let nodes = order
                .iter()
                .enumerate()
                .map(|(i, &id)| StateNode {
                    id,
                    state: match i.cmp(&k) {
                        std::cmp::Ordering::Less => NodeState::Visited,
                        std::cmp::Ordering::Equal => NodeState::Visiting,
                        std::cmp::Ordering::Greater => NodeState::Unvisited,
                    },
                })
                .collect();
            StepResponse {
                graph: GraphPayload {
                    nodes,
                    edges: Vec::new(),
                },
                current_node: Some(order[k]),
                finished: k + 1 == order.len(),
                step: k as u64 + 1,
            }
        })
        .collect()
}

/// Shared store with `n` nodes on a line and `i - (i+1)` undirected edges.
pub(crate) fn line_graph(n: usize) -> SharedGraph {
    let mut store = GraphStore::new();
    for i in 0..n {
        store.add_node(i as f64 * 50.0, 0.0).unwrap();
    }
    for id in 1..n as NodeId {
        store
            .add_edge(id, id + 1, crate::graph::EdgeOptions::undirected())
            .unwrap();
    }
    Arc::new(Mutex::new(store))
}
