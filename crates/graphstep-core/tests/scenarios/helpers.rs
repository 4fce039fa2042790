//! Shared helpers: a scripted mock executor and session builders.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use graphstep_core::{EdgeOptions, GraphSession, GraphstepConfig, NodeId};

/// Interval used by scenario runs so the suite stays fast.
pub const FAST_INTERVAL_MS: u64 = 25;

/// Replies to successive requests with successive bodies, repeating the last.
pub struct StepSequence {
    bodies: Vec<Value>,
    calls: AtomicUsize,
}

impl StepSequence {
    pub fn new(bodies: Vec<Value>) -> Self {
        Self {
            bodies,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Respond for StepSequence {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let body = self
            .bodies
            .get(index)
            .or_else(|| self.bodies.last())
            .cloned()
            .unwrap_or_else(|| json!({}));
        ResponseTemplate::new(200).set_body_json(body)
    }
}

/// Step bodies of a traversal visiting `order` one node per step.
///
/// At step `i` the nodes before `order[i]` are visited, `order[i]` is
/// visiting and the rest are unvisited. The last step reports `finished`.
pub fn visit_bodies(order: &[NodeId]) -> Vec<Value> {
    (0..order.len())
        .map(|i| {
            let nodes: Vec<Value> = order
                .iter()
                .enumerate()
                .map(|(j, id)| {
                    let state = match j.cmp(&i) {
                        std::cmp::Ordering::Less => "visited",
                        std::cmp::Ordering::Equal => "visiting",
                        std::cmp::Ordering::Greater => "unvisited",
                    };
                    json!({ "id": id, "state": state })
                })
                .collect();
            json!({
                "graph": { "nodes": nodes, "edges": [] },
                "current_node": order[i],
                "finished": i + 1 == order.len(),
                "step": i + 1,
            })
        })
        .collect()
}

/// Mounts `POST /api/grafo` (accepting) and `POST /api/step` (scripted).
pub async fn mount_executor(server: &MockServer, bodies: Vec<Value>) {
    Mock::given(method("POST"))
        .and(path("/api/grafo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/step"))
        .respond_with(StepSequence::new(bodies))
        .mount(server)
        .await;
}

/// Default configuration pointed at `server`, with a short step interval.
pub fn config_for(server: &MockServer) -> GraphstepConfig {
    let mut config = GraphstepConfig::default();
    config.executor.base_url = server.uri();
    config.executor.request_timeout_ms = 2_000;
    config.animation.step_interval_ms = FAST_INTERVAL_MS;
    config
}

/// Session over an unreachable executor, for scenarios that never run.
pub fn offline_session() -> GraphSession {
    let mut config = GraphstepConfig::default();
    config.executor.base_url = "http://127.0.0.1:9".to_string();
    GraphSession::with_http(config).expect("http client")
}

/// Adds `n` nodes on a row and chains them with undirected edges.
pub fn build_chain(session: &mut GraphSession, n: u32) {
    for i in 0..n {
        session
            .double_click_canvas(f64::from(i) * 100.0, 50.0)
            .expect("add node");
    }
    for id in 1..u64::from(n) {
        session
            .add_edge(id, id + 1, EdgeOptions::undirected())
            .expect("add edge");
    }
}

/// Waits (real time) until the session stops animating or `max_ms` passes.
pub async fn wait_until_idle(session: &GraphSession, max_ms: u64) {
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_millis(max_ms);
    while session.is_locked() && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
}
