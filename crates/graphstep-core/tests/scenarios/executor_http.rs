//! HTTP executor contract: paths, bodies, status handling and cookies.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use graphstep_core::executor::{AlgorithmExecutor, RunRequest};
use graphstep_core::{EdgeOptions, Error, GraphStore, HttpExecutor, NodeState, RunParams};

use crate::helpers::{config_for, visit_bodies};

fn two_node_store() -> GraphStore {
    let mut store = GraphStore::new();
    store.add_node(0.0, 0.0).unwrap();
    store.add_node(10.0, 5.0).unwrap();
    store.set_node_weight(2, Some(3.0));
    store
        .add_edge(1, 2, EdgeOptions::directed().with_weight(1.5))
        .unwrap();
    store
}

#[tokio::test]
async fn test_start_run_posts_extended_graph() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/grafo"))
        .and(body_partial_json(json!({ "algorithm": "bfs", "source": 1 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let executor = HttpExecutor::new(&config_for(&server).executor).unwrap();
    let request = RunRequest::from_store(&two_node_store(), &RunParams::new("bfs", 1));
    executor.start_run(&request).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["nodes"][1], json!({ "id": 2, "x": 10.0, "y": 5.0, "weight": 3.0 }));
    assert_eq!(
        body["edges"][0],
        json!({ "id": 1, "from": 1, "to": 2, "weight": 1.5, "directed": true })
    );
    assert!(body.get("target").is_none());
}

#[tokio::test]
async fn test_start_run_sends_target_when_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/grafo"))
        .and(body_partial_json(json!({ "algorithm": "dijkstra", "target": 2 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let executor = HttpExecutor::new(&config_for(&server).executor).unwrap();
    let params = RunParams::new("dijkstra", 1).with_target(2);
    executor
        .start_run(&RunRequest::from_store(&two_node_store(), &params))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_next_step_parses_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/step"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&visit_bodies(&[1, 2])[0]))
        .mount(&server)
        .await;

    let executor = HttpExecutor::new(&config_for(&server).executor).unwrap();
    let step = executor.next_step().await.unwrap();

    assert_eq!(step.step, 1);
    assert!(!step.finished);
    assert_eq!(step.current_node, Some(1));
    assert_eq!(step.graph.nodes[0].state, NodeState::Visiting);
    assert_eq!(step.graph.nodes[1].state, NodeState::Unvisited);
}

#[tokio::test]
async fn test_step_accepts_uppercase_states_and_pair_edges() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/step"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "graph": {
                "nodes": [{ "id": 1, "x": 0, "y": 0, "state": "VISITED" }],
                "edges": [[1, 2]]
            },
            "finished": true
        })))
        .mount(&server)
        .await;

    let executor = HttpExecutor::new(&config_for(&server).executor).unwrap();
    let step = executor.next_step().await.unwrap();
    assert_eq!(step.graph.nodes[0].state, NodeState::Visited);
    assert_eq!(step.graph.edges.len(), 1);
    assert!(step.finished);
    assert_eq!(step.step, 0);
}

#[tokio::test]
async fn test_non_success_status_is_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/grafo"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let executor = HttpExecutor::new(&config_for(&server).executor).unwrap();
    let request = RunRequest::from_store(&two_node_store(), &RunParams::new("bfs", 1));
    let err = executor.start_run(&request).await.unwrap_err();

    assert!(err.is_transport());
    match err {
        Error::ExecutorRejected { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_session_cookie_is_replayed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/grafo"))
        .respond_with(ResponseTemplate::new(200).append_header("set-cookie", "run=42; Path=/"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/step"))
        .and(header("cookie", "run=42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&visit_bodies(&[1])[0]))
        .expect(1)
        .mount(&server)
        .await;

    let executor = HttpExecutor::new(&config_for(&server).executor).unwrap();
    let request = RunRequest::from_store(&two_node_store(), &RunParams::new("bfs", 1));
    executor.start_run(&request).await.unwrap();
    let step = executor.next_step().await.unwrap();
    assert!(step.finished);
}

#[tokio::test]
async fn test_poll_state_uses_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/algoritmo/estado"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "graph": { "nodes": [{ "id": 2, "state": "visiting" }], "edges": [] },
            "finished": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let executor = HttpExecutor::new(&config_for(&server).executor).unwrap();
    let state = executor.poll_state().await.unwrap();
    assert!(!state.finished);
    assert_eq!(state.graph.nodes[0].id, 2);
}

#[tokio::test]
async fn test_undecodable_step_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/step"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/algoritmo/estado"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "finished": "nope" })))
        .mount(&server)
        .await;

    let executor = HttpExecutor::new(&config_for(&server).executor).unwrap();
    let err = executor.next_step().await.unwrap_err();
    assert!(matches!(err, Error::Transport(ref msg) if msg.contains("invalid step response")));
    assert!(err.is_transport());

    let err = executor.poll_state().await.unwrap_err();
    assert!(matches!(err, Error::Transport(ref msg) if msg.contains("invalid state response")));
}

#[tokio::test]
async fn test_unreachable_executor_is_transport_error() {
    let mut config = graphstep_core::GraphstepConfig::default();
    config.executor.base_url = "http://127.0.0.1:9".to_string();
    config.executor.request_timeout_ms = 500;

    let executor = HttpExecutor::new(&config.executor).unwrap();
    let err = executor.next_step().await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert!(err.is_transport());
}

#[test]
fn test_base_url_trailing_slash_is_trimmed() {
    let mut config = graphstep_core::GraphstepConfig::default();
    config.executor.base_url = "http://localhost:5000/".to_string();
    let executor = HttpExecutor::new(&config.executor).unwrap();
    assert_eq!(executor.base_url(), "http://localhost:5000");
    assert_eq!(executor.executor_type(), "http");
}
