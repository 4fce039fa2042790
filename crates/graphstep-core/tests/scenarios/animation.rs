//! Animation runs against a mocked HTTP executor, in real time.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use graphstep_core::config::PlaybackMode;
use graphstep_core::{AnimationPhase, Error, GraphSession, NodeState, StartOutcome, StepOutcome};

use crate::helpers::{
    build_chain, config_for, mount_executor, visit_bodies, wait_until_idle, StepSequence,
};

async fn run_bodies(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == "/api/grafo")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

#[tokio::test]
async fn test_bfs_run_plays_to_completion() {
    let server = MockServer::start().await;
    mount_executor(&server, visit_bodies(&[1, 2, 3])).await;
    let mut session = GraphSession::with_http(config_for(&server)).unwrap();
    build_chain(&mut session, 3);

    session.click_node(1).unwrap();
    let outcome = session.play("bfs").await.unwrap();
    assert_eq!(
        outcome,
        StartOutcome::Started(StepOutcome::Applied {
            step: 1,
            finished: false
        })
    );
    assert_eq!(session.node(1).unwrap().state(), NodeState::Visiting);
    assert!(session.is_locked());

    wait_until_idle(&session, 2_000).await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, AnimationPhase::Finished);
    assert_eq!(snapshot.step, 3);
    assert_eq!(snapshot.current_node, Some(3));
    assert!(!session.stepper().status().scheduled);
    let states: Vec<NodeState> = snapshot.nodes.iter().map(|n| n.state()).collect();
    assert_eq!(
        states,
        vec![NodeState::Visited, NodeState::Visited, NodeState::Visiting]
    );

    let runs = run_bodies(&server).await;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0]["algorithm"], "bfs");
    assert_eq!(runs[0]["source"], 1);
    assert_eq!(runs[0]["nodes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_next_step_after_finish_opens_new_run() {
    let server = MockServer::start().await;
    let mut bodies = visit_bodies(&[2, 1, 3]);
    bodies.push(visit_bodies(&[2, 1, 3])[0].clone());
    mount_executor(&server, bodies).await;
    let mut session = GraphSession::with_http(config_for(&server)).unwrap();
    build_chain(&mut session, 3);

    session.click_node(2).unwrap();
    session.play("dfs").await.unwrap();
    wait_until_idle(&session, 2_000).await;
    assert_eq!(session.snapshot().phase, AnimationPhase::Finished);

    let outcome = session.next_step("dfs").await.unwrap();
    assert_eq!(
        outcome,
        StepOutcome::Applied {
            step: 1,
            finished: false
        }
    );
    // Manual runs are not scheduled.
    assert!(!session.stepper().status().scheduled);

    let runs = run_bodies(&server).await;
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[1]["source"], 2);
    assert_eq!(runs[1]["algorithm"], "dfs");
}

#[tokio::test]
async fn test_executor_failure_stops_run_and_keeps_states() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/grafo"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/step"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&visit_bodies(&[1, 2, 3])[0]))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/step"))
        .respond_with(ResponseTemplate::new(503).set_body_string("executor down"))
        .mount(&server)
        .await;

    let mut session = GraphSession::with_http(config_for(&server)).unwrap();
    build_chain(&mut session, 3);
    session.play("bfs").await.unwrap();
    wait_until_idle(&session, 2_000).await;
    // The scheduled task records its error right after leaving the run.
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(session.snapshot().phase, AnimationPhase::Idle);
    let error = session.stepper().take_last_error().expect("scheduled error recorded");
    assert!(error.contains("503"), "unexpected error: {error}");
    assert_eq!(session.stepper().take_last_error(), None);
    // The last good state stays visible and the graph is editable again.
    assert_eq!(session.node(1).unwrap().state(), NodeState::Visiting);
    assert!(session.double_click_canvas(0.0, 0.0).is_ok());
}

#[tokio::test]
async fn test_rejected_run_leaves_session_idle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/grafo"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "bad graph" })))
        .mount(&server)
        .await;

    let mut session = GraphSession::with_http(config_for(&server)).unwrap();
    build_chain(&mut session, 2);

    let err = session.play("bfs").await.unwrap_err();
    assert!(matches!(err, Error::ExecutorRejected { status: 400, .. }));
    assert!(!session.is_locked());
    assert_eq!(session.snapshot().phase, AnimationPhase::Idle);
}

#[tokio::test]
async fn test_stop_cancels_schedule() {
    let server = MockServer::start().await;
    mount_executor(&server, visit_bodies(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])).await;
    let mut session = GraphSession::with_http(config_for(&server)).unwrap();
    build_chain(&mut session, 10);

    session.play("bfs").await.unwrap();
    assert!(session.stop());
    assert!(!session.stop());
    let step = session.snapshot().step;

    tokio::time::sleep(Duration::from_millis(150)).await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, AnimationPhase::Idle);
    assert_eq!(snapshot.step, step);
    assert!(!session.stepper().status().scheduled);
}

#[tokio::test]
async fn test_restart_resets_states_and_reuses_source() {
    let server = MockServer::start().await;
    let mut bodies = visit_bodies(&[3, 2, 1]);
    bodies.truncate(2);
    bodies.extend(visit_bodies(&[3, 2, 1]));
    mount_executor(&server, bodies).await;

    let mut session = GraphSession::with_http(config_for(&server)).unwrap();
    build_chain(&mut session, 3);
    session.click_node(3).unwrap();
    session.next_step("bfs").await.unwrap();
    session.next_step("bfs").await.unwrap();
    assert_eq!(session.node(2).unwrap().state(), NodeState::Visiting);

    let outcome = session.restart("bfs").await.unwrap();
    assert_eq!(
        outcome,
        StartOutcome::Started(StepOutcome::Applied {
            step: 1,
            finished: false
        })
    );
    assert_eq!(session.node(3).unwrap().state(), NodeState::Visiting);
    assert_eq!(session.node(2).unwrap().state(), NodeState::Unvisited);
    session.stop();

    let runs = run_bodies(&server).await;
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[1]["source"], 3);
}

#[tokio::test]
async fn test_poll_playback_counts_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/grafo"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/algoritmo/estado"))
        .respond_with(StepSequence::new(vec![
            json!({ "graph": { "nodes": [{ "id": 1, "state": "visiting" }] }, "finished": false }),
            json!({ "graph": { "nodes": [{ "id": 1, "state": "visited" }, { "id": 2, "state": "visiting" }] }, "finished": false }),
            json!({ "graph": { "nodes": [{ "id": 2, "state": "visited" }] }, "finished": true }),
        ]))
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.animation.playback = PlaybackMode::Poll;
    let mut session = GraphSession::with_http(config).unwrap();
    build_chain(&mut session, 2);

    session.play("bfs").await.unwrap();
    wait_until_idle(&session, 2_000).await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, AnimationPhase::Finished);
    assert_eq!(snapshot.step, 3);
    assert_eq!(snapshot.current_node, None);
    assert_eq!(session.node(1).unwrap().state(), NodeState::Visited);
    assert_eq!(session.node(2).unwrap().state(), NodeState::Visited);
}
