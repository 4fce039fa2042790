//! Save/load and import scenarios.

use serde_json::json;

use graphstep_core::{EdgeOptions, Error, GraphFormat, NodeState};

use crate::helpers::{build_chain, offline_session};

#[test]
fn test_extended_round_trip_preserves_everything() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("graph.json");

    let mut source = offline_session();
    build_chain(&mut source, 3);
    source.add_edge(3, 1, EdgeOptions::directed().with_weight(4.5)).unwrap();
    source.begin_edit_node(2).unwrap();
    source.commit_edit("7").unwrap();
    source.graph().lock().set_node_state(3, NodeState::Visited);
    source.save(Some(&file), GraphFormat::Extended).unwrap();

    let mut target = offline_session();
    let report = target.load(Some(&file)).unwrap();
    assert_eq!(report.nodes, 3);
    assert_eq!(report.edges, 3);
    assert_eq!(report.skipped_edges, 0);

    let (a, b) = (source.snapshot(), target.snapshot());
    assert_eq!(a.nodes, b.nodes);
    assert_eq!(a.edges, b.edges);

    // Counters continue after the loaded ids.
    assert_eq!(target.double_click_canvas(0.0, 0.0).unwrap().id(), 4);
    assert_eq!(target.add_edge(4, 1, EdgeOptions::directed()).unwrap().id(), 4);
}

#[test]
fn test_plain_export_shape() {
    let mut session = offline_session();
    build_chain(&mut session, 2);
    let value: serde_json::Value =
        serde_json::from_str(&session.export_json(GraphFormat::Plain).unwrap()).unwrap();

    assert_eq!(value["nodes"][0], json!({ "id": 1, "x": 0.0, "y": 50.0 }));
    assert_eq!(value["edges"], json!([[1, 2]]));
}

#[test]
fn test_import_skips_dangling_edges() {
    let mut session = offline_session();
    let report = session
        .import_json(
            r#"{
                "nodes": [{"id": 1, "x": 0, "y": 0}, {"id": 2, "x": 5, "y": 5}],
                "edges": [
                    {"id": 1, "from": 1, "to": 2, "directed": true},
                    {"id": 2, "from": 1, "to": 9, "directed": true},
                    {"id": 3, "from": 2, "to": 2, "directed": true}
                ]
            }"#,
        )
        .unwrap();

    assert_eq!(report.edges, 1);
    assert_eq!(report.skipped_edges, 2);
    assert_eq!(session.neighbors(1), vec![2]);
}

#[test]
fn test_bad_documents_leave_the_graph_alone() {
    let mut session = offline_session();
    build_chain(&mut session, 3);
    let before = session.snapshot();

    for bad in [
        "[1, 2, 3]",
        "{\"nodes\": 5}",
        r#"{"nodes":[{"id":1,"x":0,"y":0},{"id":1,"x":1,"y":1}],"edges":[]}"#,
        "{ not json",
    ] {
        let err = session.import_json(bad).unwrap_err();
        assert!(
            matches!(err, Error::Serialization(_) | Error::Json(_)),
            "unexpected error for {bad}: {err:?}"
        );
        assert_eq!(session.snapshot(), before);
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = offline_session();
    let err = session.load(Some(&dir.path().join("nope.json"))).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
