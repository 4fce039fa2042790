//! Editing scenarios through the session facade.

use graphstep_core::graph::StructuralRejection;
use graphstep_core::{ClickOutcome, EdgeOptions, Error, NodeState};

use crate::helpers::{build_chain, offline_session};

#[test]
fn test_add_connect_and_cascade_delete() {
    let mut session = offline_session();

    assert_eq!(session.double_click_canvas(10.0, 10.0).unwrap().id(), 1);
    assert_eq!(session.double_click_canvas(20.0, 20.0).unwrap().id(), 2);

    let edge = session.add_edge(1, 2, EdgeOptions::undirected()).unwrap();
    assert_eq!(edge.id(), 1);

    let err = session.add_edge(2, 1, EdgeOptions::directed()).unwrap_err();
    assert!(matches!(
        err,
        Error::Rejected(StructuralRejection::DuplicateConnection)
    ));

    assert!(session.delete_node(1).unwrap());
    assert!(session.snapshot().edges.is_empty());
}

#[test]
fn test_click_to_connect_and_reverse_direction() {
    let mut session = offline_session();
    build_chain(&mut session, 2);
    session.delete_edge(1).unwrap();

    assert_eq!(session.click_node(1).unwrap(), ClickOutcome::Selected(1));
    assert_eq!(session.node(1).unwrap().state(), NodeState::Selected);
    let ClickOutcome::Connected(forward) = session.click_node(2).unwrap() else {
        panic!("expected a connection");
    };
    assert!(forward.is_directed());
    assert_eq!(session.node(1).unwrap().state(), NodeState::Default);

    // The reverse direction is a distinct directed edge.
    session.click_node(2).unwrap();
    let ClickOutcome::Connected(reverse) = session.click_node(1).unwrap() else {
        panic!("expected the reverse edge");
    };
    assert_eq!((reverse.from(), reverse.to()), (2, 1));

    // A third attempt is refused, and the selection is still cleared.
    session.click_node(1).unwrap();
    assert_eq!(
        session.click_node(2).unwrap(),
        ClickOutcome::ConnectRejected(StructuralRejection::DuplicateConnection)
    );
    assert_eq!(session.controller().selected_node(), None);
}

#[test]
fn test_toggle_collapses_antiparallel_pair() {
    let mut session = offline_session();
    build_chain(&mut session, 2);
    session.delete_edge(1).unwrap();
    session.add_edge(1, 2, EdgeOptions::directed()).unwrap();
    session.add_edge(2, 1, EdgeOptions::directed()).unwrap();

    assert!(session.toggle_directed(2).unwrap());

    let edges = session.snapshot().edges;
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].id(), 2);
    assert!(!edges[0].is_directed());
}

#[test]
fn test_capacity_is_enforced() {
    let mut session = offline_session();
    let max = session.config().graph.max_nodes;
    for i in 0..max {
        session.double_click_canvas(i as f64, 0.0).unwrap();
    }
    assert!(matches!(
        session.double_click_canvas(0.0, 0.0),
        Err(Error::Rejected(StructuralRejection::CapacityExceeded(_)))
    ));
    assert_eq!(session.snapshot().nodes.len(), max);

    // Deleting frees a slot; ids are never reused.
    session.delete_node(3).unwrap();
    let node = session.double_click_canvas(0.0, 0.0).unwrap();
    assert_eq!(node.id(), max as u64 + 1);
}

#[test]
fn test_drag_is_blocked_while_editing_the_node() {
    let mut session = offline_session();
    build_chain(&mut session, 2);

    session.begin_edit_node(1).unwrap();
    assert!(!session.pointer_down(1, 0.0, 50.0).unwrap());

    session.cancel_edit();
    assert!(session.pointer_down(1, 5.0, 55.0).unwrap());
    session.pointer_move(105.0, 155.0).unwrap();
    session.pointer_up();
    assert_eq!(session.node(1).unwrap().position(), (100.0, 150.0));
}

#[test]
fn test_context_menu_actions() {
    let mut session = offline_session();
    build_chain(&mut session, 3);

    assert!(session.open_edge_menu(1, 40.0, 40.0));
    assert!(session.menu_toggle_directed().unwrap());
    assert!(session.edge(1).unwrap().is_directed());
    assert!(session.controller().context_menu().is_none());

    assert!(session.open_node_menu(2, 0.0, 0.0));
    // Node menus have no toggle.
    assert!(!session.menu_toggle_directed().unwrap());
    assert!(session.menu_delete_node().unwrap());
    assert!(session.snapshot().edges.is_empty());
    assert!(!session.open_node_menu(2, 0.0, 0.0));
}
