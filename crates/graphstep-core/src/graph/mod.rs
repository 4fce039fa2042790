//! In-memory graph module.
//!
//! Provides the node/edge types and the [`GraphStore`] that owns them and
//! enforces the structural invariants (no dangling edges, no self-loops,
//! directed/undirected coexistence rules, bounded node count).
//!
//! # Example
//!
//! ```rust
//! use graphstep_core::graph::{EdgeOptions, GraphStore, StructuralRejection};
//!
//! let mut store = GraphStore::new();
//! let a = store.add_node(10.0, 10.0).unwrap().id();
//! let b = store.add_node(20.0, 20.0).unwrap().id();
//!
//! store.add_edge(a, b, EdgeOptions::undirected()).unwrap();
//! assert_eq!(
//!     store.add_edge(b, a, EdgeOptions::directed()),
//!     Err(StructuralRejection::DuplicateConnection)
//! );
//!
//! assert!(store.remove_node(a));
//! assert!(store.all_edges().is_empty());
//! ```

mod store;
mod types;


pub(crate) use store::RestoreError;
pub use store::{GraphStore, DEFAULT_MAX_NODES, ID_LIMIT};
pub use types::{Edge, EdgeId, EdgeOptions, Node, NodeId, NodeState, StructuralRejection};

/// A store shared between the session, the controller and the stepper.
///
/// The lock is never held across an `.await`.
pub type SharedGraph = std::sync::Arc<parking_lot::Mutex<GraphStore>>;
