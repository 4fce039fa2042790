//! # graphstep core
//!
//! Editable graph model plus a client-driven stepper that animates graph
//! traversals (BFS, DFS, Dijkstra) computed by a remote executor.
//!
//! ## Features
//!
//! - **Graph store**: nodes and edges with structural invariants (no
//!   self-loops, no contradictory edges, cascading deletes, bounded size)
//! - **Serialization**: plain and extended JSON documents, staged
//!   all-or-nothing import, file save/load
//! - **Interaction**: selection, click-to-connect, weight editing, dragging
//!   and context-menu actions as plain method calls
//! - **Animation**: start/stop/next/restart against the executor with a
//!   cancellable schedule and stale-response protection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graphstep_core::{GraphSession, GraphstepConfig};
//!
//! #[tokio::main]
//! async fn main() -> graphstep_core::Result<()> {
//!     let mut session = GraphSession::with_http(GraphstepConfig::default())?;
//!
//!     let a = session.double_click_canvas(10.0, 10.0)?.id();
//!     let b = session.double_click_canvas(80.0, 10.0)?.id();
//!     session.click_node(a)?;
//!     session.click_node(b)?; // connects a -> b
//!
//!     session.click_node(a)?; // traversal source
//!     session.play("bfs").await?;
//!     println!("step {}", session.snapshot().step);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::float_cmp,
        clippy::manual_assert
    )
)]

pub mod animation;
pub mod config;
pub mod error;
pub mod executor;
pub mod graph;
pub mod interaction;
pub mod serialization;
pub mod session;
#[cfg(test)]
mod test_support;

pub use animation::{AnimationPhase, AnimationStepper, PlaybackMode, StartOutcome, StepOutcome};
pub use config::{ConfigError, GraphstepConfig};
pub use error::{Error, Result};
pub use executor::{AlgorithmExecutor, HttpExecutor, RunParams};
pub use graph::{Edge, EdgeId, EdgeOptions, GraphStore, Node, NodeId, NodeState, SharedGraph};
pub use interaction::{ClickOutcome, EditOutcome, InteractionController};
pub use serialization::{GraphFormat, ImportReport};
pub use session::{GraphSession, SessionSnapshot};
