//! Interaction controller.
//!
//! Maps canvas gestures (clicks, double-clicks, drags, context-menu actions,
//! weight edits) onto [`crate::graph::GraphStore`] operations while keeping
//! the short-lived UI state out of the store.

mod controller;
mod state;


pub use controller::InteractionController;
pub use state::{ClickOutcome, ContextMenu, DragState, EditOutcome, EditingTarget, MenuTarget};
