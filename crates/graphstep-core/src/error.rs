//! Error types for graphstep-core.
//!
//! The store itself reports [`StructuralRejection`] values; this enum covers
//! the operations that cross a boundary (serialization, files, the remote
//! executor, the session policy) and wraps rejections surfaced there.

use thiserror::Error;

use crate::config::ConfigError;
use crate::graph::StructuralRejection;

/// graphstep error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Import payload is well-formed JSON but not a valid graph.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error (connection refused, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The executor answered with a non-success status.
    #[error("Executor rejected request: {status} - {body}")]
    ExecutorRejected {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The executor answered with a body that is not a valid response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A structural edit was refused by the store.
    #[error("Edit rejected: {0}")]
    Rejected(#[from] StructuralRejection),

    /// A run could not be started with the given parameters.
    #[error("Invalid run: {0}")]
    InvalidRun(String),

    /// An edit was attempted while an animation owns the node states.
    #[error("Graph is locked while an animation is running")]
    AnimationRunning,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns true if the error came from the executor boundary.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::ExecutorRejected { .. } | Self::Transport(_)
        )
    }
}

/// Result type alias for graphstep operations.
pub type Result<T> = std::result::Result<T, Error>;
