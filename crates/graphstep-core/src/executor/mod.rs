//! Client side of the remote algorithm executor.
//!
//! The executor owns the algorithm; this crate only uploads the graph and
//! then pulls one state at a time. [`AlgorithmExecutor`] is the seam the
//! animation stepper talks to, [`HttpExecutor`] the production client.

mod http;
mod protocol;

use async_trait::async_trait;

use crate::error::Result;

pub use http::HttpExecutor;
pub use protocol::{
    GraphPayload, PollResponse, RunNode, RunParams, RunRequest, StateNode, StepResponse,
};

/// Request/response contract with the executor.
#[async_trait]
pub trait AlgorithmExecutor: Send + Sync {
    /// Short name for logs.
    fn executor_type(&self) -> &'static str;

    /// Uploads the graph and starts a run. Any non-success answer is an error.
    async fn start_run(&self, request: &RunRequest) -> Result<()>;

    /// Advances the run by one unit and returns the new state.
    async fn next_step(&self) -> Result<StepResponse>;

    /// Reads the current state without advancing it.
    async fn poll_state(&self) -> Result<PollResponse>;
}
