//! Client-driven animation of a remote run.
//!
//! [`AnimationStepper`] opens a run on an [`crate::executor::AlgorithmExecutor`],
//! pulls one state at a time and writes the reported node states into the
//! shared store. Automatic playback is a [`ScheduledTask`] that fires every
//! `step_interval` until the executor reports the run as finished.
//!
//! ```text
//! Idle ──start──▶ Running ◀──▶ Stepping ──finished──▶ Finished
//!   ▲                │ stop        │ stop / error
//!   └────────────────┴─────────────┘
//! ```

mod schedule;
mod stepper;

#[cfg(test)]
mod schedule_tests;

pub use crate::config::PlaybackMode;
pub use schedule::ScheduledTask;
pub use stepper::{AnimationPhase, AnimationStepper, StartOutcome, StepOutcome, StepperStatus};
