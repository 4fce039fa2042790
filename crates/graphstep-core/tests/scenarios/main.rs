//! End-to-end scenarios for graphstep.
//!
//! Each submodule drives the public API the way a front end would: editing
//! gestures, save/load, and animation runs against a mocked HTTP executor.

mod helpers;

mod animation;
mod editing;
mod executor_http;
mod serialization;
