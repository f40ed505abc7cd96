//! Drivers that run a session outside of real time.
//!
//! [`replay`] plays a seed plus a recorded input script through a fresh
//! session, for reproducing bug reports and regression tests.

pub mod replay;

pub use replay::{run_replay, ReplayError, ReplayReport, ReplayScript, ReplayStep};
