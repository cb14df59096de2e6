// src/engine/mod.rs

//! Execution-mode engine.
//!
//! [`controller`] owns the only shared mutable state in the service: the
//! "background job in flight" flag and the lock guarding it. It decides, per
//! trigger, whether to run in the foreground, spawn in the background, or
//! reject because a background job is still running.

use crate::exec::ExitOutcome;

/// Result of a single trigger, before it is mapped to HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Foreground run finished with this outcome.
    Completed(ExitOutcome),
    /// Background job accepted and its process started.
    Spawned,
    /// Background job rejected: another one is still in flight.
    AlreadyRunning,
}

pub mod controller;

pub use crate::types::{ExecutionMode, ExecutionPhase};
pub use controller::ExecutionController;
