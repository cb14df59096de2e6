// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! The controller talks to a `CommandRunner` instead of spawning processes
//! itself. Production code uses [`ShellRunner`](super::ShellRunner); tests can
//! provide a runner that records commands and completes on demand.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

use super::ExitOutcome;

/// Future resolving once a spawned command has exited.
///
/// It owns everything it needs, so it can be awaited inline (foreground) or
/// moved into a detached task (background).
pub type Completion = Pin<Box<dyn Future<Output = ExitOutcome> + Send + 'static>>;

/// Trait abstracting how the configured command is started.
///
/// Spawning and waiting are split so background mode can answer its caller as
/// soon as the process is running.
pub trait CommandRunner: Send + Sync {
    /// Start `command` (already expanded).
    ///
    /// Returns `ServiceError::SpawnError` if the process couldn't be started.
    fn spawn(&self, command: &str) -> Result<Completion>;

    /// Start `command` and wait for it to exit.
    fn run<'a>(
        &'a self,
        command: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ExitOutcome>> + Send + 'a>> {
        Box::pin(async move {
            let completion = self.spawn(command)?;
            Ok(completion.await)
        })
    }
}
