// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`expand`] expands `$VAR` / `${VAR}` references against the live
//!   environment right before each invocation.
//! - [`backend`] provides the `CommandRunner` trait the controller talks to,
//!   so tests can swap in a fake runner.
//! - [`shell`] contains `ShellRunner`, the production runner built on
//!   `tokio::process::Command`.

pub mod backend;
pub mod expand;
pub mod shell;

pub use backend::{CommandRunner, Completion};
pub use expand::expand_env;
pub use shell::ShellRunner;

/// Exit code reported when a process ends without one (killed by a signal,
/// or waiting on it failed).
pub const GENERIC_FAILURE_CODE: i32 = 1;

/// Normalized result of one command invocation.
///
/// A non-zero exit is a normal outcome, not an error of the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    pub exit_code: i32,
}

impl ExitOutcome {
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }

    pub fn failed(exit_code: i32) -> Self {
        Self { exit_code }
    }

    /// Outcome for a process that terminated without an exit code.
    pub fn generic_failure() -> Self {
        Self {
            exit_code: GENERIC_FAILURE_CODE,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

impl From<std::process::ExitStatus> for ExitOutcome {
    fn from(status: std::process::ExitStatus) -> Self {
        match status.code() {
            Some(code) => Self { exit_code: code },
            None => Self::generic_failure(),
        }
    }
}
