use std::fmt;

/// How the configured command is executed.
///
/// Derived from the `runOnce` / `runInBackground` flags of a validated
/// config; the two flags are mutually exclusive so exactly one mode applies.
///
/// - `RunOnce`: execute once at startup, exit with the command's status.
/// - `Foreground`: execute on every trigger and block until it exits.
/// - `Background`: spawn on trigger and return immediately; overlapping
///   triggers are rejected while a job is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    RunOnce,
    Foreground,
    Background,
}

impl ExecutionMode {
    /// Whether this mode starts the HTTP server.
    pub fn serves_requests(self) -> bool {
        !matches!(self, ExecutionMode::RunOnce)
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionMode::RunOnce => "run-once",
            ExecutionMode::Foreground => "foreground",
            ExecutionMode::Background => "background",
        };
        f.write_str(s)
    }
}

/// Observable state of the execution controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPhase {
    Idle,
    BackgroundRunning,
}
