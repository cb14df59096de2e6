// src/exec/shell.rs

//! Production command runner: `<shell> -c <command>` via `tokio::process`.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{Result, ServiceError};

use super::backend::{CommandRunner, Completion};
use super::ExitOutcome;

/// Runs commands through a shell interpreter, relaying the child's
/// stdout/stderr to this process's stdout/stderr as it is produced.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell_path: String,
}

impl ShellRunner {
    pub fn new(shell_path: impl Into<String>) -> Self {
        Self {
            shell_path: shell_path.into(),
        }
    }
}

impl CommandRunner for ShellRunner {
    fn spawn(&self, command: &str) -> Result<Completion> {
        debug!(shell = %self.shell_path, cmd = %command, "starting command process");

        let mut cmd = Command::new(&self.shell_path);
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| ServiceError::SpawnError {
            shell: self.shell_path.clone(),
            source,
        })?;

        let pid = child.id();

        // Relays start before we ever wait on the child, so a chatty command
        // can't block on a full pipe.
        if let Some(mut stdout) = child.stdout.take() {
            tokio::spawn(async move {
                let mut out = tokio::io::stdout();
                if let Err(e) = tokio::io::copy(&mut stdout, &mut out).await {
                    debug!(error = %e, "stdout relay stopped");
                }
            });
        }
        if let Some(mut stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut err = tokio::io::stderr();
                if let Err(e) = tokio::io::copy(&mut stderr, &mut err).await {
                    debug!(error = %e, "stderr relay stopped");
                }
            });
        }

        Ok(Box::pin(async move {
            let outcome = match child.wait().await {
                Ok(status) => {
                    if status.code().is_none() {
                        warn!(?pid, %status, "command terminated without an exit code");
                    }
                    ExitOutcome::from(status)
                }
                Err(e) => {
                    warn!(?pid, error = %e, "failed waiting for command process");
                    ExitOutcome::generic_failure()
                }
            };

            info!(
                ?pid,
                exit_code = outcome.exit_code,
                success = outcome.is_success(),
                "command process exited"
            );
            outcome
        }))
    }
}
