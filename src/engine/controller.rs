// src/engine/controller.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use crate::config::ConfigFile;
use crate::errors::{Result, ServiceError};
use crate::exec::{expand_env, CommandRunner, ExitOutcome};
use crate::types::{ExecutionMode, ExecutionPhase};

use super::TriggerOutcome;

/// Mutable execution state, only ever touched with the lock held.
#[derive(Debug, Default)]
struct ExecutionState {
    is_running: bool,
}

/// Execution mode state machine.
///
/// Locking contract:
/// - Every trigger takes the state lock first.
/// - Foreground triggers hold it for the whole run, so all triggers are
///   serialized. They never read or write `is_running`. The guard is owned by
///   a spawned task, so a caller that goes away (client disconnect) does not
///   release the lock while its command is still running.
/// - Background triggers hold it only for check + spawn + set. The detached
///   completion task re-takes it to clear the flag after the process exits.
///
/// There is no timeout: a background command that never exits keeps the flag
/// set, and every later background trigger is rejected until restart.
pub struct ExecutionController {
    config: ConfigFile,
    runner: Arc<dyn CommandRunner>,
    state: Arc<Mutex<ExecutionState>>,
}

impl fmt::Debug for ExecutionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionController")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ExecutionController {
    pub fn new(config: ConfigFile, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            config,
            runner,
            state: Arc::new(Mutex::new(ExecutionState::default())),
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.config.mode()
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Command with environment references expanded against the current
    /// environment. Recomputed on every call.
    pub fn expanded_command(&self) -> String {
        expand_env(self.config.command())
    }

    /// Current phase. Waits for the lock, so this blocks while a foreground
    /// run is in progress.
    pub async fn phase(&self) -> ExecutionPhase {
        if self.state.lock().await.is_running {
            ExecutionPhase::BackgroundRunning
        } else {
            ExecutionPhase::Idle
        }
    }

    /// Execute the command once and wait for it, for run-once startup.
    ///
    /// The caller turns the outcome into the process exit status.
    pub async fn run_once(&self) -> Result<ExitOutcome> {
        let command = self.expanded_command();
        info!(mode = %self.mode(), "executing command once");
        self.runner.run(&command).await
    }

    /// Handle one trigger according to the configured mode.
    pub async fn trigger(&self) -> Result<TriggerOutcome> {
        let mut state = Arc::clone(&self.state).lock_owned().await;

        match self.config.mode() {
            ExecutionMode::Background => self.start_background(&mut state),
            ExecutionMode::Foreground | ExecutionMode::RunOnce => {
                let outcome = self.run_foreground(state).await?;
                Ok(TriggerOutcome::Completed(outcome))
            }
        }
    }

    /// Run to completion in a task that owns `state`; the lock is released
    /// only once the command has exited, even if this future is dropped.
    async fn run_foreground(
        &self,
        state: OwnedMutexGuard<ExecutionState>,
    ) -> Result<ExitOutcome> {
        let command = self.expanded_command();
        let runner = Arc::clone(&self.runner);
        debug!("running command in foreground");

        let handle = tokio::spawn(async move {
            let _state = state;
            runner.run(&command).await
        });

        handle.await.map_err(|e| {
            ServiceError::Other(anyhow::anyhow!("foreground run task failed: {e}"))
        })?
    }

    fn start_background(
        &self,
        state: &mut OwnedMutexGuard<ExecutionState>,
    ) -> Result<TriggerOutcome> {
        if state.is_running {
            info!("background job still running; rejecting trigger");
            return Ok(TriggerOutcome::AlreadyRunning);
        }

        let command = self.expanded_command();
        let completion = self.runner.spawn(&command)?;
        state.is_running = true;

        let shared = Arc::clone(&self.state);
        tokio::spawn(async move {
            let outcome = completion.await;
            shared.lock().await.is_running = false;

            if outcome.is_success() {
                info!(exit_code = outcome.exit_code, "background job finished");
            } else {
                warn!(exit_code = outcome.exit_code, "background job failed");
            }
        });

        info!("background job spawned");
        Ok(TriggerOutcome::Spawned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use crate::config::RawConfigFile;
    use crate::exec::ShellRunner;

    fn controller(command: &str, run_in_background: bool) -> ExecutionController {
        let cfg = ConfigFile::try_from(RawConfigFile {
            command: command.to_string(),
            run_in_background,
            run_once: false,
        })
        .unwrap();
        ExecutionController::new(cfg, Arc::new(ShellRunner::new("/bin/sh")))
    }

    async fn wait_until_idle(ctl: &ExecutionController) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while ctl.phase().await != ExecutionPhase::Idle {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await
        .expect("background job did not finish in time");
    }

    #[tokio::test]
    async fn foreground_reports_exit_code() {
        let ok = controller("exit 0", false).trigger().await.unwrap();
        assert_eq!(ok, TriggerOutcome::Completed(ExitOutcome::success()));

        let failed = controller("exit 3", false).trigger().await.unwrap();
        assert_eq!(failed, TriggerOutcome::Completed(ExitOutcome::failed(3)));
    }

    #[tokio::test]
    async fn foreground_never_marks_background_running() {
        let ctl = controller("true", false);
        ctl.trigger().await.unwrap();
        assert_eq!(ctl.phase().await, ExecutionPhase::Idle);
    }

    #[tokio::test]
    async fn dropped_foreground_trigger_keeps_lock_until_exit() {
        let dir = tempfile::tempdir().unwrap();
        let mark = dir.path().join("running");
        let m = mark.display();
        let ctl = controller(&format!("touch {m}; sleep 0.5; rm {m}"), false);

        let cancelled = tokio::time::timeout(Duration::from_millis(150), ctl.trigger()).await;
        assert!(cancelled.is_err(), "trigger should still be running");

        // `phase` needs the lock, so it can only return once the first
        // command has finished.
        assert_eq!(ctl.phase().await, ExecutionPhase::Idle);
        assert!(!mark.exists(), "lock was released while the command was running");
    }

    #[tokio::test]
    async fn background_rejects_overlap_then_accepts_after_exit() {
        let ctl = controller("sleep 0.3", true);

        assert_eq!(ctl.trigger().await.unwrap(), TriggerOutcome::Spawned);
        assert_eq!(ctl.phase().await, ExecutionPhase::BackgroundRunning);
        assert_eq!(ctl.trigger().await.unwrap(), TriggerOutcome::AlreadyRunning);

        wait_until_idle(&ctl).await;
        assert_eq!(ctl.trigger().await.unwrap(), TriggerOutcome::Spawned);
        wait_until_idle(&ctl).await;
    }

    #[tokio::test]
    async fn failed_background_job_still_clears_flag() {
        let ctl = controller("exit 7", true);
        assert_eq!(ctl.trigger().await.unwrap(), TriggerOutcome::Spawned);
        wait_until_idle(&ctl).await;
        assert_eq!(ctl.trigger().await.unwrap(), TriggerOutcome::Spawned);
    }

    #[tokio::test]
    async fn background_spawn_error_leaves_flag_clear() {
        let cfg = ConfigFile::try_from(RawConfigFile {
            command: "true".to_string(),
            run_in_background: true,
            run_once: false,
        })
        .unwrap();
        let ctl = ExecutionController::new(cfg, Arc::new(ShellRunner::new("/no/such/shell")));

        assert!(ctl.trigger().await.is_err());
        assert_eq!(ctl.phase().await, ExecutionPhase::Idle);
    }
}
