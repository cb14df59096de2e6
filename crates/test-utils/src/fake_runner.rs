use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use run_command_service::errors::{Result, ServiceError};
use run_command_service::exec::{CommandRunner, Completion, ExitOutcome};
use tokio::sync::oneshot;

/// How a [`FakeRunner`] finishes the commands it "spawns".
#[derive(Debug, Clone, Copy)]
enum Behaviour {
    /// Complete immediately with this outcome.
    Immediate(ExitOutcome),
    /// Stay running until the test calls [`FakeRunner::finish_next`].
    Gated,
    /// Refuse to spawn.
    SpawnFails,
}

#[derive(Default)]
struct Shared {
    commands: Mutex<Vec<String>>,
    pending: Mutex<Vec<oneshot::Sender<ExitOutcome>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// A fake command runner that:
/// - records every command it was asked to spawn
/// - completes per its behaviour, without starting real processes
/// - tracks how many "processes" were in flight at once.
#[derive(Clone)]
pub struct FakeRunner {
    behaviour: Behaviour,
    shared: Arc<Shared>,
}

impl FakeRunner {
    pub fn completing_with(exit_code: i32) -> Self {
        Self::with_behaviour(Behaviour::Immediate(ExitOutcome { exit_code }))
    }

    pub fn gated() -> Self {
        Self::with_behaviour(Behaviour::Gated)
    }

    pub fn failing_spawn() -> Self {
        Self::with_behaviour(Behaviour::SpawnFails)
    }

    fn with_behaviour(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            shared: Arc::new(Shared::default()),
        }
    }

    pub fn as_runner(&self) -> Arc<dyn CommandRunner> {
        Arc::new(self.clone())
    }

    /// Commands spawned so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.shared.commands.lock().unwrap().clone()
    }

    pub fn spawn_count(&self) -> usize {
        self.shared.commands.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.shared.max_in_flight.load(Ordering::SeqCst)
    }

    /// Finish the oldest gated command. Returns false if none was pending.
    pub fn finish_next(&self, exit_code: i32) -> bool {
        let mut pending = self.shared.pending.lock().unwrap();
        if pending.is_empty() {
            return false;
        }
        let tx = pending.remove(0);
        tx.send(ExitOutcome { exit_code }).is_ok()
    }
}

impl CommandRunner for FakeRunner {
    fn spawn(&self, command: &str) -> Result<Completion> {
        if let Behaviour::SpawnFails = self.behaviour {
            return Err(ServiceError::SpawnError {
                shell: "fake".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "fake spawn failure"),
            });
        }

        self.shared.commands.lock().unwrap().push(command.to_string());
        let now = self.shared.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let shared = Arc::clone(&self.shared);
        match self.behaviour {
            Behaviour::Immediate(outcome) => Ok(Box::pin(async move {
                shared.in_flight.fetch_sub(1, Ordering::SeqCst);
                outcome
            })),
            Behaviour::Gated => {
                let (tx, rx) = oneshot::channel();
                shared.pending.lock().unwrap().push(tx);
                Ok(Box::pin(async move {
                    let outcome = rx.await.unwrap_or_else(|_| ExitOutcome::generic_failure());
                    shared.in_flight.fetch_sub(1, Ordering::SeqCst);
                    outcome
                }))
            }
            Behaviour::SpawnFails => unreachable!("handled above"),
        }
    }
}
