pub mod builders;
pub mod fake_runner;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use run_command_service::engine::{ExecutionController, ExecutionPhase};
use run_command_service::logging::{build_filter, LOG_ENV};
use tracing_subscriber::fmt;

/// Upper bound for anything a test waits on.
pub const TEST_DEADLINE: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

static INIT: Once = Once::new();

/// Install a per-test captured subscriber using the service's own filter
/// rules, so `RCS_LOG=run_command_service=debug cargo test` works the same
/// way as it does for the binary.
pub fn init_tracing() {
    INIT.call_once(|| {
        let directives = std::env::var(LOG_ENV).ok();
        fmt()
            .with_env_filter(build_filter(None, directives.as_deref()))
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Await `f`, failing the test if it takes longer than [`TEST_DEADLINE`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(TEST_DEADLINE, f).await {
        Ok(v) => v,
        Err(_) => panic!("test future did not complete within {TEST_DEADLINE:?}"),
    }
}

/// Poll a synchronous condition (e.g. a fake runner's counters) until it
/// holds.
pub async fn wait_for<C>(mut cond: C)
where
    C: FnMut() -> bool,
{
    with_timeout(async {
        while !cond() {
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    })
    .await
}

/// Wait until the controller's background flag has been cleared.
///
/// `phase()` takes the controller lock, so this can't be a plain
/// [`wait_for`] closure.
pub async fn wait_until_idle(controller: &ExecutionController) {
    with_timeout(async {
        while controller.phase().await != ExecutionPhase::Idle {
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    })
    .await
}
