// tests/env_late_binding.rs
//
// Mutates the process environment, so it lives in its own test binary with a
// single test.

use std::error::Error;

use run_command_service::engine::TriggerOutcome;
use run_command_service::exec::ExitOutcome;
use run_command_service_test_utils::builders::{controller_with, ConfigFileBuilder};
use run_command_service_test_utils::fake_runner::FakeRunner;
use run_command_service_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

const VAR: &str = "RCS_LATE_BINDING_TARGET";

#[tokio::test]
async fn command_is_expanded_on_every_trigger() -> TestResult {
    init_tracing();

    let runner = FakeRunner::completing_with(0);
    let cfg = ConfigFileBuilder::new("deploy ${RCS_LATE_BINDING_TARGET} --at $(date)").build();
    let controller = controller_with(cfg, runner.as_runner());

    // SAFETY: this is the only test in this binary touching the environment.
    unsafe { std::env::set_var(VAR, "staging") };
    assert_eq!(
        controller.trigger().await?,
        TriggerOutcome::Completed(ExitOutcome::success())
    );

    unsafe { std::env::set_var(VAR, "production") };
    controller.trigger().await?;

    unsafe { std::env::remove_var(VAR) };
    controller.trigger().await?;

    assert_eq!(
        runner.commands(),
        vec![
            "deploy staging --at $(date)".to_string(),
            "deploy production --at $(date)".to_string(),
            "deploy  --at $(date)".to_string(),
        ]
    );
    assert_eq!(controller.config().command(), "deploy ${RCS_LATE_BINDING_TARGET} --at $(date)");
    Ok(())
}
