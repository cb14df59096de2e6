// tests/run_once.rs

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::NamedTempFile;

use run_command_service::config::{load_and_validate, ConfigFile};
use run_command_service::engine::{ExecutionController, ExecutionMode};
use run_command_service::errors::ServiceError;
use run_command_service::exec::ShellRunner;
use run_command_service::launch;
use run_command_service_test_utils::builders::{controller_with, test_settings, ConfigFileBuilder};
use run_command_service_test_utils::fake_runner::FakeRunner;
use run_command_service_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn shell_controller(cfg: ConfigFile) -> ExecutionController {
    ExecutionController::new(cfg, Arc::new(ShellRunner::new("/bin/sh")))
}

#[tokio::test]
async fn run_once_exit_code_becomes_process_status() -> TestResult {
    init_tracing();

    for (command, expected) in [("echo 'test'", 0), ("exit 1", 1), ("exit 3", 3)] {
        let cfg = ConfigFileBuilder::new(command).run_once(true).build();
        let code = launch(shell_controller(cfg), &test_settings()).await?;
        assert_eq!(code, expected, "command: {command}");
    }
    Ok(())
}

#[tokio::test]
async fn run_once_spawn_failure_is_fatal() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new("echo hi").run_once(true).build();
    let controller = ExecutionController::new(cfg, Arc::new(ShellRunner::new("/no/such/shell")));

    match launch(controller, &test_settings()).await {
        Err(ServiceError::SpawnError { .. }) => Ok(()),
        other => panic!("expected SpawnError, got {other:?}"),
    }
}

#[tokio::test]
async fn run_once_executes_exactly_once() -> TestResult {
    let runner = FakeRunner::completing_with(0);
    let cfg = ConfigFileBuilder::new("echo once").run_once(true).build();
    let controller = controller_with(cfg, runner.as_runner());

    let outcome = controller.run_once().await?;
    assert!(outcome.is_success());
    assert_eq!(runner.commands(), vec!["echo once".to_string()]);
    Ok(())
}

#[test]
fn both_modes_set_fails_before_anything_runs() {
    let file = write_config("command: echo 'test'\nrunOnce: true\nrunInBackground: true\n");

    match load_and_validate(file.path()) {
        Err(ServiceError::ConfigError(msg)) => {
            assert_eq!(msg, "runOnce and runInBackground cannot both be set to true");
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn builder_config_round_trips_through_yaml() -> TestResult {
    let raw = ConfigFileBuilder::new("echo 'test'").run_once(true).raw();
    let file = write_config(&serde_yaml::to_string(&raw)?);

    let cfg = load_and_validate(file.path())?;
    assert_eq!(cfg.mode(), ExecutionMode::RunOnce);
    assert_eq!(cfg.command(), "echo 'test'");
    Ok(())
}

#[test]
fn demo_configs_are_valid() -> TestResult {
    let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos");

    let fg = load_and_validate(demos.join("config.yaml"))?;
    assert_eq!(fg.mode(), ExecutionMode::Foreground);
    assert!(fg.command().contains("$(date)"));

    let bg = load_and_validate(demos.join("background.yaml"))?;
    assert_eq!(bg.mode(), ExecutionMode::Background);

    let once = load_and_validate(demos.join("run-once.yaml"))?;
    assert_eq!(once.mode(), ExecutionMode::RunOnce);

    assert!(matches!(
        load_and_validate(demos.join("invalid-both-modes.yaml")),
        Err(ServiceError::ConfigError(_))
    ));
    Ok(())
}
