// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod server;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, resolve_config_path, Settings};
use crate::engine::{ExecutionController, ExecutionMode};
use crate::exec::ShellRunner;
use crate::server::AppState;

/// High-level entry point used by `main.rs`.
///
/// Loads and validates config, resolves settings, then either runs the
/// command once or serves HTTP triggers. The returned value is the process
/// exit code.
pub async fn run(args: CliArgs) -> Result<i32> {
    info!("Starting Run Command Service");

    let config_path = resolve_config_path(args.config.as_deref());
    let cfg = load_and_validate(&config_path)?;
    let settings = Settings::from_args(&args)?;

    let runner = Arc::new(ShellRunner::new(settings.shell_path.clone()));
    let controller = ExecutionController::new(cfg, runner);

    log_command(&controller.expanded_command());

    if args.dry_run {
        print_dry_run(&controller, &settings);
        return Ok(0);
    }

    Ok(launch(controller, &settings).await?)
}

/// Run the validated controller in its configured mode.
///
/// - run-once: execute, return the command's exit code.
/// - foreground / background: serve until shutdown, return 0.
pub async fn launch(controller: ExecutionController, settings: &Settings) -> errors::Result<i32> {
    if controller.mode() == ExecutionMode::RunOnce {
        let outcome = controller.run_once().await?;
        if !outcome.is_success() {
            error!(exit_code = outcome.exit_code, "run-once command failed");
        }
        return Ok(outcome.exit_code);
    }

    let state = AppState::new(Arc::new(controller), settings.execute_secret.as_str());
    server::serve(state, settings.listen_port).await?;
    Ok(0)
}

fn log_command(expanded: &str) {
    info!("Command that will be executed:");
    info!("----------------------------------------");
    for line in expanded.lines() {
        info!("{line}");
    }
    info!("----------------------------------------");
}

/// Simple dry-run output: mode, shell, port and the expanded command.
fn print_dry_run(controller: &ExecutionController, settings: &Settings) {
    println!("run-command-service dry-run");
    println!("  mode = {}", controller.mode());
    println!("  shell = {}", settings.shell_path);
    if controller.mode().serves_requests() {
        println!("  listen_port = {}", settings.listen_port);
    }
    println!();
    println!("command:");
    for line in controller.expanded_command().lines() {
        println!("  {line}");
    }
}
