// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every flag except `--log-level` and `--dry-run` has an environment
//! variable fallback; the secret is only ever read from the environment.

use clap::{Parser, ValueEnum};

const ENV_HELP: &str = "\
Environment Variables:
  CONFIG_FILE_PATH  : Path to the YAML configuration file (default: config.yaml next to the executable)
  EXECUTE_SECRET    : Secret key for authentication (required)
  SHELL_PATH        : Path to the shell used for executing commands (default: /bin/sh)
  LISTEN_PORT       : Port on which the service listens (default: 8080)
  RCS_LOG           : Log level when --log-level is not given (default: info)

Configuration File (YAML):
  command          : shell command to execute; $VAR / ${VAR} are expanded on every run
  runInBackground  : spawn the command and answer immediately (default: false)
  runOnce          : run the command once at startup and exit with its status (default: false)

Example config.yaml:
  command: |
    echo \"Hello from Run Command Service!\"
    echo \"Current date: $(date)\"

Endpoints:
  GET  /ready   : Returns 200 OK if the service is running
  POST /execute : Executes the configured command and returns its exit code
                  (requires 'x-secret' header for authentication)";

/// Command-line arguments for `run-command-service`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "run-command-service",
    version,
    about = "HTTP API to execute a predefined shell command.",
    long_about = None,
    after_help = ENV_HELP
)]
pub struct CliArgs {
    /// Path to the YAML config file.
    #[arg(long, value_name = "PATH", env = "CONFIG_FILE_PATH")]
    pub config: Option<String>,

    /// Shell used to run the command (invoked as `<shell> -c <command>`).
    #[arg(long, value_name = "PATH", env = "SHELL_PATH")]
    pub shell: Option<String>,

    /// Port to listen on.
    #[arg(long, value_name = "PORT", env = "LISTEN_PORT")]
    pub port: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RCS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load and validate config, print the expanded command, but don't run it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
