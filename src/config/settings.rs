// src/config/settings.rs

//! Process-level settings that don't live in the YAML file.
//!
//! `--shell` / `--port` already fall back to `SHELL_PATH` / `LISTEN_PORT`
//! through clap; the secret is read from `EXECUTE_SECRET` only, so it never
//! shows up in a process listing.

use tracing::info;

use crate::cli::CliArgs;
use crate::errors::{Result, ServiceError};

pub const EXECUTE_SECRET_ENV: &str = "EXECUTE_SECRET";
pub const DEFAULT_SHELL_PATH: &str = "/bin/sh";
pub const DEFAULT_LISTEN_PORT: u16 = 8080;

/// Resolved, read-only settings shared by the runner and the HTTP layer.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Value the `x-secret` header must match.
    pub execute_secret: String,
    /// Shell invoked as `<shell_path> -c <command>`.
    pub shell_path: String,
    pub listen_port: u16,
}

// The secret stays out of logs.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("execute_secret", &"<redacted>")
            .field("shell_path", &self.shell_path)
            .field("listen_port", &self.listen_port)
            .finish()
    }
}

impl Settings {
    /// Resolve settings from CLI args and the real process environment.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Resolve settings with an injectable environment lookup.
    pub fn resolve<F>(args: &CliArgs, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let execute_secret = lookup(EXECUTE_SECRET_ENV)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ServiceError::ConfigError(format!(
                    "{EXECUTE_SECRET_ENV} environment variable is not set"
                ))
            })?;

        let shell_path = match args.shell.as_deref() {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => {
                info!("SHELL_PATH not set, defaulting to {DEFAULT_SHELL_PATH}");
                DEFAULT_SHELL_PATH.to_string()
            }
        };

        let listen_port = match args.port.as_deref() {
            Some(p) if !p.is_empty() => parse_port(p)?,
            _ => {
                info!("LISTEN_PORT not set, defaulting to {DEFAULT_LISTEN_PORT}");
                DEFAULT_LISTEN_PORT
            }
        };

        Ok(Self {
            execute_secret,
            shell_path,
            listen_port,
        })
    }
}

fn parse_port(s: &str) -> Result<u16> {
    s.trim().parse::<u16>().map_err(|_| {
        ServiceError::ConfigError(format!(
            "invalid listen port: {s} (expected a number between 0 and 65535)"
        ))
    })
}
