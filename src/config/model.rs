// src/config/model.rs

use serde::{Deserialize, Serialize};

use crate::types::ExecutionMode;

/// Command configuration exactly as read from YAML.
///
/// ```yaml
/// command: |
///   echo "Hello from Run Command Service!"
///   echo "Current date: $(date)"
/// runInBackground: false
/// runOnce: false
/// ```
///
/// Unknown keys are ignored. Use [`ConfigFile::try_from`] (or
/// [`crate::config::load_and_validate`]) to obtain a validated config.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfigFile {
    /// Shell command template. Environment references (`$VAR`, `${VAR}`) are
    /// kept verbatim here and expanded at invocation time.
    pub command: String,

    #[serde(default, rename = "runInBackground")]
    pub run_in_background: bool,

    #[serde(default, rename = "runOnce")]
    pub run_once: bool,
}

/// Validated, immutable command configuration.
///
/// Fields are private so the only way to build one is through validation;
/// `run_once` and `run_in_background` can therefore never both be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    command: String,
    mode: ExecutionMode,
}

impl ConfigFile {
    /// Internal constructor used by validation.
    pub(crate) fn new_unchecked(command: String, mode: ExecutionMode) -> Self {
        Self { command, mode }
    }

    /// The unexpanded command template.
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn run_in_background(&self) -> bool {
        self.mode == ExecutionMode::Background
    }

    pub fn run_once(&self) -> bool {
        self.mode == ExecutionMode::RunOnce
    }
}
