// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, ServiceError};
use crate::types::ExecutionMode;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ServiceError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let mode = resolve_mode(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.command, mode))
    }
}

fn resolve_mode(cfg: &RawConfigFile) -> Result<ExecutionMode> {
    match (cfg.run_once, cfg.run_in_background) {
        (true, true) => Err(ServiceError::ConfigError(
            "runOnce and runInBackground cannot both be set to true".to_string(),
        )),
        (true, false) => Ok(ExecutionMode::RunOnce),
        (false, true) => Ok(ExecutionMode::Background),
        (false, false) => Ok(ExecutionMode::Foreground),
    }
}
