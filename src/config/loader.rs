// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a config file from a path and return the raw `RawConfigFile`.
///
/// This only performs YAML deserialization; mode exclusivity is checked by
/// [`load_and_validate`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = serde_yaml::from_str(&contents)?;

    Ok(config)
}

/// Load a config file and validate it.
///
/// This is the entry point the rest of the application uses. A config with
/// both `runOnce` and `runInBackground` fails here, before anything runs.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Default config location: `config.yaml` next to the running executable.
///
/// Falls back to `config.yaml` in the working directory if the executable
/// path can't be determined.
pub fn default_config_path() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => exe
            .parent()
            .map(|dir| dir.join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from("config.yaml")),
        Err(_) => PathBuf::from("config.yaml"),
    }
}

/// Pick the config path: explicit (flag or `CONFIG_FILE_PATH`) or default.
pub fn resolve_config_path(explicit: Option<&str>) -> PathBuf {
    match explicit {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => {
            let path = default_config_path();
            info!(path = %path.display(), "CONFIG_FILE_PATH not set, using default");
            path
        }
    }
}
