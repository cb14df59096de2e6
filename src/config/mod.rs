// src/config/mod.rs

//! Configuration loading and validation.
//!
//! Responsibilities:
//! - Define the YAML-backed command config (`model.rs`).
//! - Load it from disk (`loader.rs`).
//! - Reject mutually exclusive modes (`validate.rs`).
//! - Resolve process-level settings: secret, shell, port (`settings.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, resolve_config_path};
pub use model::{ConfigFile, RawConfigFile};
pub use settings::Settings;
