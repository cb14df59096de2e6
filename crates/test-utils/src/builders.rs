#![allow(dead_code)]

use std::sync::Arc;

use run_command_service::config::{ConfigFile, RawConfigFile, Settings};
use run_command_service::engine::ExecutionController;
use run_command_service::exec::CommandRunner;
use run_command_service::server::AppState;

pub const TEST_SECRET: &str = "test-secret";

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            config: RawConfigFile {
                command: command.to_string(),
                run_in_background: false,
                run_once: false,
            },
        }
    }

    pub fn run_in_background(mut self, val: bool) -> Self {
        self.config.run_in_background = val;
        self
    }

    pub fn run_once(mut self, val: bool) -> Self {
        self.config.run_once = val;
        self
    }

    /// The raw config, for tests that exercise validation itself.
    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

/// Settings with the shared test secret, `/bin/sh` and an unused port.
pub fn test_settings() -> Settings {
    Settings {
        execute_secret: TEST_SECRET.to_string(),
        shell_path: "/bin/sh".to_string(),
        listen_port: 0,
    }
}

pub fn controller_with(
    config: ConfigFile,
    runner: Arc<dyn CommandRunner>,
) -> Arc<ExecutionController> {
    Arc::new(ExecutionController::new(config, runner))
}

/// App state wired to the given controller and [`TEST_SECRET`].
pub fn app_state(controller: Arc<ExecutionController>) -> AppState {
    AppState::new(controller, TEST_SECRET)
}
