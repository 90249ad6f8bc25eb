//! Orchestrator configuration.

use std::path::PathBuf;

use parlor_launch::LaunchConfig;
use parlor_session::SessionConfig;

/// Everything the lobby needs to come up.
///
/// Defaults suit local development; the `parlord` binary overrides them
/// from the environment.
#[derive(Debug, Clone)]
pub struct LobbyConfig {
    /// Address the lobby listener binds. Failing to bind is the one fatal
    /// startup error.
    pub bind_addr: String,
    /// Root of the persisted documents and worker runtime directories.
    pub data_dir: PathBuf,
    /// Presence timing (sweep interval, heartbeat expiry).
    pub session: SessionConfig,
    /// Worker invocation (entrypoint, optional interpreter, port deadline).
    pub launch: LaunchConfig,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:6060".to_string(),
            data_dir: PathBuf::from("data"),
            session: SessionConfig::default(),
            launch: LaunchConfig::default(),
        }
    }
}

impl LobbyConfig {
    /// Defaults overridden by `PARLOR_ADDR`, `PARLOR_DATA_DIR`,
    /// `PARLOR_WORKER_ENTRYPOINT`, and `PARLOR_WORKER_RUNNER`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("PARLOR_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(dir) = std::env::var("PARLOR_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(entrypoint) = std::env::var("PARLOR_WORKER_ENTRYPOINT") {
            config.launch.entrypoint = entrypoint;
        }
        if let Ok(runner) = std::env::var("PARLOR_WORKER_RUNNER") {
            config.launch.runner = Some(PathBuf::from(runner));
        }
        config
    }
}
