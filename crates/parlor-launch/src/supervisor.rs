//! The supervisor: spawn workers, own their process handles, report exits.

use std::path::PathBuf;
use std::time::Duration;

use parlor_protocol::RoomId;
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::{LaunchError, ensure_unpacked, reserve_port};

/// Receiving half of the exit channel. The orchestrator's reap loop owns
/// this and tears rooms down as ids arrive.
pub type WorkerExits = mpsc::UnboundedReceiver<RoomId>;

/// How workers are invoked.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// File inside the unpacked artifact to execute.
    pub entrypoint: String,
    /// Optional interpreter to run the entrypoint through (e.g. `python3`).
    /// `None` executes the entrypoint directly.
    pub runner: Option<PathBuf>,
    /// Deadline for the ephemeral-port reservation.
    pub port_timeout: Duration,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            entrypoint: "game_server".to_string(),
            runner: None,
            port_timeout: Duration::from_secs(2),
        }
    }
}

/// Launches workers and watches their lifetimes.
///
/// Each launched worker gets one watcher task that exclusively owns the
/// process handle, blocks on its exit, and sends the room id down the exit
/// channel — completion flows back to the room table as a message, never as
/// shared-memory mutation from the watcher.
#[derive(Clone)]
pub struct Supervisor {
    runtime_root: PathBuf,
    config: LaunchConfig,
    exits: mpsc::UnboundedSender<RoomId>,
}

impl Supervisor {
    /// Creates a supervisor staging artifacts under `runtime_root`.
    ///
    /// Returns the exit receiver; exactly one reap loop should consume it.
    pub fn new(runtime_root: impl Into<PathBuf>, config: LaunchConfig) -> (Self, WorkerExits) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                runtime_root: runtime_root.into(),
                config,
                exits: tx,
            },
            rx,
        )
    }

    /// Stages the artifact, reserves a port, and spawns the worker for
    /// `room_id`. Returns the port the worker was told to bind.
    ///
    /// On any error the worker is not running and nothing will ever be sent
    /// for `room_id` — the room stays un-started and the creator may retry
    /// with another `start_room`.
    pub async fn launch(
        &self,
        game_key: &str,
        version: &str,
        archive: &std::path::Path,
        room_id: RoomId,
    ) -> Result<u16, LaunchError> {
        let runtime_dir = self.runtime_root.join(game_key).join(version);
        let archive = archive.to_path_buf();
        let runtime_dir = tokio::task::spawn_blocking(move || {
            ensure_unpacked(&archive, &runtime_dir)
        })
        .await
        .map_err(|_| LaunchError::UnpackAborted)??;

        let entrypoint = runtime_dir.join(&self.config.entrypoint);
        if !entrypoint.exists() {
            return Err(LaunchError::MissingEntrypoint {
                dir: runtime_dir,
                entrypoint: self.config.entrypoint.clone(),
            });
        }

        let port = reserve_port(self.config.port_timeout).await?;

        let mut command = match &self.config.runner {
            Some(runner) => {
                let mut c = Command::new(runner);
                c.arg(&entrypoint);
                c
            }
            None => Command::new(&entrypoint),
        };
        let mut child = command
            .arg("--port")
            .arg(port.to_string())
            .arg("--room-id")
            .arg(room_id.0.to_string())
            .current_dir(&runtime_dir)
            .spawn()
            .map_err(LaunchError::Spawn)?;

        tracing::info!(
            %room_id,
            game_key,
            version,
            port,
            pid = child.id(),
            "worker launched"
        );

        // Watcher task: exclusive owner of the child handle. Reports the
        // room for teardown whether the worker finished, crashed, or was
        // signalled.
        let exits = self.exits.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => {
                    tracing::info!(%room_id, %status, "worker exited");
                }
                Err(e) => {
                    tracing::warn!(%room_id, error = %e, "worker wait failed");
                }
            }
            let _ = exits.send(room_id);
        });

        Ok(port)
    }
}
