//! `LobbyServer` builder, shared state, and the accept/reap loops.

use std::sync::Arc;

use parlor_launch::{Supervisor, WorkerExits};
use parlor_protocol::JsonCodec;
use parlor_room::{ChatDoc, ChatRelay, RoomTable, RoomsDoc};
use parlor_session::SessionRegistry;
use parlor_store::{Catalog, HistoryDoc, JsonDocument, LobbyPaths, RegistryDoc};
use parlor_transport::{Listener, WsListener};

use crate::handler::handle_connection;
use crate::{LobbyConfig, LobbyError};

/// The orchestrator context: every table and service, explicitly owned.
///
/// No globals — this is passed (via `Arc`) to every connection task. Each
/// component synchronizes internally with one lock per persisted document,
/// so the state itself needs no outer lock.
pub struct LobbyState {
    pub sessions: SessionRegistry,
    pub catalog: Catalog,
    pub rooms: RoomTable,
    pub chat: ChatRelay,
    pub supervisor: Supervisor,
    pub codec: JsonCodec,
}

/// Builder for configuring and starting a lobby.
pub struct LobbyServerBuilder {
    config: LobbyConfig,
}

impl LobbyServerBuilder {
    pub fn new() -> Self {
        Self {
            config: LobbyConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: LobbyConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the listen address.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Sets the data directory.
    pub fn data_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    /// Opens the documents, wires the components, and binds the listener.
    pub async fn build(self) -> Result<LobbyServer, LobbyError> {
        let paths = LobbyPaths::new(&self.config.data_dir);

        let registry = JsonDocument::<RegistryDoc>::open(paths.registry())?.shared();
        let rooms_doc = JsonDocument::<RoomsDoc>::open(paths.rooms())?.shared();
        let history = JsonDocument::<HistoryDoc>::open(paths.history())?.shared();
        let chats = JsonDocument::<ChatDoc>::open(paths.chats())?.shared();

        let (supervisor, exits) = Supervisor::new(paths.runtime(), self.config.launch.clone());

        let state = Arc::new(LobbyState {
            sessions: SessionRegistry::new(registry.clone(), self.config.session.clone()),
            catalog: Catalog::new(registry, history.clone(), paths),
            rooms: RoomTable::new(rooms_doc.clone(), history, chats.clone()),
            chat: ChatRelay::new(rooms_doc, chats),
            supervisor,
            codec: JsonCodec,
        });

        let listener = WsListener::bind(&self.config.bind_addr).await?;

        Ok(LobbyServer {
            listener,
            state,
            exits,
        })
    }
}

impl Default for LobbyServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A built lobby, ready to serve.
pub struct LobbyServer {
    listener: WsListener,
    state: Arc<LobbyState>,
    exits: WorkerExits,
}

impl LobbyServer {
    pub fn builder() -> LobbyServerBuilder {
        LobbyServerBuilder::new()
    }

    /// The bound listen address (useful with port 0 in tests).
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// The shared orchestrator context.
    pub fn state(&self) -> Arc<LobbyState> {
        Arc::clone(&self.state)
    }

    /// Runs the lobby until the process is terminated.
    ///
    /// Spawns the two background tasks — the heartbeat-expiry sweep and the
    /// worker reap loop — then accepts connections forever, one handler
    /// task per connection.
    pub async fn run(mut self) -> Result<(), LobbyError> {
        self.state.sessions.spawn_expiry_sweep();
        spawn_reap_loop(self.state.rooms.clone(), self.exits);

        tracing::info!("parlor lobby running");
        loop {
            match self.listener.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}

/// Consumes worker-exit notifications and tears the rooms down.
///
/// The single receiver keeps teardown ordered: watchers report ids, only
/// this loop touches the table, so "room exists" and "worker exited" can't
/// race each other.
fn spawn_reap_loop(rooms: RoomTable, mut exits: WorkerExits) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(room_id) = exits.recv().await {
            rooms.reap(room_id).await;
        }
        tracing::debug!("reap loop stopped: supervisor dropped");
    })
}
