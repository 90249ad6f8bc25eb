//! The room table: a small state machine per room, one lock for the lot.
//!
//! Membership is found by scanning room player lists — there is no cached
//! player→room index, so the table itself is the single source of truth.
//! Lock order across documents is rooms → history → chats, everywhere.

use parlor_launch::Supervisor;
use parlor_protocol::{Room, RoomId, RoomState};
use parlor_store::{HistoryDoc, PlayRecord, ResolvedArtifact, SharedDoc};
use serde::{Deserialize, Serialize};

use crate::chat::ChatDoc;
use crate::{RoomError, chat};

/// Members needed before a room may start.
const MIN_PLAYERS_TO_START: usize = 2;

/// The persisted room document (`rooms.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomsDoc {
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl RoomsDoc {
    /// The room containing `player`, if any.
    pub fn room_of(&self, player: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.has_player(player))
    }

    fn get(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.room_id == room_id)
    }

    fn get_mut(&mut self, room_id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.room_id == room_id)
    }

    /// Smallest positive integer not currently in use, so ids stay dense
    /// and deterministic.
    fn smallest_free_id(&self) -> RoomId {
        let mut used: Vec<u32> = self.rooms.iter().map(|r| r.room_id.0).collect();
        used.sort_unstable();
        let mut id = 1;
        for rid in used {
            if rid == id {
                id += 1;
            } else if rid > id {
                break;
            }
        }
        RoomId(id)
    }
}

/// Recomputes the pre-start state after a membership change. Rooms that
/// already started are left alone.
fn refresh_pre_start_state(room: &mut Room) {
    if room.state.is_pre_start() {
        room.state = if room.players.len() >= MIN_PLAYERS_TO_START {
            RoomState::ReadyToStart
        } else {
            RoomState::Forming
        };
    }
}

/// Owns every live room. Cheap to clone; all clones share the same
/// documents and therefore the same locks.
#[derive(Clone)]
pub struct RoomTable {
    rooms: SharedDoc<RoomsDoc>,
    history: SharedDoc<HistoryDoc>,
    chats: SharedDoc<ChatDoc>,
}

impl RoomTable {
    pub fn new(
        rooms: SharedDoc<RoomsDoc>,
        history: SharedDoc<HistoryDoc>,
        chats: SharedDoc<ChatDoc>,
    ) -> Self {
        Self {
            rooms,
            history,
            chats,
        }
    }

    /// Creates a room for an already-resolved game version, with the caller
    /// as creator and sole member.
    ///
    /// Appends the creator's play-history record before releasing the table
    /// lock — no observer can see the room without the record.
    pub async fn create(
        &self,
        player: &str,
        artifact: &ResolvedArtifact,
    ) -> Result<Room, RoomError> {
        let mut rooms = self.rooms.lock().await;
        if let Some(current) = rooms.data.room_of(player) {
            return Err(RoomError::AlreadyInRoom {
                player: player.to_string(),
                room_id: current.room_id,
            });
        }

        let room_id = rooms.data.smallest_free_id();
        let room = Room {
            room_id,
            game_key: artifact.game_key.clone(),
            version: artifact.version.clone(),
            creator: player.to_string(),
            players: vec![player.to_string()],
            max_players: artifact.max_players,
            server_port: None,
            state: RoomState::Forming,
        };
        rooms.data.rooms.push(room.clone());
        rooms.persist();
        tracing::info!(%room_id, game_key = %artifact.game_key, creator = player, "room created");

        self.record_play(player, &artifact.game_key).await;
        Ok(room)
    }

    /// Adds the player to the room. Idempotent for existing members.
    pub async fn join(&self, player: &str, room_id: RoomId) -> Result<Room, RoomError> {
        let mut rooms = self.rooms.lock().await;

        if let Some(current) = rooms.data.room_of(player) {
            if current.room_id == room_id {
                // Already a member: same state both times, no duplicate entry.
                let room = current.clone();
                self.record_play(player, &room.game_key).await;
                return Ok(room);
            }
            return Err(RoomError::AlreadyInRoom {
                player: player.to_string(),
                room_id: current.room_id,
            });
        }

        let room = rooms
            .data
            .get_mut(room_id)
            .ok_or(RoomError::NotFound(room_id))?;
        if room.is_full() {
            return Err(RoomError::Full(room_id));
        }

        room.players.push(player.to_string());
        refresh_pre_start_state(room);
        let joined = room.clone();
        rooms.persist();
        tracing::info!(%room_id, player, members = joined.players.len(), "player joined");

        // History is appended before the table lock is released, so no
        // reader can observe the membership without the play record.
        self.record_play(player, &joined.game_key).await;
        Ok(joined)
    }

    /// Removes the player from whichever room contains them. An emptied
    /// room is deleted and its chat cleared.
    pub async fn leave(&self, player: &str) -> Result<(), RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room_id = rooms
            .data
            .room_of(player)
            .map(|r| r.room_id)
            .ok_or_else(|| RoomError::NotInRoom(player.to_string()))?;

        let room = rooms.data.get_mut(room_id).expect("room was just found");
        room.players.retain(|p| p != player);
        tracing::info!(%room_id, player, "player left");

        if room.players.is_empty() {
            rooms.data.rooms.retain(|r| r.room_id != room_id);
            rooms.persist();
            self.clear_chat(room_id).await;
        } else {
            refresh_pre_start_state(room);
            rooms.persist();
        }
        Ok(())
    }

    /// Deletes the room outright. Creator-only, any state.
    pub async fn delete(&self, player: &str, room_id: RoomId) -> Result<(), RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .data
            .get(room_id)
            .ok_or(RoomError::NotFound(room_id))?;
        if room.creator != player {
            return Err(RoomError::NotCreator {
                player: player.to_string(),
                room_id,
            });
        }

        rooms.data.rooms.retain(|r| r.room_id != room_id);
        rooms.persist();
        tracing::info!(%room_id, player, "room deleted");
        self.clear_chat(room_id).await;
        Ok(())
    }

    /// Starts the room's worker and transitions to `Running`.
    ///
    /// Creator-only, needs at least two members and a resolvable artifact.
    /// Calling again on a room that is already `Running` returns it as-is —
    /// a double-click must never start a second worker. The table lock is
    /// held across the launch for the same reason; the launch is bounded by
    /// the supervisor's port-reservation timeout.
    pub async fn start(
        &self,
        player: &str,
        room_id: RoomId,
        artifact: &ResolvedArtifact,
        supervisor: &Supervisor,
    ) -> Result<Room, RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .data
            .get_mut(room_id)
            .ok_or(RoomError::NotFound(room_id))?;
        if room.creator != player {
            return Err(RoomError::NotCreator {
                player: player.to_string(),
                room_id,
            });
        }
        if room.state.is_running() {
            return Ok(room.clone());
        }
        if room.players.len() < MIN_PLAYERS_TO_START {
            return Err(RoomError::NotEnoughPlayers {
                room_id,
                have: room.players.len(),
            });
        }

        let port = supervisor
            .launch(&artifact.game_key, &artifact.version, &artifact.archive, room_id)
            .await?;

        room.server_port = Some(port);
        room.state = RoomState::Running;
        let started = room.clone();
        rooms.persist();
        tracing::info!(%room_id, port, "room running");
        Ok(started)
    }

    /// Tears the room down after its worker exited — normal completion,
    /// crash, or signal alike. Unknown ids are a no-op (the creator may
    /// have deleted the room while the worker was dying).
    pub async fn reap(&self, room_id: RoomId) {
        let mut rooms = self.rooms.lock().await;
        let Some(room) = rooms.data.get_mut(room_id) else {
            tracing::debug!(%room_id, "reap: room already gone");
            return;
        };
        room.state = RoomState::Done;
        rooms.data.rooms.retain(|r| r.room_id != room_id);
        rooms.persist();
        tracing::info!(%room_id, "room reaped after worker exit");
        self.clear_chat(room_id).await;
    }

    /// Snapshot of every live room.
    pub async fn list(&self) -> Vec<Room> {
        self.rooms.lock().await.data.rooms.clone()
    }

    /// Snapshot of one room.
    pub async fn get(&self, room_id: RoomId) -> Option<Room> {
        self.rooms.lock().await.data.get(room_id).cloned()
    }

    /// The room currently containing `player`, if any.
    pub async fn room_of(&self, player: &str) -> Option<Room> {
        self.rooms.lock().await.data.room_of(player).cloned()
    }

    async fn record_play(&self, player: &str, game_key: &str) {
        let mut history = self.history.lock().await;
        history.data.records.push(PlayRecord {
            player: player.to_string(),
            game_key: game_key.to_string(),
        });
        history.persist();
    }

    async fn clear_chat(&self, room_id: RoomId) {
        let mut chats = self.chats.lock().await;
        if chat::clear(&mut chats.data, room_id) {
            chats.persist();
        }
    }
}
