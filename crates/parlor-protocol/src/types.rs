//! Shared record types: rooms, ratings, chat lines.
//!
//! The lobby persists the same shapes it sends on the wire — a [`Room`] in
//! `rooms.json` is byte-for-byte the `room` object a client receives. Keeping
//! these in the protocol crate gives the session, room, and store layers one
//! vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A room's numeric identifier.
///
/// Ids are allocated as the smallest unused positive integer, so they stay
/// small, dense, and deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room-{}", self.0)
    }
}

/// The lifecycle state of a room.
///
/// ```text
/// Forming ⇄ ReadyToStart ──(start_room)──→ Running ──(worker exit)──→ Done
/// ```
///
/// `Forming` and `ReadyToStart` differ only in whether the membership has
/// crossed the two-player start threshold; both accept joins and starts.
/// `Running` rooms are owned by a live worker process. `Done` is transient:
/// it is set during teardown, immediately before the room leaves the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomState {
    Forming,
    ReadyToStart,
    Running,
    Done,
}

impl RoomState {
    /// Returns `true` while the room has not started its worker yet.
    pub fn is_pre_start(&self) -> bool {
        matches!(self, Self::Forming | Self::ReadyToStart)
    }

    /// Returns `true` once a worker owns this room.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for RoomState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Forming => "forming",
            Self::ReadyToStart => "ready_to_start",
            Self::Running => "running",
            Self::Done => "done",
        };
        f.write_str(s)
    }
}

/// One matchmaking unit: a game version bound to a set of players and, once
/// started, to a worker's port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: RoomId,
    pub game_key: String,
    pub version: String,
    pub creator: String,
    /// Ordered, duplicate-free member names. The creator is always first.
    pub players: Vec<String>,
    /// Capacity copied from the catalog entry at creation time.
    pub max_players: usize,
    /// Populated by `start_room`; `None` while the room is pre-start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_port: Option<u16>,
    pub state: RoomState,
}

impl Room {
    /// Returns `true` if `player` is a member.
    pub fn has_player(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    /// Returns `true` when no further member fits.
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }
}

/// One submitted rating. Ratings are append-only and never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub player: String,
    pub score: u8,
    #[serde(default)]
    pub comment: String,
}

/// One chat message in a room's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatLine {
    pub player: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&RoomId(4)).unwrap(), "4");
        let id: RoomId = serde_json::from_str("4").unwrap();
        assert_eq!(id, RoomId(4));
    }

    #[test]
    fn test_room_id_display() {
        assert_eq!(RoomId(7).to_string(), "room-7");
    }

    #[test]
    fn test_room_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RoomState::ReadyToStart).unwrap(),
            "\"ready_to_start\""
        );
        assert_eq!(serde_json::to_string(&RoomState::Forming).unwrap(), "\"forming\"");
    }

    #[test]
    fn test_room_state_predicates() {
        assert!(RoomState::Forming.is_pre_start());
        assert!(RoomState::ReadyToStart.is_pre_start());
        assert!(!RoomState::Running.is_pre_start());
        assert!(RoomState::Running.is_running());
        assert!(!RoomState::Done.is_running());
    }

    #[test]
    fn test_room_omits_port_until_started() {
        let room = Room {
            room_id: RoomId(1),
            game_key: "dev_guess".into(),
            version: "1.0".into(),
            creator: "alice".into(),
            players: vec!["alice".into()],
            max_players: 2,
            server_port: None,
            state: RoomState::Forming,
        };
        let json: serde_json::Value = serde_json::to_value(&room).unwrap();
        assert!(json.get("server_port").is_none());
        assert_eq!(json["state"], "forming");
    }

    #[test]
    fn test_room_round_trip_with_port() {
        let room = Room {
            room_id: RoomId(2),
            game_key: "dev_rps".into(),
            version: "2.1".into(),
            creator: "bob".into(),
            players: vec!["bob".into(), "carol".into()],
            max_players: 2,
            server_port: Some(40123),
            state: RoomState::Running,
        };
        let bytes = serde_json::to_vec(&room).unwrap();
        let decoded: Room = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(room, decoded);
    }

    #[test]
    fn test_room_membership_helpers() {
        let room = Room {
            room_id: RoomId(3),
            game_key: "dev_snake".into(),
            version: "1.0".into(),
            creator: "alice".into(),
            players: vec!["alice".into(), "bob".into()],
            max_players: 2,
            server_port: None,
            state: RoomState::ReadyToStart,
        };
        assert!(room.has_player("alice"));
        assert!(!room.has_player("carol"));
        assert!(room.is_full());
    }

    #[test]
    fn test_rating_comment_defaults_empty() {
        let r: Rating = serde_json::from_str(r#"{"player":"a","score":5}"#).unwrap();
        assert_eq!(r.comment, "");
    }
}
