//! Error types for the room layer.

use parlor_launch::LaunchError;
use parlor_protocol::RoomId;

/// Errors that can occur during room and chat operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// No room with this id.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The player is already a member of some room. A player belongs to at
    /// most one room system-wide.
    #[error("{player} is already in room {room_id}")]
    AlreadyInRoom { player: String, room_id: RoomId },

    /// The player is in no room (or not in the room they addressed).
    #[error("{0} is not in that room")]
    NotInRoom(String),

    /// No member slot left for this game's capacity.
    #[error("room {0} is full")]
    Full(RoomId),

    /// A creator-only action attempted by someone else.
    #[error("only the creator of room {room_id} may do that, not {player}")]
    NotCreator { player: String, room_id: RoomId },

    /// `start_room` with fewer than two members.
    #[error("room {room_id} has {have} player(s), needs at least 2")]
    NotEnoughPlayers { room_id: RoomId, have: usize },

    /// The worker failed to launch; the room stays un-started.
    #[error(transparent)]
    Launch(#[from] LaunchError),
}
