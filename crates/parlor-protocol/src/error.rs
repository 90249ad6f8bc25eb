//! The request-scoped error taxonomy and protocol-layer errors.

use serde::{Deserialize, Serialize};

/// Every recoverable failure a request can be answered with.
///
/// These are wire constants: they serialize as SCREAMING_SNAKE_CASE strings
/// and never change meaning. All of them are request-scoped — none tears
/// down the connection, none crashes the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotLoggedIn,
    AlreadyInRoom,
    NotInRoom,
    RoomNotFound,
    RoomFull,
    NotEnoughPlayers,
    PermissionDenied,
    GameNotFound,
    VersionNotFound,
    ArtifactMissing,
    LaunchFailed,
    InvalidCredential,
    AccountExists,
    NotPlayed,
    InvalidScore,
    BadRequest,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotLoggedIn => "NOT_LOGGED_IN",
            Self::AlreadyInRoom => "ALREADY_IN_ROOM",
            Self::NotInRoom => "NOT_IN_ROOM",
            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::RoomFull => "ROOM_FULL",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::VersionNotFound => "VERSION_NOT_FOUND",
            Self::ArtifactMissing => "ARTIFACT_MISSING",
            Self::LaunchFailed => "LAUNCH_FAILED",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::AccountExists => "ACCOUNT_EXISTS",
            Self::NotPlayed => "NOT_PLAYED",
            Self::InvalidScore => "INVALID_SCORE",
            Self::BadRequest => "BAD_REQUEST",
        };
        f.write_str(s)
    }
}

/// Errors in the protocol layer itself: bytes that don't decode, or values
/// that don't encode.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The bytes are not a well-formed message. The connection handler drops
    /// such frames and keeps the connection alive.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// Well-formed JSON that is not a known request shape.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
