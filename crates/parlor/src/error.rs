//! Unified error type and the mapping onto the wire taxonomy.

use parlor_launch::LaunchError;
use parlor_protocol::{ErrorCode, ProtocolError, Response};
use parlor_room::RoomError;
use parlor_session::SessionError;
use parlor_store::{CatalogError, StoreError};
use parlor_transport::TransportError;

/// Top-level error wrapping every layer's failures.
///
/// Only transport and store variants can be fatal, and only at startup
/// (binding the listener, loading a corrupt document). Everything else is
/// request-scoped and answered on the wire via [`LobbyError::code`].
#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Room(#[from] RoomError),
}

impl LobbyError {
    /// The taxonomy constant this failure is reported as.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Session(e) => match e {
                SessionError::AccountExists(_) => ErrorCode::AccountExists,
                SessionError::InvalidCredential => ErrorCode::InvalidCredential,
                SessionError::NotOnline(_) => ErrorCode::NotLoggedIn,
            },
            Self::Catalog(e) => match e {
                CatalogError::GameNotFound(_) => ErrorCode::GameNotFound,
                CatalogError::VersionNotFound { .. } => ErrorCode::VersionNotFound,
                CatalogError::ArtifactMissing { .. } => ErrorCode::ArtifactMissing,
                CatalogError::InvalidScore(_) => ErrorCode::InvalidScore,
                CatalogError::NotPlayed { .. } => ErrorCode::NotPlayed,
            },
            Self::Room(e) => match e {
                RoomError::NotFound(_) => ErrorCode::RoomNotFound,
                RoomError::AlreadyInRoom { .. } => ErrorCode::AlreadyInRoom,
                RoomError::NotInRoom(_) => ErrorCode::NotInRoom,
                RoomError::Full(_) => ErrorCode::RoomFull,
                RoomError::NotCreator { .. } => ErrorCode::PermissionDenied,
                RoomError::NotEnoughPlayers { .. } => ErrorCode::NotEnoughPlayers,
                RoomError::Launch(LaunchError::ArtifactMissing(_)) => ErrorCode::ArtifactMissing,
                RoomError::Launch(_) => ErrorCode::LaunchFailed,
            },
            // Transport/protocol/store failures reaching a response at all
            // means the request itself was unusable.
            Self::Transport(_) | Self::Protocol(_) | Self::Store(_) => ErrorCode::BadRequest,
        }
    }

    /// The structured error answer for a request-scoped failure.
    pub fn to_response(&self) -> Response {
        Response::error(self.code(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_protocol::RoomId;

    #[test]
    fn test_session_errors_map_to_taxonomy() {
        let err: LobbyError = SessionError::AccountExists("alice".into()).into();
        assert_eq!(err.code(), ErrorCode::AccountExists);

        let err: LobbyError = SessionError::InvalidCredential.into();
        assert_eq!(err.code(), ErrorCode::InvalidCredential);

        let err: LobbyError = SessionError::NotOnline("alice".into()).into();
        assert_eq!(err.code(), ErrorCode::NotLoggedIn);
    }

    #[test]
    fn test_room_errors_map_to_taxonomy() {
        let err: LobbyError = RoomError::NotFound(RoomId(1)).into();
        assert_eq!(err.code(), ErrorCode::RoomNotFound);

        let err: LobbyError = RoomError::NotCreator {
            player: "bob".into(),
            room_id: RoomId(1),
        }
        .into();
        assert_eq!(err.code(), ErrorCode::PermissionDenied);

        let err: LobbyError = RoomError::NotEnoughPlayers {
            room_id: RoomId(1),
            have: 1,
        }
        .into();
        assert_eq!(err.code(), ErrorCode::NotEnoughPlayers);
    }

    #[test]
    fn test_launch_failures_split_missing_artifact_from_the_rest() {
        let err: LobbyError =
            RoomError::Launch(LaunchError::ArtifactMissing("gone.zip".into())).into();
        assert_eq!(err.code(), ErrorCode::ArtifactMissing);

        let err: LobbyError = RoomError::Launch(LaunchError::PortTimeout).into();
        assert_eq!(err.code(), ErrorCode::LaunchFailed);
    }

    #[test]
    fn test_to_response_carries_code_and_message() {
        let err: LobbyError = RoomError::NotFound(RoomId(9)).into();
        let resp = err.to_response();
        let json: serde_json::Value = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "ROOM_NOT_FOUND");
        assert_eq!(json["message"], "room room-9 not found");
    }
}
