//! Client requests: one JSON object per exchange, tagged by `action`.

use serde::{Deserialize, Serialize};

use crate::RoomId;

/// Every action a lobby client can request.
///
/// `#[serde(tag = "action")]` gives the flat wire shape
/// `{"action": "create_room", "player": "alice", ...}` — no nesting, so a
/// request is exactly one self-describing JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    // -- Accounts & presence --
    PlayerRegister { name: String, password: String },
    PlayerLogin { name: String, password: String },
    PlayerLogout { name: String },
    PlayerHeartbeat { name: String },
    ListPlayers,

    // -- Catalog & ratings --
    GetGames,
    GetGameDetail {
        game_key: String,
    },
    SubmitRating {
        player: String,
        game_key: String,
        score: u8,
        #[serde(default)]
        comment: String,
    },

    // -- Rooms --
    CreateRoom {
        player: String,
        game_key: String,
        version: String,
    },
    ListRooms,
    JoinRoom {
        player: String,
        room_id: RoomId,
    },
    LeaveRoom {
        player: String,
    },
    DeleteRoom {
        player: String,
        room_id: RoomId,
    },
    StartRoom {
        player: String,
        room_id: RoomId,
    },

    // -- Chat --
    RoomChatSend {
        room_id: RoomId,
        player: String,
        message: String,
    },
    RoomChatFetch {
        room_id: RoomId,
        player: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_parses_from_wire_shape() {
        let req: Request = serde_json::from_str(
            r#"{"action":"player_register","name":"alice","password":"pw"}"#,
        )
        .unwrap();
        assert_eq!(
            req,
            Request::PlayerRegister {
                name: "alice".into(),
                password: "pw".into()
            }
        );
    }

    #[test]
    fn test_create_room_parses_from_wire_shape() {
        let req: Request = serde_json::from_str(
            r#"{"action":"create_room","player":"alice","game_key":"dev_guess","version":"1.0"}"#,
        )
        .unwrap();
        assert_eq!(
            req,
            Request::CreateRoom {
                player: "alice".into(),
                game_key: "dev_guess".into(),
                version: "1.0".into()
            }
        );
    }

    #[test]
    fn test_fieldless_actions_parse() {
        let req: Request = serde_json::from_str(r#"{"action":"list_players"}"#).unwrap();
        assert_eq!(req, Request::ListPlayers);
        let req: Request = serde_json::from_str(r#"{"action":"get_games"}"#).unwrap();
        assert_eq!(req, Request::GetGames);
        let req: Request = serde_json::from_str(r#"{"action":"list_rooms"}"#).unwrap();
        assert_eq!(req, Request::ListRooms);
    }

    #[test]
    fn test_submit_rating_comment_optional() {
        let req: Request = serde_json::from_str(
            r#"{"action":"submit_rating","player":"a","game_key":"g","score":4}"#,
        )
        .unwrap();
        assert_eq!(
            req,
            Request::SubmitRating {
                player: "a".into(),
                game_key: "g".into(),
                score: 4,
                comment: String::new()
            }
        );
    }

    #[test]
    fn test_chat_send_round_trip() {
        let req = Request::RoomChatSend {
            room_id: RoomId(1),
            player: "alice".into(),
            message: "hello".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(json["action"], "room_chat_send");
        assert_eq!(json["room_id"], 1);
        let back: Request = serde_json::from_value(json).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result: Result<Request, _> =
            serde_json::from_str(r#"{"action":"fly_to_moon","speed":9000}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let result: Result<Request, _> =
            serde_json::from_str(r#"{"action":"join_room","player":"alice"}"#);
        assert!(result.is_err());
    }
}
