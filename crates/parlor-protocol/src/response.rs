//! Server responses: `{"status":"ok", ...payload}` or a structured error.

use serde::{Deserialize, Serialize};

use crate::{ChatLine, ErrorCode, Rating, Room};

/// One catalog entry as listed by `get_games`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub game_key: String,
    pub name: String,
    pub owner: String,
    pub description: String,
    pub latest_version: String,
    /// Arithmetic mean of all scores; `null` when nothing has been rated.
    pub avg_score: Option<f64>,
    pub rating_count: usize,
}

/// The `get_game_detail` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDetail {
    pub game_key: String,
    pub name: String,
    pub owner: String,
    pub description: String,
    pub avg_score: Option<f64>,
    pub rating_count: usize,
    /// The most recent ratings, capped at five.
    pub comments: Vec<Rating>,
}

/// A response to exactly one request.
///
/// Serialized with `status` as the tag, so clients branch on a single field:
/// `{"status":"ok",...}` or `{"status":"error","code":...,"message":...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok {
        #[serde(flatten)]
        body: Body,
    },
    Error { code: ErrorCode, message: String },
}

/// The success payloads from the action table, flattened next to `status`.
///
/// Untagged: the payload's own field names identify the variant. Variant
/// order matters for deserialization — shapes with distinctive required
/// fields come first, the bare `Message` and `Empty` shapes last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Body {
    Detail(GameDetail),
    Room {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        room: Room,
    },
    Rooms { rooms: Vec<Room> },
    Games { games: Vec<GameSummary> },
    Players { players: Vec<String> },
    Chat { messages: Vec<ChatLine> },
    Message { message: String },
    Empty {},
}

impl Response {
    /// A bare `{"status":"ok"}`.
    pub fn ok() -> Self {
        Self::Ok { body: Body::Empty {} }
    }

    /// `{"status":"ok","message":...}`.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Ok {
            body: Body::Message { message: message.into() },
        }
    }

    /// A room payload, optionally with a human-readable note.
    pub fn room(message: Option<String>, room: Room) -> Self {
        Self::Ok {
            body: Body::Room { message, room },
        }
    }

    /// A structured error from the taxonomy.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error {
            code,
            message: message.into(),
        }
    }

    /// Returns `true` for `status: ok`.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}
