//! The chat relay: append-only per-room logs, gated on membership.

use std::collections::BTreeMap;

use parlor_protocol::{ChatLine, RoomId};
use parlor_store::SharedDoc;
use serde::{Deserialize, Serialize};

use crate::RoomError;
use crate::table::RoomsDoc;

/// The persisted chat document (`chats.json`). Keys are decimal room ids,
/// logs are created lazily on first send.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatDoc {
    #[serde(default)]
    pub rooms: BTreeMap<String, Vec<ChatLine>>,
}

/// Drops a room's log. Returns `true` if there was one.
pub(crate) fn clear(doc: &mut ChatDoc, room_id: RoomId) -> bool {
    doc.rooms.remove(&room_id.0.to_string()).is_some()
}

/// Membership-gated chat over the room table's documents.
///
/// Both operations re-check membership against the live room table on every
/// call; there is no chat-side membership cache to fall out of date.
#[derive(Clone)]
pub struct ChatRelay {
    rooms: SharedDoc<RoomsDoc>,
    chats: SharedDoc<ChatDoc>,
}

impl ChatRelay {
    pub fn new(rooms: SharedDoc<RoomsDoc>, chats: SharedDoc<ChatDoc>) -> Self {
        Self { rooms, chats }
    }

    /// Appends one line to the room's log.
    ///
    /// The sender must currently be a member of exactly `room_id`:
    /// a missing room is [`RoomError::NotFound`], a sender elsewhere (or
    /// nowhere) is [`RoomError::NotInRoom`].
    pub async fn send(
        &self,
        room_id: RoomId,
        player: &str,
        message: String,
    ) -> Result<(), RoomError> {
        let rooms = self.rooms.lock().await;
        check_membership(&rooms.data, room_id, player)?;

        let mut chats = self.chats.lock().await;
        chats
            .data
            .rooms
            .entry(room_id.0.to_string())
            .or_default()
            .push(ChatLine {
                player: player.to_string(),
                message,
            });
        chats.persist();
        Ok(())
    }

    /// Returns the room's full log, oldest first. Same membership gate as
    /// [`send`](Self::send).
    pub async fn fetch(&self, room_id: RoomId, player: &str) -> Result<Vec<ChatLine>, RoomError> {
        let rooms = self.rooms.lock().await;
        check_membership(&rooms.data, room_id, player)?;

        let chats = self.chats.lock().await;
        Ok(chats
            .data
            .rooms
            .get(&room_id.0.to_string())
            .cloned()
            .unwrap_or_default())
    }
}

fn check_membership(rooms: &RoomsDoc, room_id: RoomId, player: &str) -> Result<(), RoomError> {
    let room = rooms
        .rooms
        .iter()
        .find(|r| r.room_id == room_id)
        .ok_or(RoomError::NotFound(room_id))?;
    if !room.has_player(player) {
        return Err(RoomError::NotInRoom(player.to_string()));
    }
    Ok(())
}
