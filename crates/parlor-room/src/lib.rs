//! Room lifecycle management for the parlor lobby.
//!
//! The [`RoomTable`] owns every room: creation with dense id allocation,
//! membership with the one-room-per-player invariant, creator-gated start
//! and deletion, and the teardown invoked when a worker exits. The
//! [`ChatRelay`] rides along: an append-only per-room log gated on current
//! membership, cleared whenever its room dies.
//!
//! # Key types
//!
//! - [`RoomTable`] — the state machine over the persisted room document
//! - [`ChatRelay`] — membership-gated room chat
//! - [`RoomError`] — every way a room operation can fail

mod chat;
mod error;
mod table;

pub use chat::{ChatDoc, ChatRelay};
pub use error::RoomError;
pub use table::{RoomTable, RoomsDoc};
