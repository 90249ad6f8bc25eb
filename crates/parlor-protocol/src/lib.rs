//! Wire protocol for the parlor lobby.
//!
//! Defines the shared vocabulary spoken between lobby clients and the
//! orchestrator: one JSON request per exchange, tagged by `action`, answered
//! by one JSON response tagged by `status`.
//!
//! # Key types
//!
//! - [`Request`] — every action a client can ask for
//! - [`Response`] / [`Body`] — the answer shapes
//! - [`Room`] — the room record, identical on the wire and on disk
//! - [`ErrorCode`] — the request-scoped failure taxonomy
//! - [`Codec`] / [`JsonCodec`] — byte-level encoding

mod codec;
mod error;
mod request;
mod response;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::{ErrorCode, ProtocolError};
pub use request::Request;
pub use response::{Body, GameDetail, GameSummary, Response};
pub use types::{ChatLine, Rating, Room, RoomId, RoomState};
