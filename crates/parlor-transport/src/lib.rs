//! Transport layer for the parlor lobby.
//!
//! The lobby protocol is strictly request/response: a client sends one JSON
//! object per message frame and reads one JSON object back. This crate
//! provides the [`Listener`] and [`Connection`] traits that hide the framing,
//! plus the WebSocket implementation used by the orchestrator.

#![allow(async_fn_in_trait)]

mod error;
mod ws;

pub use error::TransportError;
pub use ws::{WsConnection, WsListener};

use std::fmt;

/// Opaque identifier for an accepted connection, used only for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Accepts inbound client connections.
pub trait Listener: Send + Sync + 'static {
    /// The connection type produced by this listener.
    type Connection: Connection;

    /// Waits for and accepts the next inbound connection.
    async fn accept(&mut self) -> Result<Self::Connection, TransportError>;

    /// The local address the listener is bound to.
    fn local_addr(&self) -> std::io::Result<std::net::SocketAddr>;
}

/// A single client connection carrying whole message frames.
///
/// One frame is one complete JSON document; the transport never delivers a
/// partial message.
pub trait Connection: Send + Sync + 'static {
    /// Sends one message frame to the peer.
    async fn send(&self, data: &[u8]) -> Result<(), TransportError>;

    /// Receives the next message frame from the peer.
    ///
    /// Returns `Ok(None)` when the peer closed the connection cleanly.
    async fn recv(&self) -> Result<Option<Vec<u8>>, TransportError>;

    /// Closes the connection.
    async fn close(&self) -> Result<(), TransportError>;

    /// Returns the identifier assigned at accept time.
    fn id(&self) -> ConnectionId;
}
