//! Error type for the transport layer.

/// Errors that can occur while listening, sending, or receiving.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Binding the listening socket failed. This is the one startup error
    /// the orchestrator treats as fatal.
    #[error("bind failed: {0}")]
    Bind(#[source] std::io::Error),

    /// Accepting an inbound connection failed.
    #[error("accept failed: {0}")]
    Accept(#[source] std::io::Error),

    /// Sending a frame failed.
    #[error("send failed: {0}")]
    Send(#[source] std::io::Error),

    /// Receiving a frame failed.
    #[error("receive failed: {0}")]
    Recv(#[source] std::io::Error),

    /// The connection is already closed.
    #[error("connection closed: {0}")]
    Closed(String),
}
