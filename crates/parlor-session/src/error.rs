//! Error types for the session registry.

/// Errors raised by account and presence operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Registration under a name that already exists.
    #[error("account {0} already exists")]
    AccountExists(String),

    /// Unknown name or wrong password. Deliberately one error for both, so
    /// login failures don't reveal which names are taken.
    #[error("invalid credentials")]
    InvalidCredential,

    /// The account is not currently online (never logged in, logged out, or
    /// expired by the sweep).
    #[error("{0} is not logged in")]
    NotOnline(String),
}
