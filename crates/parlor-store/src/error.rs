//! Error types for the store layer.

use std::path::PathBuf;

/// Errors raised by document load/save.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem trouble reading or replacing a document.
    #[error("store io: {0}")]
    Io(#[from] std::io::Error),

    /// The in-memory table failed to serialize.
    #[error("store encode: {0}")]
    Encode(#[source] serde_json::Error),

    /// The on-disk document is not valid JSON for its table.
    #[error("corrupt document {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the catalog & rating service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No active catalog entry under this key.
    #[error("game {0} not found")]
    GameNotFound(String),

    /// The entry exists but has no such version label.
    #[error("game {game_key} has no version {version}")]
    VersionNotFound { game_key: String, version: String },

    /// The version resolves to a file that is not on disk.
    #[error("artifact missing for {game_key} {version}: {path}")]
    ArtifactMissing {
        game_key: String,
        version: String,
        path: PathBuf,
    },

    /// Score outside 1..=5.
    #[error("score {0} out of range 1..=5")]
    InvalidScore(u8),

    /// The player has no play-history record for this game.
    #[error("{player} has not played {game_key}")]
    NotPlayed { player: String, game_key: String },
}
