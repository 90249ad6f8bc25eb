//! Error types for worker launching.

use std::path::PathBuf;

/// Errors raised while staging or starting a worker process.
///
/// None of these transition a room to running; the caller reports the
/// failure and the room stays where it was.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The artifact archive is not on disk.
    #[error("artifact missing: {0}")]
    ArtifactMissing(PathBuf),

    /// The archive exists but could not be unpacked.
    #[error("unpack failed for {archive}: {source}")]
    Unpack {
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The unpack task was cancelled before finishing.
    #[error("unpack task aborted")]
    UnpackAborted,

    /// The unpacked artifact has no entrypoint to execute.
    #[error("no entrypoint {entrypoint} in {dir}")]
    MissingEntrypoint { dir: PathBuf, entrypoint: String },

    /// The OS did not supply an ephemeral port within the deadline.
    #[error("timed out reserving a port")]
    PortTimeout,

    /// Binding the reservation socket failed outright.
    #[error("port reservation failed: {0}")]
    PortUnavailable(#[source] std::io::Error),

    /// The worker process could not be spawned.
    #[error("spawn failed: {0}")]
    Spawn(#[source] std::io::Error),

    /// Filesystem trouble while staging the runtime directory.
    #[error("launch io: {0}")]
    Io(#[from] std::io::Error),
}
