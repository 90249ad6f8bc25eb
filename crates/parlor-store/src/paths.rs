//! On-disk layout of the lobby data directory.

use std::path::{Path, PathBuf};

/// Resolves every file and directory the orchestrator touches under one
/// data directory:
///
/// ```text
/// <data_dir>/registry.json   accounts + catalog
/// <data_dir>/rooms.json      room table
/// <data_dir>/history.json    play-history records
/// <data_dir>/chats.json      per-room chat logs
/// <data_dir>/runtime/        unpacked worker artifacts
/// ```
#[derive(Debug, Clone)]
pub struct LobbyPaths {
    data_dir: PathBuf,
}

impl LobbyPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn registry(&self) -> PathBuf {
        self.data_dir.join("registry.json")
    }

    pub fn rooms(&self) -> PathBuf {
        self.data_dir.join("rooms.json")
    }

    pub fn history(&self) -> PathBuf {
        self.data_dir.join("history.json")
    }

    pub fn chats(&self) -> PathBuf {
        self.data_dir.join("chats.json")
    }

    /// Root of the per-version worker runtime directories.
    pub fn runtime(&self) -> PathBuf {
        self.data_dir.join("runtime")
    }

    /// Resolves a catalog artifact path: absolute paths pass through,
    /// relative ones anchor at the data directory.
    pub fn resolve_artifact(&self, artifact: &Path) -> PathBuf {
        if artifact.is_absolute() {
            artifact.to_path_buf()
        } else {
            self.data_dir.join(artifact)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_data_dir() {
        let paths = LobbyPaths::new("/var/lib/parlor");
        assert_eq!(paths.registry(), PathBuf::from("/var/lib/parlor/registry.json"));
        assert_eq!(paths.rooms(), PathBuf::from("/var/lib/parlor/rooms.json"));
        assert_eq!(paths.history(), PathBuf::from("/var/lib/parlor/history.json"));
        assert_eq!(paths.chats(), PathBuf::from("/var/lib/parlor/chats.json"));
        assert_eq!(paths.runtime(), PathBuf::from("/var/lib/parlor/runtime"));
    }

    #[test]
    fn test_resolve_artifact_relative_and_absolute() {
        let paths = LobbyPaths::new("/data");
        assert_eq!(
            paths.resolve_artifact(Path::new("uploads/g.zip")),
            PathBuf::from("/data/uploads/g.zip")
        );
        assert_eq!(
            paths.resolve_artifact(Path::new("/elsewhere/g.zip")),
            PathBuf::from("/elsewhere/g.zip")
        );
    }
}
