//! One JSON file, fully loaded and atomically rewritten.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::StoreError;

/// A document shared across tasks behind a single async lock.
///
/// One lock per document is the whole concurrency discipline of the store:
/// hold it for the critical section, release it before any client I/O.
pub type SharedDoc<T> = Arc<tokio::sync::Mutex<JsonDocument<T>>>;

/// An in-memory table mirrored to a single JSON file.
///
/// The in-memory `data` is authoritative; [`save`](Self::save) rewrites the
/// whole file. A missing file on open yields `T::default()` — first launch
/// needs no seed files.
#[derive(Debug)]
pub struct JsonDocument<T> {
    path: PathBuf,
    pub data: T,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Loads the document at `path`, or starts empty if the file is absent.
    ///
    /// Parent directories are created so a fresh data dir just works.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = if path.exists() {
            let bytes = fs::read(&path)?;
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?
        } else {
            T::default()
        };

        Ok(Self { path, data })
    }

    /// Atomically replaces the file with the current in-memory state.
    ///
    /// Serializes to a sibling temp file with a random suffix, then renames
    /// it over the target. Concurrent savers of *different* documents never
    /// collide; savers of the same document are serialized by the document
    /// lock above this layer.
    pub fn save(&self) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&self.data).map_err(StoreError::Encode)?;

        let suffix: u32 = rand::rng().random();
        let tmp = self.path.with_extension(format!("{suffix:08x}.tmp"));

        fs::write(&tmp, &bytes)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    /// Logs instead of propagating a failed save.
    ///
    /// The store is best-effort file-backed state: the in-memory tables stay
    /// correct even when the disk does not cooperate, and a request must not
    /// fail because a mirror write did.
    pub fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!(path = %self.path.display(), error = %e, "document save failed");
        }
    }

    /// Wraps the document for cross-task sharing.
    pub fn shared(self) -> SharedDoc<T> {
        Arc::new(tokio::sync::Mutex::new(self))
    }

    /// The file this document mirrors to.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Table {
        entries: Vec<String>,
    }

    #[test]
    fn test_open_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let doc: JsonDocument<Table> = JsonDocument::open(dir.path().join("t.json")).unwrap();
        assert_eq!(doc.data, Table::default());
    }

    #[test]
    fn test_save_then_open_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");

        let mut doc: JsonDocument<Table> = JsonDocument::open(&path).unwrap();
        doc.data.entries.push("alpha".into());
        doc.save().unwrap();

        let reopened: JsonDocument<Table> = JsonDocument::open(&path).unwrap();
        assert_eq!(reopened.data.entries, vec!["alpha".to_string()]);
    }

    #[test]
    fn test_save_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");

        let mut doc: JsonDocument<Table> = JsonDocument::open(&path).unwrap();
        doc.data.entries.push("alpha".into());
        doc.save().unwrap();
        doc.data.entries.push("beta".into());
        doc.save().unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["t.json".to_string()]);
    }

    #[test]
    fn test_save_replaces_prior_contents_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");

        let mut doc: JsonDocument<Table> = JsonDocument::open(&path).unwrap();
        doc.data.entries = vec!["old".into(), "state".into()];
        doc.save().unwrap();

        doc.data.entries = vec!["new".into()];
        doc.save().unwrap();

        let reopened: JsonDocument<Table> = JsonDocument::open(&path).unwrap();
        assert_eq!(reopened.data.entries, vec!["new".to_string()]);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/t.json");
        let doc: JsonDocument<Table> = JsonDocument::open(&path).unwrap();
        doc.save().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        fs::write(&path, b"{ not json").unwrap();

        let result: Result<JsonDocument<Table>, _> = JsonDocument::open(&path);
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }
}
