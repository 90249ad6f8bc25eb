//! Artifact staging: unpack a game archive into its runtime directory once.

use std::fs;
use std::path::{Path, PathBuf};

use crate::LaunchError;

/// Unpacks `archive` into `runtime_dir`, reusing a previous unpack.
///
/// A runtime directory that exists and is non-empty is taken as already
/// staged — every room of the same `(game_key, version)` shares it.
pub fn ensure_unpacked(archive: &Path, runtime_dir: &Path) -> Result<PathBuf, LaunchError> {
    if is_staged(runtime_dir) {
        return Ok(runtime_dir.to_path_buf());
    }

    if !archive.exists() {
        return Err(LaunchError::ArtifactMissing(archive.to_path_buf()));
    }

    fs::create_dir_all(runtime_dir)?;

    let file = fs::File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|source| LaunchError::Unpack {
        archive: archive.to_path_buf(),
        source,
    })?;
    zip.extract(runtime_dir).map_err(|source| LaunchError::Unpack {
        archive: archive.to_path_buf(),
        source,
    })?;

    tracing::info!(
        archive = %archive.display(),
        runtime = %runtime_dir.display(),
        "artifact unpacked"
    );
    Ok(runtime_dir.to_path_buf())
}

fn is_staged(dir: &Path) -> bool {
    match fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Writes a zip with one `game_server.sh` entry.
    fn write_archive(path: &Path, script: &str) {
        let file = fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("game_server.sh", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(script.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_unpack_extracts_entries() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("game.zip");
        write_archive(&archive, "exit 0\n");

        let runtime = dir.path().join("runtime/dev_guess/1.0");
        ensure_unpacked(&archive, &runtime).unwrap();

        assert_eq!(
            fs::read_to_string(runtime.join("game_server.sh")).unwrap(),
            "exit 0\n"
        );
    }

    #[test]
    fn test_unpack_is_idempotent_and_reuses_staging() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("game.zip");
        write_archive(&archive, "exit 0\n");

        let runtime = dir.path().join("runtime/dev_guess/1.0");
        ensure_unpacked(&archive, &runtime).unwrap();

        // Leave a marker; a second call must not re-extract over it.
        fs::write(runtime.join("marker"), b"keep me").unwrap();
        ensure_unpacked(&archive, &runtime).unwrap();

        assert_eq!(fs::read(runtime.join("marker")).unwrap(), b"keep me");
    }

    #[test]
    fn test_unpack_missing_archive_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = ensure_unpacked(
            &dir.path().join("nope.zip"),
            &dir.path().join("runtime/x/1"),
        );
        assert!(matches!(result, Err(LaunchError::ArtifactMissing(_))));
    }

    #[test]
    fn test_unpack_garbage_archive_errors() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("bad.zip");
        fs::write(&archive, b"this is not a zip").unwrap();

        let result = ensure_unpacked(&archive, &dir.path().join("runtime/x/1"));
        assert!(matches!(result, Err(LaunchError::Unpack { .. })));
    }
}
