//! Integration tests: launch real (stub) worker processes and watch them exit.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use parlor_launch::{LaunchConfig, LaunchError, Supervisor};
use parlor_protocol::RoomId;

/// Writes a zip whose `game_server.sh` runs the given shell script.
fn stub_artifact(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("game_server.sh", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(script.as_bytes()).unwrap();
    zip.finish().unwrap();
    path
}

/// Stub workers are plain shell scripts run through `sh`.
fn sh_config() -> LaunchConfig {
    LaunchConfig {
        entrypoint: "game_server.sh".to_string(),
        runner: Some(PathBuf::from("sh")),
        port_timeout: Duration::from_secs(2),
    }
}

#[tokio::test]
async fn test_launch_reports_exit_on_channel() {
    let dir = tempfile::tempdir().unwrap();
    let archive = stub_artifact(dir.path(), "game.zip", "exit 0\n");
    let (supervisor, mut exits) = Supervisor::new(dir.path().join("runtime"), sh_config());

    let port = supervisor
        .launch("dev_guess", "1.0", &archive, RoomId(7))
        .await
        .expect("launch");
    assert!(port > 0);

    let exited = tokio::time::timeout(Duration::from_secs(5), exits.recv())
        .await
        .expect("worker should exit promptly")
        .expect("channel open");
    assert_eq!(exited, RoomId(7));
}

#[tokio::test]
async fn test_launch_reports_crashed_worker_the_same_way() {
    // A nonzero exit is indistinguishable from a normal finish: both reap.
    let dir = tempfile::tempdir().unwrap();
    let archive = stub_artifact(dir.path(), "game.zip", "exit 3\n");
    let (supervisor, mut exits) = Supervisor::new(dir.path().join("runtime"), sh_config());

    supervisor
        .launch("dev_guess", "1.0", &archive, RoomId(2))
        .await
        .expect("launch");

    let exited = tokio::time::timeout(Duration::from_secs(5), exits.recv())
        .await
        .expect("worker should exit promptly")
        .expect("channel open");
    assert_eq!(exited, RoomId(2));
}

#[tokio::test]
async fn test_launch_passes_port_and_room_id() {
    // The worker writes its argv to a file; check the contract is exactly
    // --port <port> --room-id <id>.
    let dir = tempfile::tempdir().unwrap();
    let archive = stub_artifact(dir.path(), "game.zip", "echo \"$@\" > argv.txt\n");
    let (supervisor, mut exits) = Supervisor::new(dir.path().join("runtime"), sh_config());

    let port = supervisor
        .launch("dev_guess", "1.0", &archive, RoomId(5))
        .await
        .expect("launch");
    exits.recv().await.expect("worker exit");

    let argv = std::fs::read_to_string(
        dir.path().join("runtime/dev_guess/1.0/argv.txt"),
    )
    .unwrap();
    assert_eq!(argv.trim(), format!("--port {port} --room-id 5"));
}

#[tokio::test]
async fn test_launch_missing_archive_fails_without_exit_event() {
    let dir = tempfile::tempdir().unwrap();
    let (supervisor, mut exits) = Supervisor::new(dir.path().join("runtime"), sh_config());

    let result = supervisor
        .launch("dev_guess", "1.0", &dir.path().join("gone.zip"), RoomId(1))
        .await;

    assert!(matches!(result, Err(LaunchError::ArtifactMissing(_))));
    assert!(exits.try_recv().is_err(), "no exit event for a failed launch");
}

#[tokio::test]
async fn test_launch_missing_entrypoint_fails() {
    let dir = tempfile::tempdir().unwrap();
    let archive = stub_artifact(dir.path(), "game.zip", "exit 0\n");
    let config = LaunchConfig {
        entrypoint: "does_not_exist.sh".to_string(),
        ..sh_config()
    };
    let (supervisor, _exits) = Supervisor::new(dir.path().join("runtime"), config);

    let result = supervisor
        .launch("dev_guess", "1.0", &archive, RoomId(1))
        .await;

    assert!(matches!(result, Err(LaunchError::MissingEntrypoint { .. })));
}

#[tokio::test]
async fn test_concurrent_launches_get_usable_ports() {
    let dir = tempfile::tempdir().unwrap();
    let archive = stub_artifact(dir.path(), "game.zip", "exit 0\n");
    let (supervisor, mut exits) = Supervisor::new(dir.path().join("runtime"), sh_config());

    let a = supervisor.launch("dev_guess", "1.0", &archive, RoomId(1));
    let b = supervisor.launch("dev_guess", "1.0", &archive, RoomId(2));
    let (a, b) = tokio::join!(a, b);
    assert!(a.unwrap() > 0);
    assert!(b.unwrap() > 0);

    let mut seen = Vec::new();
    for _ in 0..2 {
        let id = tokio::time::timeout(Duration::from_secs(5), exits.recv())
            .await
            .expect("exit")
            .expect("channel open");
        seen.push(id);
    }
    seen.sort();
    assert_eq!(seen, vec![RoomId(1), RoomId(2)]);
}
