//! Integration tests for the rendezvous socket and the unlock entry point.

use std::time::{Duration, Instant};

use myisam_lock::{ErrorKind, LockError, RendezvousListener, UnlockSignaler, is_release_token};
use myisam_lock::{run_lock, run_unlock};

#[tokio::test]
async fn test_signaler_delivers_release_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.sock");
    let listener = RendezvousListener::bind(&path).unwrap();
    let signaler = UnlockSignaler::new(&path);

    let (payload, signaled) = tokio::join!(listener.receive(), signaler.signal());

    signaled.unwrap();
    let payload = payload.unwrap();
    assert!(payload.ends_with('\n'));
    assert!(is_release_token(&payload));
}

#[tokio::test]
async fn test_signaler_without_listener_gives_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.sock");

    let start = Instant::now();
    let err = UnlockSignaler::new(&path).signal().await.unwrap_err();

    assert!(matches!(err, LockError::SignalConnect { attempts: 10, .. }));
    assert_eq!(err.kind(), ErrorKind::Signal);
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[tokio::test]
async fn test_unlock_mode_removes_socket() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.sock");
    let listener = RendezvousListener::bind(&path).unwrap();

    let (payload, unlocked) = tokio::join!(listener.receive(), run_unlock(&path));

    unlocked.unwrap();
    assert!(is_release_token(&payload.unwrap()));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_lock_mode_rejects_incomplete_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("debian.cnf");
    let socket = dir.path().join("backup.sock");
    std::fs::write(
        &config,
        "[client]\nhost = localhost\nuser = debian-sys-maint\nsocket = /nonexistent/mysqld.sock\n",
    )
    .unwrap();

    let err = run_lock(&config, &socket).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(err.to_string().contains("password"));
    assert!(!socket.exists());
}

#[tokio::test]
async fn test_lock_mode_rejects_stale_socket_before_connecting() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("debian.cnf");
    let socket = dir.path().join("backup.sock");
    // The server socket does not exist: any connection attempt would fail
    // with a connection error instead.
    std::fs::write(
        &config,
        "[client]\nhost = localhost\nuser = u\npassword = p\nsocket = /nonexistent/mysqld.sock\n",
    )
    .unwrap();
    std::fs::write(&socket, b"").unwrap();

    let err = run_lock(&config, &socket).await.unwrap_err();

    assert!(matches!(err, LockError::StaleChannel(_)));
    assert!(socket.exists());
}

#[tokio::test]
async fn test_lock_mode_reports_unreachable_server() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("debian.cnf");
    let socket = dir.path().join("backup.sock");
    std::fs::write(
        &config,
        format!(
            "[client]\nhost = localhost\nuser = u\npassword = p\nsocket = {}\n",
            dir.path().join("mysqld.sock").display()
        ),
    )
    .unwrap();

    let err = run_lock(&config, &socket).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Connection);
    assert!(!socket.exists());
}
