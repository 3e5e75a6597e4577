//! Integration tests against a live MySQL server.
//!
//! Run with `cargo test -- --ignored` and `MYSQL_SOCKET`, `MYSQL_USER`,
//! `MYSQL_PASSWORD` pointing at a disposable server.

use std::time::Duration;

use myisam_lock::{
    BackupSession, ConnectionParameters, LockHolder, LockState, MySqlSession, UnlockSignaler,
};

fn params() -> ConnectionParameters {
    let env = |key: &str, default: &str| std::env::var(key).unwrap_or_else(|_| default.to_string());
    ConnectionParameters::new(
        env("MYSQL_USER", "root"),
        env("MYSQL_PASSWORD", "password"),
        env("MYSQL_SOCKET", "/var/run/mysqld/mysqld.sock"),
    )
}

#[tokio::test]
#[ignore] // Requires MySQL server running
async fn test_selects_myisam_tables() {
    let mut session = MySqlSession::connect(&params()).await.unwrap();
    session
        .execute("CREATE DATABASE IF NOT EXISTS myisam_lock_test")
        .await
        .unwrap();
    session
        .execute("CREATE TABLE IF NOT EXISTS myisam_lock_test.frozen (id INT) ENGINE=MyISAM")
        .await
        .unwrap();
    session
        .execute("CREATE TABLE IF NOT EXISTS myisam_lock_test.live (id INT) ENGINE=InnoDB")
        .await
        .unwrap();

    let tables = session.select_tables().await.unwrap();
    let names: Vec<String> = tables.iter().map(ToString::to_string).collect();

    assert!(names.contains(&"myisam_lock_test.frozen".to_string()));
    assert!(!names.contains(&"myisam_lock_test.live".to_string()));
    assert!(names.iter().all(|n| !n.starts_with("mysql.")));

    session.close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires MySQL server running
async fn test_lock_and_release_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.sock");

    let mut session = MySqlSession::connect(&params()).await.unwrap();
    session
        .execute("CREATE DATABASE IF NOT EXISTS myisam_lock_test")
        .await
        .unwrap();
    session
        .execute("CREATE TABLE IF NOT EXISTS myisam_lock_test.frozen (id INT) ENGINE=MyISAM")
        .await
        .unwrap();
    let tables = session.select_tables().await.unwrap();

    let holder = LockHolder::new(&path);
    let (report, signaled) = tokio::join!(holder.hold(session, &tables), async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        UnlockSignaler::new(&path).signal().await
    });

    signaled.unwrap();
    let report = report.unwrap();
    assert_eq!(report.state, LockState::Unlocked);
    assert!(report.wait.liveness_checks > 0);
    assert_eq!(report.wait.liveness_failures, 0);
    assert!(!path.exists());
}
