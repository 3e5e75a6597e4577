#![allow(dead_code)]

pub mod mock_session;

use std::path::Path;
use std::time::{Duration, Instant};

/// Waits until something exists at `path`, panicking after two seconds.
pub async fn wait_for_socket(path: &Path) {
    let start = Instant::now();
    while !path.exists() {
        assert!(
            start.elapsed() < Duration::from_secs(2),
            "socket {} never appeared",
            path.display()
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
