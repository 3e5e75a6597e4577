//! Listening side of the rendezvous channel.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;
use tokio::net::{UnixListener, UnixStream};
use tracing::{debug, instrument, warn};

use myisam_lock_core::error::{LockError, LockResult};
use myisam_lock_core::token::MAX_PAYLOAD_LEN;

/// A Unix socket the backup agent connects to when it is done.
///
/// The socket file is removed by [`remove_socket`](Self::remove_socket), or
/// on drop.
pub struct RendezvousListener {
    listener: UnixListener,
    path: PathBuf,
    removed: bool,
}

impl RendezvousListener {
    /// Binds a listener at `path`.
    ///
    /// An existing entry at `path` is never reused or removed: it means a
    /// previous run did not shut down cleanly and is reported as
    /// [`LockError::StaleChannel`].
    #[instrument(skip_all, fields(channel.path = %path.display()))]
    pub fn bind(path: &Path) -> LockResult<Self> {
        ensure_vacant(path)?;
        let listener = UnixListener::bind(path).map_err(|e| {
            if e.kind() == ErrorKind::AddrInUse {
                LockError::StaleChannel(path.to_path_buf())
            } else {
                LockError::Channel(e)
            }
        })?;
        debug!("rendezvous listener bound");
        Ok(Self {
            listener,
            path: path.to_path_buf(),
            removed: false,
        })
    }

    /// Waits for the next incoming connection.
    ///
    /// Cancel safe: dropping the future before a connection arrives loses
    /// nothing.
    pub async fn accept(&self) -> LockResult<RendezvousConnection> {
        let (stream, _) = self.listener.accept().await.map_err(LockError::Channel)?;
        Ok(RendezvousConnection { stream })
    }

    /// Accepts one connection and reads its payload.
    pub async fn receive(&self) -> LockResult<String> {
        self.accept().await?.read_payload().await
    }

    /// Removes the socket file. Failures are logged, not returned.
    ///
    /// Idempotent; also runs on drop.
    pub fn remove_socket(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        remove_socket_file(&self.path);
    }
}

impl Drop for RendezvousListener {
    fn drop(&mut self) {
        self.remove_socket();
    }
}

/// One accepted rendezvous connection.
pub struct RendezvousConnection {
    stream: UnixStream,
}

impl RendezvousConnection {
    /// Reads once, at most [`MAX_PAYLOAD_LEN`] bytes.
    ///
    /// A peer that disconnects without sending anything is reported as an
    /// `UnexpectedEof` channel error.
    pub async fn read_payload(mut self) -> LockResult<String> {
        let mut buf = [0u8; MAX_PAYLOAD_LEN];
        let n = self.stream.read(&mut buf).await.map_err(LockError::Channel)?;
        if n == 0 {
            return Err(LockError::Channel(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                "rendezvous peer closed without sending a token",
            )));
        }
        Ok(String::from_utf8_lossy(&buf[..n]).into_owned())
    }
}

/// Fails with [`LockError::StaleChannel`] if anything exists at `path`.
pub fn ensure_vacant(path: &Path) -> LockResult<()> {
    match std::fs::symlink_metadata(path) {
        Ok(_) => Err(LockError::StaleChannel(path.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(LockError::Channel(e)),
    }
}

/// Best-effort removal of a rendezvous socket file.
///
/// A missing file is only logged at debug level; the unlock side removes it
/// too.
pub fn remove_socket_file(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(channel.path = %path.display(), "removed rendezvous socket"),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(channel.path = %path.display(), "rendezvous socket already gone")
        }
        Err(e) => warn!(
            channel.path = %path.display(),
            error = %e,
            "failed to remove rendezvous socket"
        ),
    }
}
