//! Sending side of the rendezvous channel.

use std::path::PathBuf;

use tokio::io::AsyncWriteExt;
use tokio::net::UnixStream;
use tracing::{debug, info, instrument};

use myisam_lock_core::error::{LockError, LockResult};
use myisam_lock_core::retry::RetryPolicy;
use myisam_lock_core::token::release_payload;

/// Tells a waiting locker that the backup is done.
///
/// The locker may not be listening yet when the signaler starts, so
/// connecting is retried according to a [`RetryPolicy`]. Only connecting is
/// retried: once connected, a failed write is returned straight away.
/// Whether the locker acted on the token is not confirmed.
#[derive(Debug, Clone)]
pub struct UnlockSignaler {
    path: PathBuf,
    retry: RetryPolicy,
}

impl UnlockSignaler {
    /// Creates a signaler for the socket at `path` with the default policy
    /// of 10 attempts, 50ms apart.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            retry: RetryPolicy::SIGNAL,
        }
    }

    /// Overrides the connect retry policy.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Connects to the locker and writes the release token.
    #[instrument(skip(self), fields(channel.path = %self.path.display(), attempts = self.retry.attempts()))]
    pub async fn signal(&self) -> LockResult<()> {
        let mut stream = self.connect().await?;
        stream
            .write_all(&release_payload())
            .await
            .map_err(LockError::SignalWrite)?;
        stream.shutdown().await.map_err(LockError::SignalWrite)?;
        info!("release token sent");
        Ok(())
    }

    async fn connect(&self) -> LockResult<UnixStream> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            tokio::time::sleep(self.retry.interval()).await;
            match UnixStream::connect(&self.path).await {
                Ok(stream) => {
                    debug!(attempt, "connected to rendezvous socket");
                    return Ok(stream);
                }
                Err(e) if attempt < self.retry.attempts() => {
                    debug!(attempt, error = %e, "rendezvous socket not ready, retrying");
                }
                Err(e) => {
                    return Err(LockError::SignalConnect {
                        path: self.path.clone(),
                        attempts: attempt,
                        source: e,
                    });
                }
            }
        }
    }
}
