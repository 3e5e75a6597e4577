//! Scoped ownership of a held table lock.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use myisam_lock_core::error::LockResult;
use myisam_lock_core::table::UNLOCK_STATEMENT;
use myisam_lock_core::token::is_release_token;
use myisam_lock_core::traits::BackupSession;
use myisam_lock_rendezvous::RendezvousListener;

/// Counters collected while waiting for the release token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaitStats {
    /// Liveness pings sent.
    pub liveness_checks: u64,
    /// Liveness pings that failed.
    pub liveness_failures: u64,
    /// Connections whose payload was not the release token.
    pub ignored_payloads: u64,
}

/// A locked session together with its rendezvous listener.
///
/// [`release`](Self::release) runs `UNLOCK TABLES`, removes the socket file
/// and closes the session, in that order, each best-effort. Dropping an
/// unreleased guard removes the socket file and drops the connection, which
/// makes the server drop the lock.
pub struct TableLock<S: BackupSession> {
    session: S,
    listener: RendezvousListener,
}

impl<S: BackupSession> TableLock<S> {
    pub(crate) fn new(session: S, listener: RendezvousListener) -> Self {
        Self { session, listener }
    }

    /// Waits until a connection delivers the release token.
    ///
    /// Pings the session every `liveness_interval` while waiting. A failed
    /// ping is only logged. Payloads other than the token are logged and
    /// the next connection is awaited. Accept and read failures end the wait
    /// with the error.
    pub(crate) async fn wait_for_release(
        &mut self,
        liveness_interval: Duration,
        stats: &mut WaitStats,
    ) -> LockResult<()> {
        let mut ticker = tokio::time::interval(liveness_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        let mut alive = true;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    stats.liveness_checks += 1;
                    match self.session.ping().await {
                        Ok(()) if !alive => {
                            info!("database session is answering again");
                            alive = true;
                        }
                        Ok(()) => {}
                        Err(e) => {
                            stats.liveness_failures += 1;
                            if alive {
                                warn!(error = %e, "database session is not answering, lock may be lost");
                                alive = false;
                            }
                        }
                    }
                }
                accepted = self.listener.accept() => {
                    let payload = accepted?.read_payload().await?;
                    if is_release_token(&payload) {
                        info!("release token received");
                        return Ok(());
                    }
                    stats.ignored_payloads += 1;
                    warn!(bytes = payload.len(), "ignoring rendezvous payload that is not the release token");
                }
            }
        }
    }

    /// Unlocks the tables, removes the rendezvous socket, closes the session.
    pub async fn release(self) {
        let TableLock {
            mut session,
            mut listener,
        } = self;
        unlock(&mut session).await;
        listener.remove_socket();
        close_session(session).await;
    }
}

/// Issues `UNLOCK TABLES`, logging a failure.
pub(crate) async fn unlock<S: BackupSession>(session: &mut S) {
    match session.execute(UNLOCK_STATEMENT).await {
        Ok(()) => info!("tables unlocked"),
        Err(e) => warn!(error = %e, "failed to unlock tables"),
    }
}

/// Closes the session, logging a failure.
pub(crate) async fn close_session<S: BackupSession>(session: S) {
    if let Err(e) = session.close().await {
        warn!(error = %e, "failed to close database session");
    }
}
