//! Lock holder: locks the tables, waits for the release token, unlocks.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{Span, field, info, instrument, warn};

use myisam_lock_core::error::{LockError, LockResult};
use myisam_lock_core::table::TableSet;
use myisam_lock_core::traits::BackupSession;
use myisam_lock_rendezvous::{RendezvousListener, ensure_vacant};

use crate::guard::{TableLock, WaitStats, close_session, unlock};
use crate::state::{LockState, StateTracker};

/// Summary of a lock session that ended with the release token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockReport {
    /// Terminal state of the session.
    pub state: LockState,
    /// Number of tables that were locked.
    pub tables: usize,
    /// Counters from the wait loop.
    pub wait: WaitStats,
}

/// Holds a read lock on a set of tables until the backup agent signals
/// through the rendezvous socket.
///
/// # Example
///
/// ```rust,ignore
/// let tables = session.select_tables().await?;
/// let report = LockHolder::new("/var/run/mysqld/backup.sock")
///     .hold(session, &tables)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct LockHolder {
    channel_path: PathBuf,
    liveness_interval: Duration,
}

impl LockHolder {
    /// Interval between liveness pings while waiting.
    pub const DEFAULT_LIVENESS_INTERVAL: Duration = Duration::from_millis(100);

    pub fn new(channel_path: impl Into<PathBuf>) -> Self {
        Self {
            channel_path: channel_path.into(),
            liveness_interval: Self::DEFAULT_LIVENESS_INTERVAL,
        }
    }

    /// Sets the interval between liveness pings.
    pub fn liveness_interval(mut self, interval: Duration) -> Self {
        self.liveness_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Runs one lock session on `session`.
    ///
    /// Both preconditions are checked before anything is locked: `tables`
    /// must not be empty ([`LockError::NothingToLock`]) and nothing may exist
    /// at the channel path ([`LockError::StaleChannel`]). All tables are then
    /// locked with a single statement, the rendezvous socket is bound and
    /// the holder waits, with no timeout, for the release token.
    ///
    /// However the wait ends, `UNLOCK TABLES` is attempted, the socket file
    /// removed and the session closed before returning. The session is also
    /// closed when nothing was locked.
    ///
    /// # Returns
    ///
    /// * `Ok(report)` - release token received, tables unlocked
    /// * `Err(LockError::Query)` - the lock statement failed, nothing locked
    /// * `Err(LockError::Channel)` - the rendezvous socket failed; the lock
    ///   was released anyway
    #[instrument(skip_all, fields(channel.path = %self.channel_path.display(), tables = tables.len(), state = tracing::field::Empty))]
    pub async fn hold<S: BackupSession>(
        &self,
        mut session: S,
        tables: &TableSet,
    ) -> LockResult<LockReport> {
        let mut state = StateTracker::new();

        let lock_statement = match self.check_preconditions(tables) {
            Ok(statement) => statement,
            Err(e) => {
                state.advance(LockState::LockFailed);
                Span::current().record("state", field::display(state.current()));
                close_session(session).await;
                return Err(e);
            }
        };

        if let Err(e) = session.execute(&lock_statement).await {
            state.advance(LockState::LockFailed);
            Span::current().record("state", field::display(state.current()));
            close_session(session).await;
            return Err(e);
        }
        state.advance(LockState::Locked);
        info!("tables locked");

        let listener = match RendezvousListener::bind(&self.channel_path) {
            Ok(listener) => listener,
            Err(e) => {
                state.advance(LockState::ForcedUnlock);
                unlock(&mut session).await;
                close_session(session).await;
                Span::current().record("state", field::display(state.current()));
                return Err(e);
            }
        };

        let mut lock = TableLock::new(session, listener);
        state.advance(LockState::WaitingForRelease);
        info!("waiting for release token");

        let mut wait = WaitStats::default();
        let outcome = lock.wait_for_release(self.liveness_interval, &mut wait).await;
        lock.release().await;

        let result = match outcome {
            Ok(()) => {
                state.advance(LockState::Unlocked);
                Ok(LockReport {
                    state: state.current(),
                    tables: tables.len(),
                    wait,
                })
            }
            Err(e) => {
                warn!(error = %e, "rendezvous channel failed, lock released without a release token");
                state.advance(LockState::ForcedUnlock);
                Err(e)
            }
        };
        Span::current().record("state", field::display(state.current()));
        result
    }

    fn check_preconditions(&self, tables: &TableSet) -> LockResult<String> {
        let statement = tables.lock_statement().ok_or(LockError::NothingToLock)?;
        ensure_vacant(&self.channel_path)?;
        Ok(statement)
    }
}
