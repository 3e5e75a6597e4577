//! Core traits for the table lock.

use std::future::Future;

use crate::error::LockResult;
use crate::table::TableSet;

// ============================================================================
// Backup Session Trait
// ============================================================================

/// A single database session used for one lock session.
///
/// The table selector, the lock statement, the liveness pings and the unlock
/// statement all run on the same session: table locks belong to the session
/// that took them, and closing it releases them server-side.
///
/// # Example
///
/// ```rust,ignore
/// let mut session = MySqlSession::connect(&params).await?;
/// let tables = session.select_tables().await?;
/// session.execute(&tables.lock_statement().unwrap()).await?;
/// // ... backup runs ...
/// session.execute(UNLOCK_STATEMENT).await?;
/// session.close().await?;
/// ```
pub trait BackupSession: Send {
    /// Checks that the session is still usable.
    fn ping(&mut self) -> impl Future<Output = LockResult<()>> + Send;

    /// Executes a statement that returns no rows.
    ///
    /// Failures are reported as [`LockError::Query`](crate::LockError::Query).
    // No `Send` bound: sqlx's `Executor` impl for `&mut MySqlConnection` is
    // higher-ranked and its future cannot be proven `Send` here.
    fn execute(&mut self, statement: &str) -> impl Future<Output = LockResult<()>>;

    /// Returns every non-system table using the MyISAM engine.
    ///
    /// # Returns
    ///
    /// * `Ok(set)` - possibly empty; no qualifying tables is not an error
    /// * `Err(LockError::Query)` - the session is unusable or the query failed
    fn select_tables(&mut self) -> impl Future<Output = LockResult<TableSet>> + Send;

    /// Ends the session gracefully.
    fn close(self) -> impl Future<Output = LockResult<()>> + Send
    where
        Self: Sized;
}
