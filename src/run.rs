//! Entry points for the two process roles.

use std::path::Path;

use tracing::{info, instrument};

use myisam_lock_core::error::LockResult;
use myisam_lock_core::traits::BackupSession;
use myisam_lock_mysql::{ClientConfig, ConnectionParameters, MySqlSession};
use myisam_lock_rendezvous::{UnlockSignaler, ensure_vacant, remove_socket_file};

use crate::holder::{LockHolder, LockReport};

/// Lock mode: lock every MyISAM table and hold the lock until signaled.
///
/// Configuration and the stale socket are checked before the database is
/// contacted.
#[instrument(skip_all, fields(config.path = %config_path.display(), channel.path = %socket_path.display()))]
pub async fn run_lock(config_path: &Path, socket_path: &Path) -> LockResult<LockReport> {
    let config = ClientConfig::load(config_path)?;
    let params = ConnectionParameters::from_config(&config)?;
    ensure_vacant(socket_path)?;

    let mut session = MySqlSession::connect(&params).await?;
    let tables = session.select_tables().await?;
    info!(tables = tables.len(), "selected MyISAM tables");

    let report = LockHolder::new(socket_path).hold(session, &tables).await?;
    info!(
        tables = report.tables,
        liveness_checks = report.wait.liveness_checks,
        liveness_failures = report.wait.liveness_failures,
        "lock session finished"
    );
    Ok(report)
}

/// Unlock mode: send the release token to a waiting locker.
///
/// The socket file is removed afterwards, best-effort.
#[instrument(skip_all, fields(channel.path = %socket_path.display()))]
pub async fn run_unlock(socket_path: &Path) -> LockResult<()> {
    UnlockSignaler::new(socket_path).signal().await?;
    remove_socket_file(socket_path);
    Ok(())
}
