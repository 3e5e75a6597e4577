//! sqlx-backed database session.

use sqlx::{Connection, MySqlConnection};
use tracing::{debug, instrument};

use myisam_lock_core::error::{LockError, LockResult};
use myisam_lock_core::table::TableSet;
use myisam_lock_core::traits::BackupSession;

use crate::connection::ConnectionParameters;
use crate::selector;

/// One dedicated MySQL connection.
///
/// Table locks are owned by this connection; dropping it closes the socket
/// and the server releases whatever it still holds.
pub struct MySqlSession {
    connection: MySqlConnection,
}

impl MySqlSession {
    /// Opens a connection over the server's Unix socket and pings it.
    #[instrument(skip_all, fields(db.user = params.user(), db.socket = %params.socket().display()))]
    pub async fn connect(params: &ConnectionParameters) -> LockResult<Self> {
        let mut connection = MySqlConnection::connect_with(&params.connect_options())
            .await
            .map_err(|e| LockError::Connection(Box::new(e)))?;
        connection
            .ping()
            .await
            .map_err(|e| LockError::Connection(Box::new(e)))?;
        debug!("connected");
        Ok(Self { connection })
    }
}

impl BackupSession for MySqlSession {
    async fn ping(&mut self) -> LockResult<()> {
        self.connection
            .ping()
            .await
            .map_err(|e| LockError::Connection(Box::new(e)))
    }

    async fn execute(&mut self, statement: &str) -> LockResult<()> {
        // Text protocol: UNLOCK TABLES cannot be prepared.
        sqlx::raw_sql(statement)
            .execute(&mut self.connection)
            .await
            .map(|_| ())
            .map_err(|e| LockError::query(statement, e))
    }

    async fn select_tables(&mut self) -> LockResult<TableSet> {
        selector::select_tables(&mut self.connection).await
    }

    async fn close(self) -> LockResult<()> {
        self.connection
            .close()
            .await
            .map_err(|e| LockError::Connection(Box::new(e)))?;
        debug!("session closed");
        Ok(())
    }
}
