//! Table selector: enumerates the MyISAM tables a backup has to freeze.

use sqlx::MySqlConnection;
use tracing::{debug, instrument};

use myisam_lock_core::error::{LockError, LockResult};
use myisam_lock_core::table::{TableName, TableSet};

/// Storage engine whose tables are locked.
pub const TARGET_ENGINE: &str = "MyISAM";

/// Schemas owned by the server itself; never locked.
pub const SYSTEM_SCHEMAS: [&str; 4] = ["mysql", "performance_schema", "information_schema", "sys"];

// Casts keep the columns textual on servers that report information_schema
// names with a binary collation.
pub(crate) const TABLE_QUERY: &str = "\
SELECT CAST(TABLE_SCHEMA AS CHAR), CAST(TABLE_NAME AS CHAR) \
FROM information_schema.TABLES \
WHERE TABLE_TYPE = 'BASE TABLE' \
AND ENGINE = ? \
AND TABLE_SCHEMA NOT IN ('mysql', 'performance_schema', 'information_schema', 'sys') \
ORDER BY TABLE_SCHEMA, TABLE_NAME";

/// Returns the ordered set of non-system MyISAM tables.
///
/// An empty result is not an error; deciding what to do with it is up to the
/// caller.
#[instrument(skip_all, fields(engine = TARGET_ENGINE))]
pub async fn select_tables(connection: &mut MySqlConnection) -> LockResult<TableSet> {
    let rows: Vec<(String, String)> = sqlx::query_as(TABLE_QUERY)
        .bind(TARGET_ENGINE)
        .fetch_all(&mut *connection)
        .await
        .map_err(|e| LockError::query(TABLE_QUERY, e))?;

    let tables: TableSet = rows
        .into_iter()
        .map(|(schema, table)| TableName::new(schema, table))
        .collect();
    debug!(tables = tables.len(), "selected tables");
    Ok(tables)
}
