//! Recording session for exercising the lock holder without a server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use myisam_lock::{BackupSession, LockError, LockResult, TableSet};

/// Statements, pings and closes seen by a [`MockSession`], shared with the test.
#[derive(Clone, Default)]
pub struct SessionLog {
    statements: Arc<Mutex<Vec<String>>>,
    pings: Arc<AtomicU64>,
    closes: Arc<AtomicU64>,
}

impl SessionLog {
    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    pub fn count(&self, statement: &str) -> usize {
        self.statements().iter().filter(|s| s.as_str() == statement).count()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.statements().iter().filter(|s| s.starts_with(prefix)).count()
    }

    pub fn pings(&self) -> u64 {
        self.pings.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> u64 {
        self.closes.load(Ordering::SeqCst)
    }
}

/// Mock session that records every statement.
pub struct MockSession {
    log: SessionLog,
    tables: TableSet,
    fail_ping: bool,
    fail_prefix: Option<String>,
}

impl MockSession {
    pub fn new(tables: TableSet) -> (Self, SessionLog) {
        let log = SessionLog::default();
        let session = Self {
            log: log.clone(),
            tables,
            fail_ping: false,
            fail_prefix: None,
        };
        (session, log)
    }

    /// Every ping fails as if the connection were severed.
    pub fn failing_pings(mut self) -> Self {
        self.fail_ping = true;
        self
    }

    /// Statements starting with `prefix` fail after being recorded.
    pub fn failing_statements(mut self, prefix: &str) -> Self {
        self.fail_prefix = Some(prefix.to_string());
        self
    }
}

impl BackupSession for MockSession {
    async fn ping(&mut self) -> LockResult<()> {
        self.log.pings.fetch_add(1, Ordering::SeqCst);
        if self.fail_ping {
            return Err(LockError::Connection(Box::new(std::io::Error::other(
                "server has gone away",
            ))));
        }
        Ok(())
    }

    async fn execute(&mut self, statement: &str) -> LockResult<()> {
        self.log.statements.lock().unwrap().push(statement.to_string());
        match &self.fail_prefix {
            Some(prefix) if statement.starts_with(prefix.as_str()) => Err(LockError::query(
                statement,
                std::io::Error::other("lock wait timeout exceeded"),
            )),
            _ => Ok(()),
        }
    }

    async fn select_tables(&mut self) -> LockResult<TableSet> {
        Ok(self.tables.clone())
    }

    async fn close(self) -> LockResult<()> {
        self.log.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
