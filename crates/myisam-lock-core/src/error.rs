//! Error types for table lock operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locking, waiting or signaling.
#[derive(Error, Debug)]
pub enum LockError {
    /// Client configuration is missing, unreadable or incomplete.
    #[error("configuration error: {0}")]
    Config(String),

    /// The database session could not be opened or pinged.
    #[error("connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Table enumeration, lock or unlock statement failed.
    #[error("query failed: {statement}: {source}")]
    Query {
        statement: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No table uses the targeted storage engine.
    #[error("no MyISAM tables to lock")]
    NothingToLock,

    /// The rendezvous path is left over from a previous run.
    #[error("rendezvous socket {0} already exists, previous run did not shut down cleanly")]
    StaleChannel(PathBuf),

    /// Binding, accepting or reading the rendezvous socket failed.
    #[error("rendezvous channel error: {0}")]
    Channel(#[source] std::io::Error),

    /// The signaler never managed to connect to the rendezvous socket.
    #[error("could not connect to {} after {attempts} attempts: {source}", .path.display())]
    SignalConnect {
        path: PathBuf,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },

    /// The signaler connected but could not write the release token.
    #[error("failed to send release token: {0}")]
    SignalWrite(#[source] std::io::Error),
}

/// Coarse classification of [`LockError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Connection,
    Query,
    Channel,
    Signal,
}

impl LockError {
    /// Builds a [`LockError::Query`] for a failed statement.
    pub fn query(
        statement: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Query {
            statement: statement.into(),
            source: Box::new(source),
        }
    }

    /// Returns the kind of failure this error represents.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LockError::Config(_) => ErrorKind::Config,
            LockError::Connection(_) => ErrorKind::Connection,
            LockError::Query { .. } | LockError::NothingToLock => ErrorKind::Query,
            LockError::StaleChannel(_) | LockError::Channel(_) => ErrorKind::Channel,
            LockError::SignalConnect { .. } | LockError::SignalWrite(_) => ErrorKind::Signal,
        }
    }
}

/// Result type for lock operations.
pub type LockResult<T> = Result<T, LockError>;
