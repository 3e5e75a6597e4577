//! Connection parameters and the DSN builder for the local socket transport.

use std::fmt;
use std::path::{Path, PathBuf};

use sqlx::mysql::MySqlConnectOptions;

use myisam_lock_core::error::{LockError, LockResult};

use crate::config::ClientConfig;

/// Credentials and transport address for the one session a locker opens.
///
/// Immutable once resolved from the client configuration.
#[derive(Clone)]
pub struct ConnectionParameters {
    user: String,
    password: String,
    socket: PathBuf,
}

impl ConnectionParameters {
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        socket: impl Into<PathBuf>,
    ) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            socket: socket.into(),
        }
    }

    /// Resolves the parameters from a validated client configuration.
    ///
    /// `host` is required by the configuration reader but unused: the
    /// connection always goes through the server's Unix socket.
    pub fn from_config(config: &ClientConfig) -> LockResult<Self> {
        let get = |key: &str| {
            config
                .get(key)
                .ok_or_else(|| LockError::Config(format!("missing `{key}` in client configuration")))
        };
        Ok(Self::new(get("user")?, get("password")?, get("socket")?))
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn socket(&self) -> &Path {
        &self.socket
    }

    /// Builds the sqlx connection descriptor for the Unix socket transport.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .username(&self.user)
            .password(&self.password)
            .socket(&self.socket)
    }
}

impl fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParameters")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("socket", &self.socket)
            .finish()
    }
}
