//! Command line interface.

use std::path::PathBuf;

use clap::Parser;

use myisam_lock_mysql::DEFAULT_CONFIG_PATH;
use myisam_lock_rendezvous::DEFAULT_SOCKET_PATH;

/// Lock MyISAM tables for the duration of a backup.
///
/// Run with `--lock-tables` before the backup; it blocks until another
/// invocation with `--unlock-tables` signals that the backup is done.
#[derive(Debug, Parser)]
#[command(name = "myisam-lock", version, about)]
pub struct Args {
    /// Issue a read lock on all MyISAM tables and wait for the unlock signal.
    #[arg(long, conflicts_with = "unlock_tables")]
    pub lock_tables: bool,

    /// Signal a waiting locker to unlock all tables.
    #[arg(long)]
    pub unlock_tables: bool,

    /// Unix socket path used between the lock and unlock invocations.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SOCKET_PATH)]
    pub unix_socket_path: PathBuf,

    /// MySQL client configuration holding the maintenance credentials.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub mysql_config_path: PathBuf,
}

/// What the process was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Lock,
    Unlock,
    /// No mode flag given.
    Usage,
}

impl Args {
    pub fn mode(&self) -> Mode {
        match (self.lock_tables, self.unlock_tables) {
            (true, _) => Mode::Lock,
            (false, true) => Mode::Unlock,
            (false, false) => Mode::Usage,
        }
    }
}
