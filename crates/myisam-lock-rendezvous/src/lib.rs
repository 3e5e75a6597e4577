//! Unix socket rendezvous between the table locker and the backup agent.
//!
//! The locker binds a [`RendezvousListener`] once the tables are locked and
//! waits on it; when the backup is done, an [`UnlockSignaler`] connects and
//! writes the release token.

pub mod listener;
pub mod signaler;

pub use listener::{RendezvousConnection, RendezvousListener, ensure_vacant, remove_socket_file};
pub use signaler::UnlockSignaler;

/// Default location of the rendezvous socket.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/mysqld/backup.sock";
