//! Hold a read lock on every MyISAM table for the length of a backup window.
//!
//! Two invocations of the same binary cooperate:
//!
//! 1. `myisam-lock --lock-tables` reads the maintenance credentials, selects
//!    every non-system MyISAM table, locks them all with a single
//!    `FLUSH TABLES ... WITH READ LOCK` and binds a Unix socket.
//! 2. The backup runs.
//! 3. `myisam-lock --unlock-tables` connects to that socket and sends the
//!    release token; the locker runs `UNLOCK TABLES`, removes the socket and
//!    exits.
//!
//! The locker waits without a timeout. Killing it leaves the socket file
//! behind, and the next lock run refuses to start until it is removed.
//!
//! # Crate Organization
//!
//! - `myisam-lock-core`: errors, table sets, the session trait, release token
//! - `myisam-lock-mysql`: configuration reader and sqlx session
//! - `myisam-lock-rendezvous`: Unix socket listener and signaler

pub mod cli;
pub mod guard;
pub mod holder;
pub mod run;
pub mod state;

pub use guard::{TableLock, WaitStats};
pub use holder::{LockHolder, LockReport};
pub use run::{run_lock, run_unlock};
pub use state::LockState;

pub use myisam_lock_core::*;
pub use myisam_lock_mysql::{ClientConfig, ConnectionParameters, MySqlSession};
pub use myisam_lock_rendezvous::{RendezvousListener, UnlockSignaler};
