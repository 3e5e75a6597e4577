//! Core traits and types for locking MyISAM tables during a backup window.

pub mod error;
pub mod prelude;
pub mod retry;
pub mod table;
pub mod token;
pub mod traits;

pub use error::{ErrorKind, LockError, LockResult};
pub use prelude::*;
