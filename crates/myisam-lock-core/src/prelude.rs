//! Convenience prelude for table lock types.

pub use crate::error::{ErrorKind, LockError, LockResult};
pub use crate::retry::RetryPolicy;
pub use crate::table::{TableName, TableSet, UNLOCK_STATEMENT};
pub use crate::token::{RELEASE_TOKEN, is_release_token};
pub use crate::traits::BackupSession;
