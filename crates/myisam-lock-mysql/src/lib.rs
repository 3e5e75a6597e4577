//! MySQL backend for the MyISAM backup lock.
//!
//! Reads the maintenance credentials from a Debian-style client
//! configuration, opens a single session over the server's Unix socket and
//! enumerates the MyISAM tables that need to be frozen.

pub mod config;
pub mod connection;
pub mod selector;
pub mod session;

pub use config::{ClientConfig, DEFAULT_CONFIG_PATH};
pub use connection::ConnectionParameters;
pub use selector::{SYSTEM_SCHEMAS, TARGET_ENGINE};
pub use session::MySqlSession;
