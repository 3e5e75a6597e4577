//! Reader for Debian-style MySQL client configuration files.
//!
//! The file is an INI document such as `/etc/mysql/debian.cnf`:
//!
//! ```text
//! [client]
//! host     = localhost
//! user     = debian-sys-maint
//! password = secret
//! socket   = /var/run/mysqld/mysqld.sock
//! ```
//!
//! Section and key names are matched case-insensitively. Only the `[client]`
//! section is consulted. Value-less keys such as `skip-external-locking`,
//! common in other sections of MySQL option files, read as `true`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use ini::{Ini, ParseOption};
use tracing::{debug, instrument};

use myisam_lock_core::error::{LockError, LockResult};

/// Default location of the maintenance account configuration.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/mysql/debian.cnf";

/// Section holding the client credentials.
pub const CLIENT_SECTION: &str = "client";

/// Keys that must be present in the client section.
pub const REQUIRED_KEYS: [&str; 4] = ["host", "user", "password", "socket"];

/// Key/value pairs of the `[client]` section, keys lower-cased.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    values: BTreeMap<String, String>,
}

impl ClientConfig {
    /// Loads and validates the client section of the file at `path`.
    #[instrument(skip_all, fields(config.path = %path.display()))]
    pub fn load(path: &Path) -> LockResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LockError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let ini = parse_ini(&content).map_err(|e| {
            LockError::Config(format!("failed to parse {}: {e}", path.display()))
        })?;
        let config = Self::from_ini(&ini).map_err(|missing| {
            LockError::Config(format!("{}: {missing}", path.display()))
        })?;
        debug!(keys = config.values.len(), "loaded client configuration");
        Ok(config)
    }

    /// Parses and validates configuration held in memory.
    pub fn parse(content: &str) -> LockResult<Self> {
        let ini = parse_ini(content)
            .map_err(|e| LockError::Config(format!("failed to parse configuration: {e}")))?;
        Self::from_ini(&ini).map_err(LockError::Config)
    }

    fn from_ini(ini: &Ini) -> Result<Self, String> {
        let mut values = BTreeMap::new();
        let mut found = false;
        for (section, properties) in ini.iter() {
            if !section.is_some_and(|name| name.eq_ignore_ascii_case(CLIENT_SECTION)) {
                continue;
            }
            found = true;
            for (key, value) in properties.iter() {
                values.insert(key.to_ascii_lowercase(), value.to_string());
            }
        }

        if !found {
            return Err(format!("missing [{CLIENT_SECTION}] section"));
        }
        if let Some(key) = REQUIRED_KEYS.iter().find(|key| !values.contains_key(**key)) {
            return Err(format!("missing `{key}` in [{CLIENT_SECTION}] section"));
        }
        Ok(Self { values })
    }

    /// Returns the value for `key`, case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// All keys of the client section, lower-cased.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.values {
            if key == "password" {
                map.entry(key, &"[REDACTED]");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

fn parse_ini(content: &str) -> Result<Ini, ini::ParseError> {
    // Passwords may contain backslashes; take values verbatim.
    let options = ParseOption {
        enabled_escape: false,
        ..ParseOption::default()
    };
    Ini::load_from_str_opt(&with_boolean_keys(content), options)
}

/// Rewrites every value-less key line as `key = true`.
fn with_boolean_keys(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.lines() {
        let trimmed = line.trim();
        out.push_str(line);
        if is_bare_key(trimmed) {
            out.push_str(" = true");
        }
        out.push('\n');
    }
    out
}

fn is_bare_key(line: &str) -> bool {
    !line.is_empty()
        && !line.starts_with(['#', ';', '['])
        && !line.contains(['=', ':'])
}
