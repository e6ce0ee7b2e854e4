//! Runtime configuration for storage and logging bootstrap.
//!
//! # Responsibility
//! - Describe where the review store lives and how connections are tuned.
//! - Describe the logging level and directory handed to `init_logging`.
//!
//! # Invariants
//! - Defaults keep `foreign_keys` enabled.
//! - Missing fields deserialize to their documented defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Location of the SQLite database backing the review store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DbLocation {
    /// Private in-memory database, discarded when the connection drops.
    #[default]
    Memory,
    /// On-disk database file, created when missing.
    File(PathBuf),
}

/// Connection settings consumed by `db::open_db_with_config`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub location: DbLocation,
    pub busy_timeout_ms: u64,
    pub foreign_keys: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: DbLocation::Memory,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            foreign_keys: true,
        }
    }
}

impl StoreConfig {
    /// Config for an on-disk database at `path` with default tuning.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            location: DbLocation::File(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Config for a private in-memory database.
    pub fn memory() -> Self {
        Self::default()
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Short label used in `db_open` log events.
    pub(crate) fn mode_label(&self) -> &'static str {
        match self.location {
            DbLocation::Memory => "memory",
            DbLocation::File(_) => "file",
        }
    }
}

/// Logging settings consumed by `logging::init_logging`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`, case-insensitive.
    #[serde(default = "default_log_level_owned")]
    pub level: String,
    /// Absolute directory receiving rolling log files.
    pub log_dir: PathBuf,
}

impl LoggingConfig {
    /// Builds a config for `log_dir` using the build-mode default level.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: log_dir.into(),
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn default_log_level_owned() -> String {
    default_log_level().to_string()
}

#[cfg(test)]
mod tests {
    use super::{default_log_level, DbLocation, LoggingConfig, StoreConfig};
    use std::path::PathBuf;

    #[test]
    fn store_config_defaults_to_memory_with_foreign_keys() {
        let config = StoreConfig::default();
        assert_eq!(config.location, DbLocation::Memory);
        assert!(config.foreign_keys);
        assert_eq!(config.busy_timeout().as_secs(), 5);
        assert_eq!(config.mode_label(), "memory");
    }

    #[test]
    fn file_config_keeps_path() {
        let config = StoreConfig::file("/tmp/reviews.db");
        assert_eq!(
            config.location,
            DbLocation::File(PathBuf::from("/tmp/reviews.db"))
        );
        assert_eq!(config.mode_label(), "file");
    }

    #[test]
    fn logging_config_uses_build_default_level() {
        let config = LoggingConfig::new("/var/log/reviews");
        assert_eq!(config.level, default_log_level());

        let config = config.with_level("warn");
        assert_eq!(config.level, "warn");
    }
}
