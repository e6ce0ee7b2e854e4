//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections from a `StoreConfig`.
//! - Apply pragmas and the `employee` table DDL before handing out a
//!   connection.
//!
//! # Invariants
//! - Returned connections have the `employee` table.
//! - `foreign_keys` follows `StoreConfig::foreign_keys` (on by default) and
//!   is read back after being set.

use super::{DbError, DbResult};
use crate::config::{DbLocation, StoreConfig};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

const CREATE_EMPLOYEE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS employee (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    job_title TEXT NOT NULL
);";

/// Opens a SQLite database file with default settings.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_db_with_config(&StoreConfig::file(path))
}

/// Opens an in-memory SQLite database with default settings.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_db_with_config(&StoreConfig::memory())
}

/// Opens a connection described by `config` and bootstraps it.
///
/// # Side effects
/// - Creates the database file and `employee` table when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_with_config(config: &StoreConfig) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = config.mode_label();
    info!("event=db_open module=db status=start mode={mode}");

    let opened = match &config.location {
        DbLocation::Memory => Connection::open_in_memory(),
        DbLocation::File(path) => Connection::open(path),
    };
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    if let Err(err) = bootstrap_connection(&conn, config) {
        error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
            started_at.elapsed().as_millis(),
            err
        );
        return Err(err);
    }

    info!(
        "event=db_open module=db status=ok mode={mode} foreign_keys={} duration_ms={}",
        config.foreign_keys,
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn bootstrap_connection(conn: &Connection, config: &StoreConfig) -> DbResult<()> {
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)?;
    let enforced: bool = conn.pragma_query_value(None, "foreign_keys", |row| row.get(0))?;
    if config.foreign_keys && !enforced {
        return Err(DbError::ForeignKeysUnavailable);
    }

    conn.busy_timeout(config.busy_timeout())?;
    conn.execute_batch(CREATE_EMPLOYEE_TABLE_SQL)?;
    Ok(())
}
