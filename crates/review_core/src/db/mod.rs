//! SQLite connection bootstrap for the review store.
//!
//! # Responsibility
//! - Open connections described by a `StoreConfig`.
//! - Create the `employee` table reviews validate against.
//!
//! # Invariants
//! - Bootstrap DDL is idempotent; reopening a database never rewrites rows.
//! - The `reviews` table is not created here; the review repository owns
//!   it through `create_table` / `drop_table`.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory, open_db_with_config};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// `foreign_keys` was requested but the SQLite build ignores the pragma.
    ForeignKeysUnavailable,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::ForeignKeysUnavailable => write!(
                f,
                "foreign key enforcement requested but not supported by this SQLite build"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::ForeignKeysUnavailable => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Returns whether `conn` has a table named `name`.
pub fn table_exists(conn: &Connection, name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
