//! Employee lookup contracts and SQLite implementation.
//!
//! # Responsibility
//! - Back the review foreign-key check with the `employee` table.
//! - Adapt any `EmployeeLookup` into an `EmployeeExistenceChecker`.
//!
//! # Invariants
//! - Review code depends on `EmployeeExistenceChecker`, never on the SQLite
//!   type directly.

use crate::db::table_exists;
use crate::model::employee::{
    normalize_employee_fields, Employee, EmployeeExistenceChecker, EmployeeId, LookupError,
};
use crate::repo::review_repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

/// Loads full employee records by id.
pub trait EmployeeLookup {
    fn find_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
}

/// Answers existence questions through `EmployeeLookup::find_employee`.
///
/// Use this to plug a lookup-only collaborator into `Review::new` or
/// `SqliteReviewRepository::try_new`.
#[derive(Debug, Clone, Copy)]
pub struct LookupChecker<L>(pub L);

impl<L: EmployeeLookup> EmployeeExistenceChecker for LookupChecker<L> {
    fn employee_exists(&self, id: EmployeeId) -> Result<bool, LookupError> {
        self.0
            .find_employee(id)
            .map(|employee| employee.is_some())
            .map_err(LookupError::new)
    }
}

/// SQLite-backed employee repository.
#[derive(Debug, Clone, Copy)]
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable("employee")` when `conn` was not opened through
    ///   `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_employee_table(conn)?;
        Ok(Self { conn })
    }

    /// Inserts a new employee and returns it with the assigned id.
    pub fn create_employee(&self, name: &str, job_title: &str) -> RepoResult<Employee> {
        let (name, job_title) = normalize_employee_fields(name, job_title)?;
        self.conn.execute(
            "INSERT INTO employee (name, job_title) VALUES (?1, ?2);",
            params![name.as_str(), job_title.as_str()],
        )?;

        Ok(Employee {
            id: self.conn.last_insert_rowid(),
            name,
            job_title,
        })
    }

    /// Lists every employee ordered by id.
    pub fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, job_title FROM employee ORDER BY id ASC;")?;
        let employees = stmt
            .query_map([], parse_employee_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }
}

impl EmployeeLookup for SqliteEmployeeRepository<'_> {
    fn find_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, job_title FROM employee WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }
}

impl EmployeeExistenceChecker for SqliteEmployeeRepository<'_> {
    fn employee_exists(&self, id: EmployeeId) -> Result<bool, LookupError> {
        let exists: i64 = self
            .conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM employee WHERE id = ?1);",
                [id],
                |row| row.get(0),
            )
            .map_err(LookupError::new)?;
        Ok(exists == 1)
    }
}

/// Rejects connections that lack the `employee` table reviews reference.
pub(crate) fn ensure_employee_table(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "employee")? {
        return Err(RepoError::MissingRequiredTable("employee"));
    }
    Ok(())
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
        job_title: row.get(2)?,
    })
}
