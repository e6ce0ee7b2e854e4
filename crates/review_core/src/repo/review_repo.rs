//! Review repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Own the `reviews` table DDL and CRUD statements.
//! - Keep the repository's identity index in step with every write.
//!
//! # Invariants
//! - Each mutating call is one autocommit statement.
//! - `save`/`update` refresh the identity index; `delete` evicts from it.
//! - Read paths rebuild reviews through `Review::from_trusted_row`.
//! - The schema allows NULL columns, but `Review` has no nullable fields: a
//!   row with NULL `year`, `summary` or `employee_id` fails to load with
//!   `RepoError::Db` (`InvalidColumnType`) instead of being patched up.

use crate::db::DbError;
use crate::model::employee::{
    EmployeeExistenceChecker, EmployeeId, EmployeeValidationError, LookupError,
};
use crate::model::review::{Review, ReviewError, ReviewId, ReviewValidationError};
use crate::repo::employee_repo::ensure_employee_table;
use crate::repo::identity::IdentityIndex;
use log::{debug, info};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CREATE_REVIEWS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    year INT,
    summary TEXT,
    employee_id INTEGER,
    FOREIGN KEY (employee_id) REFERENCES employee(id)
);";

const DROP_REVIEWS_TABLE_SQL: &str = "DROP TABLE IF EXISTS reviews;";

const REVIEW_SELECT_SQL: &str = "SELECT id, year, summary, employee_id FROM reviews";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for review and employee persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ReviewValidationError),
    EmployeeValidation(EmployeeValidationError),
    /// The employee checker failed while validating a review.
    Lookup(LookupError),
    Db(DbError),
    NotFound(ReviewId),
    /// The operation needs a saved review but got one without an id.
    Unsaved,
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::EmployeeValidation(err) => write!(f, "{err}"),
            Self::Lookup(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "review not found: {id}"),
            Self::Unsaved => write!(f, "review has not been saved yet"),
            Self::MissingRequiredTable(table) => write!(
                f,
                "required table `{table}` is missing; open the connection with db::open_db"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::EmployeeValidation(err) => Some(err),
            Self::Lookup(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::Unsaved | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<ReviewValidationError> for RepoError {
    fn from(value: ReviewValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ReviewError> for RepoError {
    fn from(value: ReviewError) -> Self {
        match value {
            ReviewError::Validation(err) => Self::Validation(err),
            ReviewError::Lookup(err) => Self::Lookup(err),
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::EmployeeValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for review persistence.
pub trait ReviewRepository {
    /// Creates the `reviews` table when missing.
    fn create_table(&self) -> RepoResult<()>;
    /// Drops the `reviews` table when present.
    fn drop_table(&self) -> RepoResult<()>;
    /// Inserts an unsaved review or updates a saved one, returning its id.
    fn save(&mut self, review: &mut Review) -> RepoResult<ReviewId>;
    /// Validates and saves a new review in one call.
    fn create(
        &mut self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<Review>;
    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>>;
    fn find_by_employee(&self, employee_id: EmployeeId) -> RepoResult<Vec<Review>>;
    /// Writes the current fields of a saved review.
    fn update(&mut self, review: &Review) -> RepoResult<()>;
    /// Removes the row and resets the review's id to `None`.
    fn delete(&mut self, review: &mut Review) -> RepoResult<()>;
    fn get_all(&self) -> RepoResult<Vec<Review>>;
    /// Re-points `review` at another employee using this repository's checker.
    fn reassign_employee(&self, review: &mut Review, employee_id: EmployeeId) -> RepoResult<()>;
    fn identity_index(&self) -> &IdentityIndex;
    fn clear_identity_index(&mut self);
}

/// SQLite-backed review repository.
pub struct SqliteReviewRepository<'conn, E> {
    conn: &'conn Connection,
    employees: E,
    index: IdentityIndex,
}

impl<'conn, E: EmployeeExistenceChecker> SqliteReviewRepository<'conn, E> {
    /// Constructs a repository with an empty identity index.
    ///
    /// # Errors
    /// - `MissingRequiredTable("employee")` when `conn` was not opened
    ///   through `db::open_db*`.
    pub fn try_new(conn: &'conn Connection, employees: E) -> RepoResult<Self> {
        ensure_employee_table(conn)?;
        Ok(Self {
            conn,
            employees,
            index: IdentityIndex::new(),
        })
    }

    /// Builds an unsaved review validated against this repository's checker.
    pub fn new_review(
        &self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<Review> {
        Ok(Review::new(year, summary, employee_id, &self.employees)?)
    }

    pub fn employees(&self) -> &E {
        &self.employees
    }

    fn write_fields(&self, id: ReviewId, review: &Review) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE reviews
             SET year = ?1, summary = ?2, employee_id = ?3
             WHERE id = ?4;",
            params![review.year(), review.summary(), review.employee_id(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn query_reviews(&self, sql: &str, employee_id: Option<EmployeeId>) -> RepoResult<Vec<Review>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match employee_id {
            Some(employee_id) => stmt.query([employee_id])?,
            None => stmt.query([])?,
        };

        let mut reviews = Vec::new();
        while let Some(row) = rows.next()? {
            reviews.push(review_from_row(row)?);
        }

        Ok(reviews)
    }
}

impl<E: EmployeeExistenceChecker> ReviewRepository for SqliteReviewRepository<'_, E> {
    fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(CREATE_REVIEWS_TABLE_SQL)?;
        info!("event=review_table_create module=repo status=ok");
        Ok(())
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(DROP_REVIEWS_TABLE_SQL)?;
        info!("event=review_table_drop module=repo status=ok");
        Ok(())
    }

    fn save(&mut self, review: &mut Review) -> RepoResult<ReviewId> {
        let (id, mode) = match review.id() {
            Some(id) => {
                self.write_fields(id, review)?;
                (id, "update")
            }
            None => {
                self.conn.execute(
                    "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3);",
                    params![review.year(), review.summary(), review.employee_id()],
                )?;
                let id = self.conn.last_insert_rowid();
                review.assign_id(id);
                (id, "insert")
            }
        };

        self.index.register(review);
        info!(
            "event=review_save module=repo status=ok mode={mode} review_id={id} employee_id={}",
            review.employee_id()
        );
        Ok(id)
    }

    fn create(
        &mut self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<Review> {
        let mut review = self.new_review(year, summary, employee_id)?;
        self.save(&mut review)?;
        Ok(review)
    }

    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(review_from_row(row)?));
        }

        debug!("event=review_lookup module=repo status=miss review_id={id}");
        Ok(None)
    }

    fn find_by_employee(&self, employee_id: EmployeeId) -> RepoResult<Vec<Review>> {
        self.query_reviews(
            &format!("{REVIEW_SELECT_SQL} WHERE employee_id = ?1 ORDER BY id ASC;"),
            Some(employee_id),
        )
    }

    fn update(&mut self, review: &Review) -> RepoResult<()> {
        let id = review.id().ok_or(RepoError::Unsaved)?;
        self.write_fields(id, review)?;
        self.index.register(review);
        info!("event=review_update module=repo status=ok review_id={id}");
        Ok(())
    }

    fn delete(&mut self, review: &mut Review) -> RepoResult<()> {
        let Some(id) = review.id() else {
            debug!("event=review_delete module=repo status=skip reason=unsaved");
            return Ok(());
        };

        let removed = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?1;", [id])?;
        self.index.evict(id);
        review.clear_id();
        info!("event=review_delete module=repo status=ok review_id={id} rows={removed}");
        Ok(())
    }

    fn get_all(&self) -> RepoResult<Vec<Review>> {
        self.query_reviews(&format!("{REVIEW_SELECT_SQL} ORDER BY id ASC;"), None)
    }

    fn reassign_employee(&self, review: &mut Review, employee_id: EmployeeId) -> RepoResult<()> {
        Ok(review.set_employee_id(employee_id, &self.employees)?)
    }

    fn identity_index(&self) -> &IdentityIndex {
        &self.index
    }

    fn clear_identity_index(&mut self) {
        self.index.clear();
    }
}

/// Maps a positional `(id, year, summary, employee_id)` row without
/// validation.
fn review_from_row(row: &Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review::from_trusted_row((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
    )))
}
