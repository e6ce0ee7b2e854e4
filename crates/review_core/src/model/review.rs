//! Review domain model.
//!
//! # Responsibility
//! - Own the validated construction path for new reviews.
//! - Provide the trusted reconstruction path for rows loaded from the store.
//!
//! # Invariants
//! - `year >= MIN_REVIEW_YEAR` and `summary` is non-blank for every review
//!   built or mutated through validating APIs.
//! - `employee_id` is checked against an `EmployeeExistenceChecker` whenever
//!   it is set through validating APIs.
//! - `id` is `None` until the review is saved and after it is deleted.

use crate::model::employee::{EmployeeExistenceChecker, EmployeeId, LookupError};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Surrogate key assigned by the store on first insert.
pub type ReviewId = i64;

/// Earliest accepted review year.
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// Field-level validation failures for reviews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    YearBeforeMinimum { year: i64 },
    EmptySummary,
    UnknownEmployee { employee_id: EmployeeId },
}

impl Display for ReviewValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearBeforeMinimum { year } => write!(
                f,
                "year must be greater than or equal to {MIN_REVIEW_YEAR}, got {year}"
            ),
            Self::EmptySummary => write!(f, "summary cannot be empty"),
            Self::UnknownEmployee { employee_id } => write!(
                f,
                "Employee ID must reference a valid employee (got {employee_id})"
            ),
        }
    }
}

impl Error for ReviewValidationError {}

/// Failure of a validating review constructor or setter.
#[derive(Debug)]
pub enum ReviewError {
    Validation(ReviewValidationError),
    /// The employee checker could not answer.
    Lookup(LookupError),
}

impl Display for ReviewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Lookup(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReviewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Lookup(err) => Some(err),
        }
    }
}

impl From<ReviewValidationError> for ReviewError {
    fn from(value: ReviewValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<LookupError> for ReviewError {
    fn from(value: LookupError) -> Self {
        Self::Lookup(value)
    }
}

/// Annual performance review written for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    id: Option<ReviewId>,
    year: i64,
    summary: String,
    employee_id: EmployeeId,
}

impl Review {
    /// Builds an unsaved review after validating every field.
    ///
    /// # Errors
    /// - `ReviewError::Validation` when the year, summary or employee is invalid.
    /// - `ReviewError::Lookup` when the employee checker itself fails.
    pub fn new<C>(
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
        employees: &C,
    ) -> Result<Self, ReviewError>
    where
        C: EmployeeExistenceChecker + ?Sized,
    {
        let year = validate_year(year)?;
        let summary = normalize_summary(summary.into())?;
        ensure_employee_exists(employee_id, employees)?;

        Ok(Self {
            id: None,
            year,
            summary,
            employee_id,
        })
    }

    /// Same as [`Review::new`] but carries a caller-provided id.
    ///
    /// The review is still unsaved from the repository's point of view until
    /// `save` writes it; `save` will take the update path for it.
    pub fn with_id<C>(
        id: ReviewId,
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
        employees: &C,
    ) -> Result<Self, ReviewError>
    where
        C: EmployeeExistenceChecker + ?Sized,
    {
        let mut review = Self::new(year, summary, employee_id, employees)?;
        review.id = Some(id);
        Ok(review)
    }

    /// Rebuilds a review from a positional `(id, year, summary, employee_id)`
    /// row.
    ///
    /// Trusted input: no field is validated and no employee lookup happens.
    /// Only the repository read path should call this.
    pub fn from_trusted_row(row: (ReviewId, i64, String, EmployeeId)) -> Self {
        let (id, year, summary, employee_id) = row;
        Self {
            id: Some(id),
            year,
            summary,
            employee_id,
        }
    }

    pub fn id(&self) -> Option<ReviewId> {
        self.id
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns whether this review has been written to the store.
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn set_year(&mut self, year: i64) -> Result<(), ReviewError> {
        self.year = validate_year(year)?;
        Ok(())
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ReviewError> {
        self.summary = normalize_summary(summary.into())?;
        Ok(())
    }

    /// Points the review at another employee.
    ///
    /// The current value is kept when the new employee does not exist.
    pub fn set_employee_id<C>(
        &mut self,
        employee_id: EmployeeId,
        employees: &C,
    ) -> Result<(), ReviewError>
    where
        C: EmployeeExistenceChecker + ?Sized,
    {
        ensure_employee_exists(employee_id, employees)?;
        self.employee_id = employee_id;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: ReviewId) {
        self.id = Some(id);
    }

    pub(crate) fn clear_id(&mut self) {
        self.id = None;
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Review {id}: ")?,
            None => write!(f, "<Review None: ")?,
        }
        write!(
            f,
            "{}, {}, Employee: {}>",
            self.year, self.summary, self.employee_id
        )
    }
}

fn validate_year(year: i64) -> Result<i64, ReviewValidationError> {
    if year < MIN_REVIEW_YEAR {
        return Err(ReviewValidationError::YearBeforeMinimum { year });
    }
    Ok(year)
}

fn normalize_summary(summary: String) -> Result<String, ReviewValidationError> {
    let trimmed = summary.trim();
    if trimmed.is_empty() {
        return Err(ReviewValidationError::EmptySummary);
    }
    if trimmed.len() == summary.len() {
        return Ok(summary);
    }
    Ok(trimmed.to_string())
}

fn ensure_employee_exists<C>(employee_id: EmployeeId, employees: &C) -> Result<(), ReviewError>
where
    C: EmployeeExistenceChecker + ?Sized,
{
    if !employees.employee_exists(employee_id)? {
        return Err(ReviewValidationError::UnknownEmployee { employee_id }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{normalize_summary, validate_year, ReviewValidationError};

    #[test]
    fn year_boundary_is_inclusive() {
        assert_eq!(validate_year(2000), Ok(2000));
        assert_eq!(
            validate_year(1999),
            Err(ReviewValidationError::YearBeforeMinimum { year: 1999 })
        );
    }

    #[test]
    fn summary_is_trimmed_and_blank_is_rejected() {
        assert_eq!(normalize_summary("ok".to_string()), Ok("ok".to_string()));
        assert_eq!(
            normalize_summary("  padded \n".to_string()),
            Ok("padded".to_string())
        );
        assert_eq!(
            normalize_summary(" \t\n".to_string()),
            Err(ReviewValidationError::EmptySummary)
        );
        assert_eq!(
            normalize_summary(String::new()),
            Err(ReviewValidationError::EmptySummary)
        );
    }
}
