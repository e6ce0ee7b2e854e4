//! Employee record referenced by reviews, and the existence check reviews
//! use to validate their foreign key.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Surrogate key of a row in the `employee` table.
pub type EmployeeId = i64;

/// Validation failures for employee fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeValidationError {
    EmptyName,
    EmptyJobTitle,
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "employee name cannot be empty"),
            Self::EmptyJobTitle => write!(f, "employee job title cannot be empty"),
        }
    }
}

impl Error for EmployeeValidationError {}

/// Failure of the underlying employee lookup (not a negative answer).
#[derive(Debug)]
pub struct LookupError(Box<dyn Error + Send + Sync + 'static>);

impl LookupError {
    pub fn new(source: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self(source.into())
    }
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "employee lookup failed: {}", self.0)
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.0.as_ref())
    }
}

/// Answers whether an employee id refers to an existing employee.
pub trait EmployeeExistenceChecker {
    fn employee_exists(&self, id: EmployeeId) -> Result<bool, LookupError>;
}

impl<T: EmployeeExistenceChecker + ?Sized> EmployeeExistenceChecker for &T {
    fn employee_exists(&self, id: EmployeeId) -> Result<bool, LookupError> {
        (**self).employee_exists(id)
    }
}

/// Persisted employee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub job_title: String,
}

/// Trims `name` and `job_title`, rejecting blank values.
pub(crate) fn normalize_employee_fields(
    name: &str,
    job_title: &str,
) -> Result<(String, String), EmployeeValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EmployeeValidationError::EmptyName);
    }
    let job_title = job_title.trim();
    if job_title.is_empty() {
        return Err(EmployeeValidationError::EmptyJobTitle);
    }
    Ok((name.to_string(), job_title.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{normalize_employee_fields, EmployeeValidationError};

    #[test]
    fn normalize_trims_and_rejects_blank() {
        assert_eq!(
            normalize_employee_fields("  Ada ", " Engineer\n").unwrap(),
            ("Ada".to_string(), "Engineer".to_string())
        );
        assert_eq!(
            normalize_employee_fields(" ", "Engineer").unwrap_err(),
            EmployeeValidationError::EmptyName
        );
        assert_eq!(
            normalize_employee_fields("Ada", "\t").unwrap_err(),
            EmployeeValidationError::EmptyJobTitle
        );
    }
}
