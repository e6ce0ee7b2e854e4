//! Review persistence core.
//!
//! Stores annual employee reviews in SQLite, validates them against the
//! employee table, and keeps a repository-owned identity index of saved
//! reviews.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{default_log_level, DbLocation, LoggingConfig, StoreConfig};
pub use logging::{init_logging, logging_status, LoggingError};
pub use model::employee::{
    Employee, EmployeeExistenceChecker, EmployeeId, EmployeeValidationError, LookupError,
};
pub use model::review::{Review, ReviewError, ReviewId, ReviewValidationError, MIN_REVIEW_YEAR};
pub use repo::employee_repo::{EmployeeLookup, LookupChecker, SqliteEmployeeRepository};
pub use repo::identity::IdentityIndex;
pub use repo::review_repo::{RepoError, RepoResult, ReviewRepository, SqliteReviewRepository};
pub use service::review_service::ReviewService;
