//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for reviews and the
//!   employee lookup they depend on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Review writes only accept reviews built through validating APIs.
//! - Rows read back from the store are trusted and never re-validated.
//! - Not-found reads return `Ok(None)`; writes against a missing row return
//!   `RepoError::NotFound`.

pub mod employee_repo;
pub mod identity;
pub mod review_repo;
