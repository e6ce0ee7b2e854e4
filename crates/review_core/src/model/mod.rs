//! Domain records for performance reviews and the employees they reference.
//!
//! # Responsibility
//! - Define validated in-memory shapes used by repositories and services.
//! - Keep the trusted (store-loaded) construction path separate from the
//!   validating one.
//!
//! # Invariants
//! - A `Review` built through `Review::new` always references an employee
//!   that existed at construction time.

pub mod employee;
pub mod review;
