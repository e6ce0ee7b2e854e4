//! Review use-case service.
//!
//! # Responsibility
//! - Provide id-based entry points over a `ReviewRepository`.
//!
//! # Invariants
//! - Service APIs never bypass repository validation or the identity index.
//! - Id-based mutations on a missing review return `RepoError::NotFound`.

use crate::model::employee::EmployeeId;
use crate::model::review::{Review, ReviewId};
use crate::repo::review_repo::{RepoError, RepoResult, ReviewRepository};

/// Use-case service wrapper for review persistence.
pub struct ReviewService<R: ReviewRepository> {
    repo: R,
}

impl<R: ReviewRepository> ReviewService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates the backing table if needed.
    pub fn ensure_schema(&self) -> RepoResult<()> {
        self.repo.create_table()
    }

    /// Validates and persists a new review.
    pub fn record_review(
        &mut self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<Review> {
        self.repo.create(year, summary, employee_id)
    }

    pub fn get_review(&self, id: ReviewId) -> RepoResult<Option<Review>> {
        self.repo.find_by_id(id)
    }

    /// Replaces the summary of an existing review.
    pub fn revise_summary(&mut self, id: ReviewId, summary: &str) -> RepoResult<Review> {
        let mut review = self.load(id)?;
        review.set_summary(summary)?;
        self.repo.update(&review)?;
        Ok(review)
    }

    /// Moves an existing review to another employee.
    pub fn reassign(&mut self, id: ReviewId, employee_id: EmployeeId) -> RepoResult<Review> {
        let mut review = self.load(id)?;
        self.repo.reassign_employee(&mut review, employee_id)?;
        self.repo.update(&review)?;
        Ok(review)
    }

    /// Deletes an existing review.
    pub fn retract(&mut self, id: ReviewId) -> RepoResult<()> {
        let mut review = self.load(id)?;
        self.repo.delete(&mut review)
    }

    pub fn list_reviews(&self) -> RepoResult<Vec<Review>> {
        self.repo.get_all()
    }

    pub fn reviews_for_employee(&self, employee_id: EmployeeId) -> RepoResult<Vec<Review>> {
        self.repo.find_by_employee(employee_id)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    fn load(&self, id: ReviewId) -> RepoResult<Review> {
        self.repo.find_by_id(id)?.ok_or(RepoError::NotFound(id))
    }
}
