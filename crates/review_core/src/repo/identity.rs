//! Repository-owned identity index for persisted reviews.
//!
//! # Invariants
//! - Holds only reviews that have an id.
//! - Lives and dies with the repository that owns it; nothing is global.

use crate::model::review::{Review, ReviewId};
use std::collections::BTreeMap;

/// In-memory map from persisted review id to the last saved snapshot.
///
/// This is a convenience cache, not storage. It only knows about reviews
/// written or deleted through its owning repository.
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    entries: BTreeMap<ReviewId, Review>,
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or refreshes the snapshot of a saved review.
    ///
    /// Reviews without an id are ignored.
    pub fn register(&mut self, review: &Review) {
        if let Some(id) = review.id() {
            self.entries.insert(id, review.clone());
        }
    }

    /// Drops the entry for `id`; absent ids are a no-op.
    pub fn evict(&mut self, id: ReviewId) -> Option<Review> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: ReviewId) -> Option<&Review> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: ReviewId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ReviewId> + '_ {
        self.entries.keys().copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
