//! Review store accessor: the per-product review collection operations.
//! Every mutation refreshes the owning product's rating summary before
//! returning, so the aggregate can never be observed stale.

use chrono::Utc;

use crate::domain::{rating_in_range, Product, RatingSummary, Review, ReviewDraft};
use crate::error::CatalogError;

impl Product {
    /// Create or replace the draft author's review.
    ///
    /// Replacement policy: an existing review keeps its position in the
    /// sequence and its original `created_at`; only `rating` and `comment`
    /// are overwritten. Out-of-range ratings are rejected before any
    /// mutation.
    pub fn upsert_review(&mut self, draft: ReviewDraft) -> Result<RatingSummary, CatalogError> {
        if !rating_in_range(draft.rating) {
            return Err(CatalogError::InvalidRating(draft.rating));
        }

        match self
            .reviews
            .iter_mut()
            .find(|review| review.reviewer_id == draft.reviewer_id)
        {
            Some(existing) => {
                existing.rating = draft.rating;
                existing.comment = draft.comment;
            }
            None => self.reviews.push(Review {
                reviewer_id: draft.reviewer_id,
                reviewer_name: draft.reviewer_name,
                rating: draft.rating,
                comment: draft.comment,
                created_at: Utc::now(),
            }),
        }

        self.rating = super::aggregate::summarize(&self.reviews);
        Ok(self.rating)
    }

    /// Remove the reviewer's review. Deleting a review that does not exist
    /// is an error, not a no-op: callers only reach this after confirming
    /// ownership or admin role.
    pub fn delete_review(&mut self, reviewer_id: &str) -> Result<RatingSummary, CatalogError> {
        let position = self
            .reviews
            .iter()
            .position(|review| review.reviewer_id == reviewer_id)
            .ok_or_else(|| CatalogError::ReviewNotFound {
                product_id: self.id.clone(),
                reviewer_id: reviewer_id.to_string(),
            })?;

        self.reviews.remove(position);
        self.rating = super::aggregate::summarize(&self.reviews);
        Ok(self.rating)
    }
}
