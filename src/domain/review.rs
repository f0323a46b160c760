use chrono::{DateTime, Utc};
use serde::Serialize;

use super::product::RatingSummary;

/// Lowest rating a reviewer may give.
pub const RATING_MIN: u8 = 1;
/// Highest rating a reviewer may give.
pub const RATING_MAX: u8 = 5;

/// A single product review. At most one exists per (product, reviewer)
/// pair; it is owned by its product and deleted with it.
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub reviewer_id: String,
    /// Display name captured at write time, not live-joined.
    pub reviewer_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or replacing a review.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub reviewer_id: String,
    pub reviewer_name: String,
    pub rating: u8,
    pub comment: String,
}

/// A product's reviews plus the aggregate snapshot they derive.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewListing {
    pub reviews: Vec<Review>,
    pub rating: RatingSummary,
}

/// Whether `rating` falls inside the accepted range.
pub fn rating_in_range(rating: u8) -> bool {
    (RATING_MIN..=RATING_MAX).contains(&rating)
}
