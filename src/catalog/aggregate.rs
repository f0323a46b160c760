//! Rating aggregation: recomputes a product's summary from its current
//! review collection. The summary is a materialized view; it is only ever
//! written through [`summarize`] and only inside the catalog actor's
//! critical section, immediately after the mutation it reflects.

use crate::domain::{RatingSummary, Review};

/// Recompute `{count, average}` from the full review collection.
///
/// The average is the arithmetic mean rounded to one decimal place for
/// display stability, or 0.0 for an empty collection. Idempotent: an
/// unchanged collection always yields the same summary.
pub fn summarize(reviews: &[Review]) -> RatingSummary {
    let count = reviews.len();
    if count == 0 {
        return RatingSummary::default();
    }
    let sum: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
    let mean = f64::from(sum) / count as f64;
    RatingSummary {
        count,
        average: (mean * 10.0).round() / 10.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn review(reviewer: &str, rating: u8) -> Review {
        Review {
            reviewer_id: reviewer.to_string(),
            reviewer_name: reviewer.to_string(),
            rating,
            comment: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_collection_summarizes_to_zero() {
        assert_eq!(summarize(&[]), RatingSummary::default());
    }

    #[test]
    fn mean_is_rounded_to_one_decimal() {
        let reviews = vec![review("a", 4), review("b", 5), review("c", 5)];
        let summary = summarize(&reviews);
        assert_eq!(summary.count, 3);
        // (4 + 5 + 5) / 3 = 4.666... -> 4.7
        assert_eq!(summary.average, 4.7);
    }

    #[test]
    fn exact_mean_is_unchanged() {
        let reviews = vec![review("a", 4), review("b", 5), review("c", 3)];
        assert_eq!(
            summarize(&reviews),
            RatingSummary {
                count: 3,
                average: 4.0
            }
        );
    }

    #[test]
    fn summarize_is_idempotent() {
        let reviews = vec![review("a", 2), review("b", 5)];
        assert_eq!(summarize(&reviews), summarize(&reviews));
    }
}
