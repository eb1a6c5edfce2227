//! Denormalized rating aggregate.

use serde::{Deserialize, Serialize};

/// Average shown for a store with no reviews yet. An unrated store is
/// treated as average-good rather than zero so it is not buried in ranking.
pub const UNRATED_AVERAGE: f64 = 4.5;

/// Rating summary stored on a store.
///
/// # Invariant
/// Always the image of the store's current review set under
/// [`RatingSummary::from_ratings`]; never written any other way. The mean of
/// in-range ratings cannot leave [1, 5], so the bound holds structurally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Mean rating, rounded to one decimal.
    pub average: f64,
    /// Number of reviews.
    pub quantity: u64,
}

impl Default for RatingSummary {
    fn default() -> Self {
        Self {
            average: UNRATED_AVERAGE,
            quantity: 0,
        }
    }
}

impl RatingSummary {
    /// Aggregate a review-rating multiset.
    pub fn from_ratings(ratings: &[u8]) -> Self {
        if ratings.is_empty() {
            return Self::default();
        }

        let sum: u64 = ratings.iter().map(|r| u64::from(*r)).sum();
        let mean = sum as f64 / ratings.len() as f64;

        Self {
            average: (mean * 10.0).round() / 10.0,
            quantity: ratings.len() as u64,
        }
    }
}
