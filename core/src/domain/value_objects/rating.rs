//! Aggregate rating calculation.

use serde::{Deserialize, Serialize};

/// Arithmetic mean of the given ratings, `0.0` when there are none
pub fn average_rating(ratings: &[u8]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u64 = ratings.iter().map(|&r| u64::from(r)).sum();
    sum as f64 / ratings.len() as f64
}

/// Review count and mean rating of one company
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub number_of_reviews: u64,
    pub average_rating: f64,
}

impl RatingSummary {
    pub fn from_ratings(ratings: &[u8]) -> Self {
        Self {
            number_of_reviews: ratings.len() as u64,
            average_rating: average_rating(ratings),
        }
    }

    /// Builds from a stored aggregate where `AVG` yields NULL for no rows
    pub fn from_aggregate(number_of_reviews: u64, average: Option<f64>) -> Self {
        Self {
            number_of_reviews,
            average_rating: if number_of_reviews == 0 {
                0.0
            } else {
                average.unwrap_or(0.0)
            },
        }
    }
}

impl Default for RatingSummary {
    fn default() -> Self {
        Self::from_ratings(&[])
    }
}
