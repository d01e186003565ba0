//! Core domain types for restaurant reviews.

use serde::{Deserialize, Serialize};

/// One parsed dataset line: a restaurant name and a single free-text review.
///
/// Records are never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub restaurant_name: String,
    pub review_text: String,
}

impl ReviewRecord {
    pub fn new(restaurant_name: impl Into<String>, review_text: impl Into<String>) -> Self {
        Self {
            restaurant_name: restaurant_name.into(),
            review_text: review_text.into(),
        }
    }
}

/// All reviews found for one restaurant, in dataset order.
///
/// This is the payload the fetch capability hands back to a worker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RestaurantReviews {
    pub restaurant_name: String,
    pub reviews: Vec<String>,
}

impl RestaurantReviews {
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

/// Handle to the review dataset on disk.
///
/// Holds only the resolved path. Every query re-reads the file, so edits to
/// the dataset are picked up by the next call without any cache invalidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub(crate) path: std::path::PathBuf,
}
