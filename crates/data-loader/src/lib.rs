//! # Data Loader Crate
//!
//! Reads the restaurant review dataset and answers name-based lookups.
//!
//! ## Main Components
//!
//! - **normalize**: canonical form used to compare restaurant names
//! - **parser**: parse `<name>.<review>` lines into [`ReviewRecord`]s
//! - **index**: locate the dataset file and query it by restaurant
//! - **types**: core domain types
//! - **error**: error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//!
//! let dataset = Dataset::locate(None)?;
//! let found = dataset.fetch_restaurant_data("Le Gourmet")?;
//! println!("{} has {} reviews", found.restaurant_name, found.reviews.len());
//! ```
//!
//! There is no cache: each query re-reads the file. The dataset is small and
//! a pipeline run touches it only a handful of times.

pub mod error;
pub mod index;
pub mod normalize;
pub mod parser;
pub mod types;

// Re-export commonly used items for convenience
pub use error::{DataLoadError, Result};
pub use index::{DATASET_FILE_NAME, candidate_paths, dataset_path};
pub use normalize::{normalize, normalize_opt};
pub use parser::{parse_dataset, parse_line, parse_lines};
pub use types::{Dataset, RestaurantReviews, ReviewRecord};
