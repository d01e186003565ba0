//! Locating the dataset and answering lookups against it.
//!
//! Lookups go through the normalized name (see [`crate::normalize`]), so
//! `"cantina da maria"` and `"Cantina da María"` find the same reviews.

use crate::error::{DataLoadError, Result};
use crate::normalize::normalize;
use crate::parser;
use crate::types::{Dataset, RestaurantReviews, ReviewRecord};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name searched for when no explicit dataset path is given
pub const DATASET_FILE_NAME: &str = "restaurantes.txt";

/// Candidate dataset paths, in search order:
/// 1. next to this crate's sources
/// 2. the current working directory
/// 3. a `data/` subdirectory of the working directory
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = vec![Path::new(env!("CARGO_MANIFEST_DIR")).join(DATASET_FILE_NAME)];
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(DATASET_FILE_NAME));
    }
    candidates.push(Path::new("data").join(DATASET_FILE_NAME));
    candidates
}

/// Return the first candidate path that exists.
pub fn dataset_path() -> Result<PathBuf> {
    let candidates = candidate_paths();
    match candidates.iter().find(|p| p.is_file()) {
        Some(path) => Ok(path.clone()),
        None => Err(DataLoadError::DatasetNotFound {
            searched: candidates,
        }),
    }
}

impl Dataset {
    /// Locate the dataset.
    ///
    /// With an explicit path, that path must exist; otherwise the default
    /// search order of [`candidate_paths`] applies.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => {
                return Err(DataLoadError::DatasetNotFound {
                    searched: vec![path.to_path_buf()],
                });
            }
            None => dataset_path()?,
        };
        info!("Using review dataset at {}", path.display());
        Ok(Self { path })
    }

    /// Wrap a known path without checking it exists.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read and parse the whole dataset.
    pub fn records(&self) -> Result<Vec<ReviewRecord>> {
        parser::parse_dataset(&self.path)
    }

    /// Distinct restaurant names in first-seen order.
    ///
    /// Names are de-duplicated by normalized form; the first literal
    /// spelling encountered is the one kept.
    pub fn restaurant_names(&self) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let names = self
            .records()?
            .into_iter()
            .filter(|record| seen.insert(normalize(&record.restaurant_name)))
            .map(|record| record.restaurant_name)
            .collect();
        Ok(names)
    }

    /// All reviews whose restaurant normalizes to the same form as `restaurant_name`.
    ///
    /// The returned name is the query trimmed, not the dataset spelling.
    /// An unknown restaurant yields an empty review list, not an error.
    pub fn fetch_restaurant_data(&self, restaurant_name: &str) -> Result<RestaurantReviews> {
        let target_key = restaurant_name.trim();
        let target_norm = normalize(target_key);

        let reviews: Vec<String> = self
            .records()?
            .into_iter()
            .filter(|record| normalize(&record.restaurant_name) == target_norm)
            .map(|record| record.review_text)
            .collect();

        debug!("Found {} reviews for '{}'", reviews.len(), target_key);
        Ok(RestaurantReviews {
            restaurant_name: target_key.to_string(),
            reviews,
        })
    }
}
