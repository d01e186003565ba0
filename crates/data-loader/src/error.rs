//! Error types for the data-loader crate.
//!
//! Two things can go wrong when reading reviews: the dataset file cannot be
//! located at all, or it exists but reading it fails. Both propagate to the
//! caller unchanged.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or reading the review dataset
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// None of the candidate paths exist
    #[error("Dataset file not found (searched: {})", display_paths(.searched))]
    DatasetNotFound { searched: Vec<PathBuf> },

    /// The file exists but reading it failed
    #[error("Failed to read dataset {}: {source}", .path.display())]
    DatasetReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
