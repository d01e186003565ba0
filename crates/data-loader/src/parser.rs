//! Parser for the restaurant review dataset.
//!
//! Format: one record per line, `<restaurant name>.<review text>`.
//! The first `.` splits the line; both halves are trimmed. Blank lines and
//! lines reading `none` (any case) are ignored, as are lines without a
//! name before the first dot.

use crate::error::{DataLoadError, Result};
use crate::types::ReviewRecord;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Parse a single dataset line, returning `None` for lines that carry no record.
///
/// Example: `"Pizza Place.Great food"` -> `("Pizza Place", "Great food")`
pub fn parse_line(raw: &str) -> Option<ReviewRecord> {
    let line = raw.trim();
    if line.is_empty() || line.eq_ignore_ascii_case("none") {
        return None;
    }

    let dot_idx = line.find('.')?;
    if dot_idx == 0 {
        return None;
    }

    let name = line[..dot_idx].trim();
    let review = line[dot_idx + 1..].trim();
    if name.is_empty() || review.is_empty() {
        return None;
    }

    Some(ReviewRecord::new(name, review))
}

/// Parse the whole dataset text, keeping line order.
pub fn parse_lines(content: &str) -> Vec<ReviewRecord> {
    content.lines().filter_map(parse_line).collect()
}

/// Read and parse the dataset file at `path`.
///
/// A file that vanished since it was located reports `DatasetNotFound`;
/// every other I/O failure is a `DatasetReadError`.
pub fn parse_dataset(path: &Path) -> Result<Vec<ReviewRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => DataLoadError::DatasetNotFound {
            searched: vec![path.to_path_buf()],
        },
        _ => DataLoadError::DatasetReadError {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let records = parse_lines(&content);
    debug!("Parsed {} review records from {}", records.len(), path.display());
    Ok(records)
}
