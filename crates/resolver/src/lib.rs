//! # Resolver Crate
//!
//! Derives the most likely restaurant name from a free-form user query.
//!
//! ## Strategies
//!
//! ### Dataset match
//! Normalizes the query and every known restaurant name, and returns the
//! first known name (dataset order) contained in the query. The returned
//! value is the dataset's own spelling.
//!
//! ### Free-form extraction
//! Only tried when the dataset match finds nothing:
//! - quoted text: `Quero saber sobre "Cantina da Maria"`
//! - trailing question: `Qual é o Le Gourmet?`
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use resolver::choose_best_name;
//!
//! let dataset = Dataset::locate(None)?;
//! match choose_best_name("Como é o Le Gourmet?", &dataset)? {
//!     Some(name) => println!("resolved: {name}"),
//!     None => println!("no restaurant in query"),
//! }
//! ```

pub mod dataset_match;
pub mod freeform;
pub mod types;

pub use dataset_match::{guess_from_dataset, guess_from_names};
pub use freeform::extract_freeform;
pub use types::{NameSource, Resolution};

use data_loader::{Dataset, Result};
use tracing::{debug, info};

/// Resolve a restaurant from `query`, reporting which strategy matched.
///
/// Dataset read failures propagate; "nothing found" is `Ok(None)`.
pub fn resolve(query: &str, dataset: &Dataset) -> Result<Option<Resolution>> {
    if let Some(name) = guess_from_dataset(query, dataset)? {
        info!("Resolved restaurant '{}' from dataset", name);
        return Ok(Some(Resolution::new(name, NameSource::Dataset)));
    }

    let resolution = extract_freeform(query);
    match &resolution {
        Some(found) => info!("Resolved restaurant '{}' from {} text", found.name, found.source),
        None => debug!("No restaurant name found in query {:?}", query),
    }
    Ok(resolution)
}

/// Resolve a restaurant name from `query`, or `None` when nothing matches.
pub fn choose_best_name(query: &str, dataset: &Dataset) -> Result<Option<String>> {
    Ok(resolve(query, dataset)?.map(|resolution| resolution.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn dataset_with(lines: &[&str]) -> (NamedTempFile, Dataset) {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        let dataset = Dataset::at(file.path());
        (file, dataset)
    }

    #[test]
    fn test_quoted_name_when_not_in_dataset() {
        let (_file, dataset) = dataset_with(&["Le Gourmet.Comida incrível"]);
        let name = choose_best_name(r#"Quero saber sobre "Cantina da Maria""#, &dataset).unwrap();
        assert_eq!(name.as_deref(), Some("Cantina da Maria"));
    }

    #[test]
    fn test_dataset_spelling_wins_over_quoted_text() {
        let (_file, dataset) = dataset_with(&[
            "Le Gourmet.Comida incrível",
            "Cantina da María.Comida boa",
        ]);
        let resolution = resolve(r#"Quero saber sobre "cantina da maria""#, &dataset)
            .unwrap()
            .unwrap();
        assert_eq!(resolution.name, "Cantina da María");
        assert_eq!(resolution.source, NameSource::Dataset);
    }

    #[test]
    fn test_unresolvable_query() {
        let (_file, dataset) = dataset_with(&["Le Gourmet.Comida incrível"]);
        assert!(choose_best_name("me recomende algo", &dataset).unwrap().is_none());
    }

    #[test]
    fn test_missing_dataset_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = Dataset::at(dir.path().join("restaurantes.txt"));
        let err = choose_best_name("Le Gourmet", &dataset).unwrap_err();
        assert!(matches!(err, data_loader::DataLoadError::DatasetNotFound { .. }));
    }
}
