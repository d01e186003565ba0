//! Types describing how a restaurant name was resolved.

use serde::Serialize;
use std::fmt;

/// Which heuristic produced a resolved name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    /// A dataset restaurant name appears inside the query
    Dataset,
    /// Text between quotes in the query
    Quoted,
    /// Trailing `é o/a <name>?` question form
    Question,
}

impl fmt::Display for NameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NameSource::Dataset => "dataset",
            NameSource::Quoted => "quoted",
            NameSource::Question => "question",
        };
        f.write_str(label)
    }
}

/// A resolved restaurant name and where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub name: String,
    pub source: NameSource,
}

impl Resolution {
    pub fn new(name: impl Into<String>, source: NameSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}
