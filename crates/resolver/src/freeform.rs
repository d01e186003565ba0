//! Free-form name extraction, used when no dataset name matches.
//!
//! Two patterns, tried in order:
//! - the contents of the first quoted span (`'...'` or `"..."`)
//! - a trailing Portuguese question `... é o <name>?` / `... é a <name>?`

use crate::types::{NameSource, Resolution};
use regex::Regex;
use std::sync::LazyLock;

static QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"]([^'"]+)['"]"#).expect("quoted-name pattern is valid")
});

static QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[Éé] (o|a)?\s*([^?]+)\??$").expect("question pattern is valid")
});

/// Extract a restaurant name from the query text alone.
pub fn extract_freeform(query: &str) -> Option<Resolution> {
    if let Some(caps) = QUOTED.captures(query) {
        return Some(Resolution::new(caps[1].trim(), NameSource::Quoted));
    }
    if let Some(caps) = QUESTION.captures(query) {
        return Some(Resolution::new(caps[2].trim(), NameSource::Question));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_quotes() {
        let found = extract_freeform(r#"Quero saber sobre "Cantina da Maria""#).unwrap();
        assert_eq!(found.name, "Cantina da Maria");
        assert_eq!(found.source, NameSource::Quoted);
    }

    #[test]
    fn test_single_quotes_trimmed() {
        let found = extract_freeform("Avalie ' Le Gourmet ' por favor").unwrap();
        assert_eq!(found.name, "Le Gourmet");
    }

    #[test]
    fn test_question_form() {
        let found = extract_freeform("Qual é a avaliação média do Bar do Zé?").unwrap();
        assert_eq!(found.name, "avaliação média do Bar do Zé");
        assert_eq!(found.source, NameSource::Question);

        let found = extract_freeform("Como é o Outback").unwrap();
        assert_eq!(found.name, "Outback");
    }

    #[test]
    fn test_nothing_to_extract() {
        assert!(extract_freeform("me diga algo legal").is_none());
        assert!(extract_freeform("").is_none());
    }
}
