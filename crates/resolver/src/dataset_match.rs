//! Dataset-anchored name guess.
//!
//! Looks for a known restaurant whose normalized name occurs inside the
//! normalized query. Known names are tried in the dataset's first-seen
//! order and the first hit wins, so a short early name ("Bistrô") shadows a
//! longer later one ("Bistrô do Porto") when both occur in the query.

use data_loader::{Dataset, Result, normalize};
use tracing::debug;

/// Return the first dataset restaurant (literal spelling) contained in `query`.
pub fn guess_from_dataset(query: &str, dataset: &Dataset) -> Result<Option<String>> {
    let names = dataset.restaurant_names()?;
    Ok(guess_from_names(query, &names))
}

/// Same as [`guess_from_dataset`] over an already loaded name list.
pub fn guess_from_names(query: &str, names: &[String]) -> Option<String> {
    let normalized_query = normalize(query);
    if normalized_query.is_empty() {
        return None;
    }

    let found = names.iter().find(|name| {
        let key = normalize(name);
        !key.is_empty() && normalized_query.contains(&key)
    });

    if let Some(name) = found {
        debug!("Query matched dataset restaurant '{}'", name);
    }
    found.cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matches_accent_and_case_insensitively() {
        let known = names(&["Le Gourmet", "Cantina da María"]);
        let found = guess_from_names("Qual a nota da CANTINA DA MARIA?", &known);
        assert_eq!(found.as_deref(), Some("Cantina da María"));
    }

    #[test]
    fn test_first_seen_name_wins() {
        let known = names(&["Bistrô", "Bistrô do Porto"]);
        let found = guess_from_names("avaliações do bistro do porto", &known);
        assert_eq!(found.as_deref(), Some("Bistrô"));
    }

    #[test]
    fn test_no_match() {
        let known = names(&["Le Gourmet"]);
        assert!(guess_from_names("Qualquer coisa", &known).is_none());
        assert!(guess_from_names("", &known).is_none());
    }
}
