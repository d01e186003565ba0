//! Canonical form for restaurant names.
//!
//! Two names refer to the same restaurant iff their normalized forms are
//! equal. The normalized form is only ever used for comparison, never shown.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a string for case, accent and apostrophe insensitive comparison.
///
/// - lowercase
/// - canonical decomposition, then every combining mark is dropped
/// - curly apostrophes are folded to `'`, then all apostrophes are removed
/// - runs of whitespace collapse to a single space, ends trimmed
///
/// Lowercasing happens before decomposition so that characters whose
/// lowercase form carries a combining mark (`İ` -> `i̇`) are still stripped
/// and `normalize(normalize(s)) == normalize(s)` holds.
///
/// # Examples
/// ```
/// use data_loader::normalize;
///
/// assert_eq!(normalize("É"), "e");
/// assert_eq!(normalize("O'Hara’s"), "oharas");
/// assert_eq!(normalize("  Cantina   da  MARIA "), "cantina da maria");
/// ```
pub fn normalize(s: &str) -> String {
    let folded: String = s
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !matches!(c, '\'' | '\u{2018}' | '\u{2019}'))
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Same as [`normalize`] for optional input; absent input yields `""`.
pub fn normalize_opt(s: Option<&str>) -> String {
    s.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_strips_accents_and_case() {
        assert_eq!(normalize("É"), "e");
        assert_eq!(normalize("Açaí do PARÁ"), "acai do para");
    }

    #[test]
    fn test_strips_straight_and_curly_apostrophes() {
        assert_eq!(normalize("O'Hara’s"), "oharas");
        assert_eq!(normalize("‘Mama’"), "mama");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("\tLe   Gourmet \n"), "le gourmet");
    }

    #[test]
    fn test_absent_and_empty_input() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_idempotent_on_random_unicode() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        // Latin, combining marks, Greek/Cyrillic, general punctuation, CJK
        let ranges = [
            0x20u32..0x250,
            0x300..0x370,
            0x370..0x530,
            0x2000..0x2070,
            0x4e00..0x4f00,
        ];

        for _ in 0..50 {
            let len = rng.random_range(0..24);
            let s: String = (0..len)
                .filter_map(|_| {
                    let range = ranges[rng.random_range(0..ranges.len())].clone();
                    char::from_u32(rng.random_range(range))
                })
                .collect();

            let once = normalize(&s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_dotted_capital_i_is_stable() {
        let once = normalize("İstanbul");
        assert_eq!(once, "istanbul");
        assert_eq!(normalize(&once), once);
    }
}
