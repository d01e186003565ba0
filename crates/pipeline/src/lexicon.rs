//! The fixed adjective lexicon used by the analysis stage.
//!
//! Five tiers, applied to food and service independently. Only these words
//! count; a review with none of them for a dimension scores 3 there, and
//! several of them for one dimension resolve to the lowest tier.

/// Score assumed for a dimension no lexicon adjective talks about
pub const DEFAULT_TIER: u8 = 3;

pub const LEXICON: [(u8, [&str; 3]); 5] = [
    (1, ["horrível", "nojento", "terrível"]),
    (2, ["ruim", "desagradável", "ofensivo"]),
    (3, ["mediano", "sem graça", "irrelevante"]),
    (4, ["bom", "agradável", "satisfatório"]),
    (5, ["incrível", "impressionante", "surpreendente"]),
];

/// Render the lexicon as `"<tier>/5: a, b, c"` lines.
pub fn render_lexicon() -> String {
    LEXICON
        .iter()
        .map(|(tier, words)| format!("{}/5: {}", tier, words.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let rendered = render_lexicon();
        assert!(rendered.starts_with("1/5: horrível, nojento, terrível\n"));
        assert!(rendered.ends_with("5/5: incrível, impressionante, surpreendente"));
        assert_eq!(rendered.lines().count(), 5);
    }
}
