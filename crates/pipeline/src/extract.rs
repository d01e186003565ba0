//! Pull a JSON object out of free-form worker text.
//!
//! Workers answer in prose, code fences, or bare JSON. One left-to-right
//! pass pairs every `{` with its closing `}` (string literals inside an open
//! span are skipped), then the balanced spans are tried in order of their
//! opening brace and the first that parses as an object wins.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No JSON object found in worker response")]
    NoJsonFound,
}

/// Extract the first parseable JSON object from `text`.
pub fn extract_json(text: &str) -> Result<Value, ExtractError> {
    for (start, end) in balanced_spans(text) {
        let candidate = &text[start..=end];
        if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(candidate) {
            return Ok(value);
        }
    }
    Err(ExtractError::NoJsonFound)
}

/// Byte ranges `(open, close)` of every balanced `{...}` span, ordered by `open`.
///
/// Unmatched braces on either side are dropped. Quotes only open a string
/// while some brace is open, so apostrophes and quotes in surrounding prose
/// do not hide the object that follows them.
fn balanced_spans(text: &str) -> Vec<(usize, usize)> {
    let mut open: Vec<usize> = Vec::new();
    let mut spans = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' if !open.is_empty() => in_string = true,
            '{' => open.push(i),
            '}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, i));
                }
            }
            _ => {}
        }
    }

    spans.sort_unstable_by_key(|&(start, _)| start);
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_object() {
        let value = extract_json(r#"{"X": 7.472}"#).unwrap();
        assert_eq!(value, json!({"X": 7.472}));
    }

    #[test]
    fn test_object_inside_prose_and_fences() {
        let text = "Sure! Here it is:\n```json\n{\"restaurant_name\": \"Le Gourmet\", \"reviews\": [\"a\"]}\n```\nAnything else?";
        let value = extract_json(text).unwrap();
        assert_eq!(value["restaurant_name"], "Le Gourmet");
    }

    #[test]
    fn test_nested_objects_are_not_truncated() {
        let text = r#"result: {"outer": {"inner": {"n": 1}}, "after": true} trailing }"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value, json!({"outer": {"inner": {"n": 1}}, "after": true}));
    }

    #[test]
    fn test_braces_inside_strings() {
        let text = r#"{"review": "tudo {ótimo} \"sério\" }", "n": 2}"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["n"], 2);
        assert_eq!(value["review"], "tudo {ótimo} \"sério\" }");
    }

    #[test]
    fn test_skips_unparseable_span() {
        let text = r#"template {name} then {"ok": 1}"#;
        assert_eq!(extract_json(text).unwrap(), json!({"ok": 1}));
    }

    #[test]
    fn test_no_json() {
        assert_eq!(extract_json(""), Err(ExtractError::NoJsonFound));
        assert_eq!(extract_json("no braces here"), Err(ExtractError::NoJsonFound));
        assert_eq!(extract_json("[1, 2, 3]"), Err(ExtractError::NoJsonFound));
        assert_eq!(extract_json("{unclosed"), Err(ExtractError::NoJsonFound));
    }

    #[test]
    fn test_unmatched_open_braces_before_object() {
        let text = r#"{unclosed "x" {"ok": 1}"#;
        assert_eq!(extract_json(text).unwrap(), json!({"ok": 1}));
    }

    #[test]
    fn test_quotes_in_prose_outside_braces() {
        let text = r#"O "Le Gourmet" é ótimo: {"n": 3}"#;
        assert_eq!(extract_json(text).unwrap(), json!({"n": 3}));
    }

    #[test]
    fn test_many_unmatched_braces_scale_linearly() {
        let mut text = "{".repeat(200_000);
        assert_eq!(extract_json(&text), Err(ExtractError::NoJsonFound));

        text.push_str(r#"{"ok": true}"#);
        assert_eq!(extract_json(&text).unwrap(), json!({"ok": true}));

        let closed = "{}".repeat(100_000);
        assert_eq!(extract_json(&closed).unwrap(), json!({}));
    }
}
