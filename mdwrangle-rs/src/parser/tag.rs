//! Tag location: `#tag` tokens in prose and list-form tags in metadata.

use crate::error::Result;
use regex::Regex;
use serde_yaml::Value;
use std::collections::HashSet;
use std::sync::LazyLock;

// A tag starts with a letter or underscore (never a bare number) and may
// contain word characters, `/` for nesting, and `-`. The char before the `#`
// must not be a word character or `&` (HTML entities).
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w&])#([a-zA-Z_][\w/-]*)").unwrap());

/// Find all hashtag occurrences in text, `#`-prefixed, in order.
pub fn find_hashtags(text: &str) -> Vec<String> {
    let mut tags = Vec::new();
    for cap in HASHTAG.captures_iter(text) {
        let m = cap.get(1).expect("capture group 1 always present");
        // The regex cannot express a trailing boundary; reject matches glued
        // to a following word character.
        if let Some(next) = text[m.end()..].chars().next() {
            if next.is_alphanumeric() || next == '_' || next == '/' {
                continue;
            }
        }
        tags.push(format!("#{}", m.as_str()));
    }
    tags
}

/// Remove every `#tag` occurrence from text.
///
/// The tag must end at a non-word character or end of input; the single
/// boundary character is consumed along with the tag, so `"a #x b"` becomes
/// `"a b"` rather than leaving a double space.
pub fn remove_hashtag(text: &str, tag: &str) -> Result<String> {
    let pattern = format!(r"#{}([^\w]|$)", regex::escape(tag));
    let re = Regex::new(&pattern)?;
    Ok(re.replace_all(text, "").into_owned())
}

/// Normalize a metadata `tags` value to a list of plain tag names.
///
/// Handles both representations symmetrically: a sequence yields its
/// elements, a delimited string is split on commas, whitespace, and
/// newlines. A leading `#` on an entry is dropped.
pub fn normalize_tags_value(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(seq) => seq
            .iter()
            .filter_map(scalar_to_string)
            .map(|s| clean_tag_entry(&s))
            .filter(|s| !s.is_empty())
            .collect(),
        other => match scalar_to_string(other) {
            Some(s) => s
                .split(|c: char| c == ',' || c.is_whitespace())
                .map(clean_tag_entry)
                .filter(|s| !s.is_empty())
                .collect(),
            None => Vec::new(),
        },
    }
}

fn clean_tag_entry(entry: &str) -> String {
    entry.trim().trim_start_matches('#').to_string()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Drop duplicate tags, preserving order of first occurrence.
pub fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter().filter(|t| seen.insert(t.clone())).collect()
}

/// Build a `tags` metadata value from a list of names.
pub fn tags_to_value(tags: &[String]) -> Value {
    Value::Sequence(tags.iter().map(|t| Value::String(t.clone())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_hashtag() {
        assert_eq!(find_hashtags("Some text #rust here."), vec!["#rust"]);
    }

    #[test]
    fn test_nested_hashtag() {
        assert_eq!(find_hashtags("#proj/backlog/urgent"), vec!["#proj/backlog/urgent"]);
    }

    #[test]
    fn test_multiple_hashtags() {
        assert_eq!(
            find_hashtags("Tags: #rust #cli #notes"),
            vec!["#rust", "#cli", "#notes"]
        );
    }

    #[test]
    fn test_numeric_not_a_tag() {
        assert!(find_hashtags("Issue #123 is fixed.").is_empty());
    }

    #[test]
    fn test_html_entity_not_a_tag() {
        assert!(find_hashtags("Use &nbsp; for space.").is_empty());
    }

    #[test]
    fn test_heading_not_a_tag() {
        assert!(find_hashtags("# Heading\n## Subheading").is_empty());
    }

    #[test]
    fn test_remove_hashtag_consumes_boundary() {
        let out = remove_hashtag("Some #alpha text", "alpha").unwrap();
        assert_eq!(out, "Some text");
    }

    #[test]
    fn test_remove_hashtag_at_end_of_string() {
        let out = remove_hashtag("trailing #alpha", "alpha").unwrap();
        assert_eq!(out, "trailing ");
    }

    #[test]
    fn test_remove_hashtag_ignores_longer_tags() {
        let out = remove_hashtag("#alphabet stays", "alpha").unwrap();
        assert_eq!(out, "#alphabet stays");
    }

    #[test]
    fn test_normalize_sequence() {
        let value: Value = serde_yaml::from_str("[a, b, c]").unwrap();
        assert_eq!(normalize_tags_value(&value), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_normalize_delimited_string() {
        let value = Value::String("a, b\nc d".to_string());
        assert_eq!(normalize_tags_value(&value), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_normalize_strips_hash_prefix() {
        let value = Value::String("#a #b".to_string());
        assert_eq!(normalize_tags_value(&value), vec!["a", "b"]);
    }

    #[test]
    fn test_dedup_preserves_first_occurrence() {
        let tags = vec!["a".into(), "b".into(), "a".into(), "c".into(), "b".into()];
        assert_eq!(dedup_tags(tags), vec!["a", "b", "c"]);
    }
}
