//! Minimal wikilink parsing, enough to resolve a note's outgoing links.

use regex::Regex;
use std::sync::LazyLock;

// [[target]], [[target|alias]], [[target#heading]], ![[embed]]
static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]|#]+)(?:#[^\[\]|]*)?(?:\|[^\[\]]*)?\]\]").unwrap());

/// Extract outgoing link targets from text, trimmed, in order of appearance.
///
/// Heading and alias suffixes are dropped; only the target note name/path
/// remains.
pub fn parse_link_targets(text: &str) -> Vec<String> {
    WIKILINK
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_link() {
        assert_eq!(parse_link_targets("See [[Other Note]]."), vec!["Other Note"]);
    }

    #[test]
    fn test_alias_stripped() {
        assert_eq!(parse_link_targets("[[Note|shown text]]"), vec!["Note"]);
    }

    #[test]
    fn test_heading_stripped() {
        assert_eq!(parse_link_targets("[[Note#Section]]"), vec!["Note"]);
    }

    #[test]
    fn test_embed_target_included() {
        assert_eq!(parse_link_targets("![[Image Note]]"), vec!["Image Note"]);
    }

    #[test]
    fn test_multiple_links() {
        let targets = parse_link_targets("[[A]] then [[B|b]] then [[C#h]]");
        assert_eq!(targets, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_no_links() {
        assert!(parse_link_targets("plain [brackets] only").is_empty());
    }
}
