//! Frontmatter envelope handling.
//!
//! A note is a YAML block delimited by `---` marker lines, followed by body
//! text. The envelope is preserved byte-for-byte unless an edit explicitly
//! rewrites the metadata.

use crate::error::{Result, WrangleError};
use crate::types::Metadata;
use serde_yaml::Value;
use std::path::Path;

/// Result of splitting a note into frontmatter and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// Raw YAML between the delimiters, without them.
    pub yaml: Option<&'a str>,
    /// Body text following the closing delimiter.
    pub body: &'a str,
}

/// Split content into frontmatter YAML and body.
///
/// Frontmatter must open with `---` on the very first line and close with a
/// `---` line of its own; anything else is all body.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let all_body = FrontmatterSplit {
        yaml: None,
        body: content,
    };

    let rest = match content.strip_prefix("---\n").or_else(|| content.strip_prefix("---\r\n")) {
        Some(rest) => rest,
        None => return all_body,
    };

    // Empty frontmatter: the closing delimiter follows immediately.
    if let Some(body) = rest.strip_prefix("---\n").or_else(|| rest.strip_prefix("---\r\n")) {
        return FrontmatterSplit {
            yaml: Some(""),
            body,
        };
    }
    if rest == "---" {
        return FrontmatterSplit {
            yaml: Some(""),
            body: "",
        };
    }

    // Closing delimiter: a line that is exactly `---`, or `---` at EOF.
    let mut search_from = 0;
    loop {
        let candidate = match rest[search_from..].find("\n---") {
            Some(idx) => search_from + idx,
            None => return all_body,
        };
        let after = &rest[candidate + 4..];
        if after.is_empty() {
            // `---` closes the file.
            let yaml_end = candidate + 1;
            return FrontmatterSplit {
                yaml: Some(&rest[..yaml_end]),
                body: "",
            };
        }
        if let Some(body) = after.strip_prefix('\n').or_else(|| after.strip_prefix("\r\n")) {
            let yaml_end = candidate + 1;
            return FrontmatterSplit {
                yaml: Some(&rest[..yaml_end]),
                body,
            };
        }
        // `---` was a prefix of a longer line (e.g. `----`); keep looking.
        search_from = candidate + 1;
    }
}

/// Extract the raw frontmatter YAML, if present.
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    split_frontmatter(content).yaml
}

/// Body text with the frontmatter block removed.
pub fn body_of(content: &str) -> &str {
    split_frontmatter(content).body
}

/// Parse frontmatter into a metadata mapping.
///
/// A present but non-mapping frontmatter block (e.g. a bare list) is an
/// error; absence is `None`.
pub fn parse_metadata(content: &str, path: &Path) -> Result<Option<Metadata>> {
    let yaml = match extract_frontmatter(content) {
        Some(yaml) => yaml,
        None => return Ok(None),
    };

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| WrangleError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        Value::Mapping(map) => Ok(Some(map)),
        Value::Null => Ok(Some(Metadata::new())),
        other => Err(WrangleError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: format!("expected a mapping, got {}", value_kind(&other)),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Serialize a metadata mapping to a frontmatter block, delimiters included.
pub fn serialize_frontmatter(metadata: &Metadata) -> Result<String> {
    let yaml = serde_yaml::to_string(metadata)?;
    Ok(format!("---\n{}---\n", yaml))
}

/// Compose full note content from metadata and body.
///
/// An empty mapping produces no frontmatter block at all, so deleting a
/// note's last property removes the envelope rather than leaving `{}`.
pub fn compose(metadata: &Metadata, body: &str) -> Result<String> {
    if metadata.is_empty() {
        return Ok(body.to_string());
    }
    Ok(format!("{}{}", serialize_frontmatter(metadata)?, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;
    use std::path::PathBuf;

    #[test]
    fn test_split_no_frontmatter() {
        let split = split_frontmatter("Just some content");
        assert_eq!(split.yaml, None);
        assert_eq!(split.body, "Just some content");
    }

    #[test]
    fn test_split_with_frontmatter() {
        let content = "---\ntitle: Test\ntags: [a, b]\n---\n\nContent here";
        let split = split_frontmatter(content);
        assert_eq!(split.yaml, Some("title: Test\ntags: [a, b]\n"));
        assert_eq!(split.body, "\nContent here");
    }

    #[test]
    fn test_split_frontmatter_at_eof() {
        let split = split_frontmatter("---\ntitle: Test\n---");
        assert_eq!(split.yaml, Some("title: Test\n"));
        assert_eq!(split.body, "");
    }

    #[test]
    fn test_no_closing_delimiter_is_all_body() {
        let content = "---\ntitle: Test\n\nContent without closing";
        let split = split_frontmatter(content);
        assert_eq!(split.yaml, None);
        assert_eq!(split.body, content);
    }

    #[test]
    fn test_triple_dash_in_body() {
        let content = "---\ntitle: Test\n---\n\n---\n\nmore";
        let split = split_frontmatter(content);
        assert_eq!(split.yaml, Some("title: Test\n"));
        assert!(split.body.contains("---"));
    }

    #[test]
    fn test_longer_dash_line_not_a_delimiter() {
        let content = "---\ntitle: Test\n----\nnope\n---\nbody";
        let split = split_frontmatter(content);
        assert_eq!(split.yaml, Some("title: Test\n----\nnope\n"));
        assert_eq!(split.body, "body");
    }

    #[test]
    fn test_split_empty_frontmatter() {
        let split = split_frontmatter("---\n---\nbody\n");
        assert_eq!(split.yaml, Some(""));
        assert_eq!(split.body, "body\n");

        let meta = parse_metadata("---\n---\nbody\n", &PathBuf::from("a.md"))
            .unwrap()
            .unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn test_parse_metadata() {
        let content = "---\ntitle: My Note\ntags:\n  - rust\n---\nContent";
        let meta = parse_metadata(content, &PathBuf::from("a.md"))
            .unwrap()
            .unwrap();
        assert_eq!(meta.get("title"), Some(&Value::String("My Note".into())));
    }

    #[test]
    fn test_parse_non_mapping_frontmatter_fails() {
        let content = "---\n- just\n- a list\n---\nContent";
        let result = parse_metadata(content, &PathBuf::from("a.md"));
        assert!(matches!(
            result,
            Err(crate::error::WrangleError::InvalidFrontmatter { .. })
        ));
    }

    #[test]
    fn test_compose_roundtrip() {
        let mut meta = Metadata::new();
        meta.insert(Value::String("title".into()), Value::String("New".into()));
        let content = compose(&meta, "Body\n").unwrap();
        assert!(content.starts_with("---\n"));
        assert!(content.contains("title: New"));
        assert!(content.ends_with("---\nBody\n"));

        let split = split_frontmatter(&content);
        assert_eq!(split.body, "Body\n");
    }

    #[test]
    fn test_compose_empty_metadata_drops_envelope() {
        let content = compose(&Metadata::new(), "Body only\n").unwrap();
        assert_eq!(content, "Body only\n");
    }
}
