//! File records: the per-file snapshot an edit run operates on.

use crate::error::Result;
use crate::note::Note;
use crate::parser::{self, inline_field};
use crate::types::Metadata;
use serde_yaml::Value;
use std::path::PathBuf;

/// Everything the engines need to know about one note, captured up front.
///
/// Engines treat the record as read-only input; results are fresh values.
/// `properties` is the resolved view (frontmatter plus inline fields), which
/// `nested-tags` needs because it works from the original representation,
/// not the serialized frontmatter.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Path relative to the vault root.
    pub path: PathBuf,
    /// File name without the `.md` extension.
    pub title: String,
    /// Full raw content, envelope included.
    pub content: String,
    /// Body text following the frontmatter block.
    pub body: String,
    /// Parsed frontmatter, empty mapping when the note has none.
    pub metadata: Metadata,
    /// All tags live in the file, `#`-prefixed: frontmatter list entries and
    /// inline hashtags, deduplicated in order of appearance.
    pub tags: Vec<String>,
    /// Resolved property values: frontmatter keys, then inline fields for
    /// keys frontmatter does not define.
    pub properties: Metadata,
    /// Outgoing wikilink targets in the body.
    pub links: Vec<String>,
}

impl FileRecord {
    /// Build a record by scanning a loaded note.
    pub fn scan(note: &Note) -> Result<Self> {
        let metadata = note.metadata()?.unwrap_or_default();
        let body = note.body().to_string();

        let mut properties = metadata.clone();
        for (key, value) in inline_field::scan_all(&body) {
            if !properties.contains_key(key.as_str()) {
                properties.insert(Value::String(key), Value::String(value));
            }
        }

        let mut tags: Vec<String> = metadata
            .get("tags")
            .map(parser::normalize_tags_value)
            .unwrap_or_default()
            .into_iter()
            .map(|t| format!("#{}", t))
            .collect();
        tags.extend(parser::find_hashtags(&body));
        let tags = parser::dedup_tags(tags);

        let links = parser::parse_link_targets(&body);

        Ok(Self {
            path: note.path.clone(),
            title: note.title().to_string(),
            content: note.content.clone(),
            body,
            metadata,
            tags,
            properties,
            links,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_for(content: &str) -> FileRecord {
        let note = Note::new("sub/Sample.md", content);
        FileRecord::scan(&note).unwrap()
    }

    #[test]
    fn test_scan_plain_note() {
        let rec = record_for("Just text, no metadata.\n");
        assert_eq!(rec.title, "Sample");
        assert!(rec.metadata.is_empty());
        assert!(rec.tags.is_empty());
        assert_eq!(rec.body, "Just text, no metadata.\n");
    }

    #[test]
    fn test_scan_collects_tags_from_both_sources() {
        let rec = record_for("---\ntags: [alpha, beta]\n---\nBody with #gamma and #alpha.\n");
        assert_eq!(rec.tags, vec!["#alpha", "#beta", "#gamma"]);
    }

    #[test]
    fn test_scan_resolves_inline_properties() {
        let rec = record_for("---\nstatus: open\n---\nstatus:: shadowed\n[due:: tomorrow]\n");
        // Frontmatter wins for a shared key.
        assert_eq!(
            rec.properties.get("status"),
            Some(&Value::String("open".into()))
        );
        assert_eq!(
            rec.properties.get("due"),
            Some(&Value::String("tomorrow".into()))
        );
    }

    #[test]
    fn test_scan_collects_links() {
        let rec = record_for("See [[Other]] and [[Third|alias]].\n");
        assert_eq!(rec.links, vec!["Other", "Third"]);
    }
}
