//! Tag edit engine: add and delete, across metadata and body text.
//!
//! `delete` strips both representations; `add` only ever touches
//! `metadata.tags`, never the body. That asymmetry is deliberate.

use crate::error::Result;
use crate::parser;
use crate::record::FileRecord;
use crate::types::{Metadata, PendingEdits, TagAction};
use serde_yaml::Value;

/// Apply every pending tag action to one file.
pub fn apply_tag_edits(
    edits: &PendingEdits<TagAction>,
    record: &FileRecord,
) -> Result<(Metadata, String)> {
    let mut metadata = record.metadata.clone();
    let mut text = record.body.clone();

    for (tag, action) in edits.iter() {
        match action {
            TagAction::Delete => {
                text = parser::remove_hashtag(&text, tag)?;

                if let Some(tags) = metadata.get("tags").map(parser::normalize_tags_value) {
                    let kept: Vec<String> = tags
                        .iter()
                        .filter(|t| !t.eq_ignore_ascii_case(tag))
                        .cloned()
                        .collect();
                    // Leave the stored representation alone unless the tag
                    // was actually present.
                    if kept.len() != tags.len() {
                        if kept.is_empty() {
                            metadata.remove("tags");
                        } else {
                            metadata
                                .insert(Value::String("tags".into()), parser::tags_to_value(&kept));
                        }
                    }
                }
            }

            TagAction::Add => {
                let mut tags = metadata
                    .get("tags")
                    .map(parser::normalize_tags_value)
                    .unwrap_or_default();
                tags.push(tag.clone());
                let tags = parser::dedup_tags(tags);
                metadata.insert(Value::String("tags".into()), parser::tags_to_value(&tags));
            }
        }
    }

    Ok((metadata, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;
    use pretty_assertions::assert_eq;

    fn record_for(content: &str) -> FileRecord {
        FileRecord::scan(&Note::new("Sample.md", content)).unwrap()
    }

    fn one_edit(tag: &str, action: TagAction) -> PendingEdits<TagAction> {
        let mut edits = PendingEdits::new();
        edits.set(tag, action);
        edits
    }

    #[test]
    fn test_delete_removes_from_sequence() {
        let record = record_for("---\ntags: [x, y]\n---\nbody\n");
        let edits = one_edit("y", TagAction::Delete);
        let (metadata, _) = apply_tag_edits(&edits, &record).unwrap();
        assert_eq!(
            parser::normalize_tags_value(metadata.get("tags").unwrap()),
            vec!["x"]
        );
    }

    #[test]
    fn test_delete_last_tag_drops_key() {
        let record = record_for("---\ntags: [only]\n---\n");
        let edits = one_edit("only", TagAction::Delete);
        let (metadata, _) = apply_tag_edits(&edits, &record).unwrap();
        assert!(metadata.get("tags").is_none());
    }

    #[test]
    fn test_delete_from_delimited_string() {
        let record = record_for("---\ntags: \"x, y\"\n---\n");
        let edits = one_edit("Y", TagAction::Delete);
        let (metadata, _) = apply_tag_edits(&edits, &record).unwrap();
        assert_eq!(
            parser::normalize_tags_value(metadata.get("tags").unwrap()),
            vec!["x"]
        );
    }

    #[test]
    fn test_delete_strips_body_hashtags() {
        let record = record_for("Some #stale text and #stale again\n");
        let edits = one_edit("stale", TagAction::Delete);
        let (_, text) = apply_tag_edits(&edits, &record).unwrap();
        assert!(!text.contains("#stale"));
    }

    #[test]
    fn test_delete_absent_tag_is_noop() {
        let record = record_for("---\ntags: [x]\n---\nbody text\n");
        let edits = one_edit("missing", TagAction::Delete);
        let (metadata, text) = apply_tag_edits(&edits, &record).unwrap();
        assert_eq!(metadata, record.metadata);
        assert_eq!(text, record.body);
    }

    #[test]
    fn test_add_creates_sequence() {
        let record = record_for("Some #alpha text");
        let edits = one_edit("beta", TagAction::Add);
        let (metadata, text) = apply_tag_edits(&edits, &record).unwrap();
        assert_eq!(
            parser::normalize_tags_value(metadata.get("tags").unwrap()),
            vec!["beta"]
        );
        // Body is byte-identical; add never writes inline.
        assert_eq!(text, record.body);
        assert!(text.contains("#alpha"));
    }

    #[test]
    fn test_add_appends_to_existing() {
        let record = record_for("---\ntags: [x]\n---\n");
        let edits = one_edit("y", TagAction::Add);
        let (metadata, _) = apply_tag_edits(&edits, &record).unwrap();
        assert_eq!(
            parser::normalize_tags_value(metadata.get("tags").unwrap()),
            vec!["x", "y"]
        );
    }

    #[test]
    fn test_add_never_duplicates() {
        let record = record_for("---\ntags: [x]\n---\n");
        let edits = one_edit("x", TagAction::Add);
        let (metadata, _) = apply_tag_edits(&edits, &record).unwrap();
        assert_eq!(
            parser::normalize_tags_value(metadata.get("tags").unwrap()),
            vec!["x"]
        );
    }

    #[test]
    fn test_add_and_delete_different_tags() {
        let record = record_for("---\ntags: [old]\n---\n#old inline\n");
        let mut edits = PendingEdits::new();
        edits.set("old", TagAction::Delete);
        edits.set("new", TagAction::Add);
        let (metadata, text) = apply_tag_edits(&edits, &record).unwrap();
        assert_eq!(
            parser::normalize_tags_value(metadata.get("tags").unwrap()),
            vec!["new"]
        );
        assert!(!text.contains("#old"));
    }
}
