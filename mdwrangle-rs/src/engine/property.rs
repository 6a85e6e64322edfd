//! Property edit engine: rename, delete, inline/frontmatter conversion, and
//! nested-tag generation, per property.

use crate::engine::stringify_value;
use crate::error::Result;
use crate::parser::{self, inline_field};
use crate::record::FileRecord;
use crate::types::{Metadata, PendingEdits, PropertyAction};
use regex::Regex;
use serde_yaml::Value;
use std::sync::LazyLock;

// Trailing `|display]]` alias suffix of a wikilink fragment.
static ALIAS_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\|.+\]\]$").unwrap());

// Fragment separators for nested-tag sources: commas or newlines.
static FRAGMENT_SEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*|\n").unwrap());

/// Apply every pending property action to one file.
///
/// Returns the complete replacement metadata and body text. Missing targets
/// are silent per-property no-ops; the batch never aborts on them.
pub fn apply_property_edits(
    edits: &PendingEdits<PropertyAction>,
    lowercase_keys: bool,
    record: &FileRecord,
) -> Result<(Metadata, String)> {
    let mut metadata = record.metadata.clone();
    let mut text = record.body.clone();

    for (name, action) in edits.iter() {
        match action {
            PropertyAction::Rename { to } => {
                text = inline_field::rename_key(&text, name, to)?;
                if let Some(value) = metadata.remove(name.as_str()) {
                    metadata.insert(Value::String(to.clone()), value);
                }
            }

            PropertyAction::Delete => {
                text = inline_field::remove_all(&text, name)?;
                metadata.remove(name.as_str());
            }

            PropertyAction::Inline => {
                let Some(value) = metadata.get(name.as_str()).cloned() else {
                    continue;
                };
                let inline_string = if name == "tags" {
                    parser::normalize_tags_value(&value)
                        .iter()
                        .map(|t| format!("#{}", t))
                        .collect::<Vec<_>>()
                        .join(" ")
                } else {
                    stringify_value(&value)
                };
                text = inline_field::remove_all(&text, name)?;
                text.push_str(&format!("\n\n{}:: {}", name, inline_string));
                metadata.remove(name.as_str());
            }

            PropertyAction::Frontmatter => {
                let Some(value) = inline_field::first_value(&text, name)? else {
                    continue;
                };
                if value.is_empty() {
                    continue;
                }
                text = inline_field::remove_all(&text, name)?;
                metadata.insert(Value::String(name.clone()), Value::String(value));
            }

            PropertyAction::NestedTags => {
                let Some(source) = record.properties.get(name.as_str()) else {
                    continue;
                };
                let new_tags = nested_tags_from(name, &stringify_value(source));
                if new_tags.is_empty() {
                    continue;
                }

                let mut tags = metadata
                    .get("tags")
                    .map(parser::normalize_tags_value)
                    .unwrap_or_default();
                tags.extend(new_tags);
                let tags = parser::dedup_tags(tags);
                metadata.insert(Value::String("tags".into()), parser::tags_to_value(&tags));
            }
        }
    }

    if lowercase_keys {
        metadata = lowercase_metadata_keys(metadata);
    }

    Ok((metadata, text))
}

/// Derive `name/slug` tags from a property's stringified source value.
fn nested_tags_from(name: &str, source: &str) -> Vec<String> {
    FRAGMENT_SEP
        .split(source)
        .filter(|fragment| fragment.chars().any(|c| c.is_alphanumeric() || c == '_'))
        .map(|fragment| format!("{}/{}", name, nested_tag_slug(fragment)))
        .collect()
}

/// Slug rules: lowercase, trimmed, wikilink alias suffix dropped, whitespace
/// to hyphens, everything else outside `\w`/`-` removed.
fn nested_tag_slug(fragment: &str) -> String {
    let lowered = fragment.to_lowercase();
    let trimmed = lowered.trim();
    let without_alias = ALIAS_SUFFIX.replace(trimmed, "");
    without_alias
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('-')
            } else if c.is_alphanumeric() || c == '_' || c == '-' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

fn lowercase_metadata_keys(metadata: Metadata) -> Metadata {
    let mut folded = Metadata::new();
    for (key, value) in metadata {
        let key = match key.as_str() {
            Some(s) => Value::String(s.to_lowercase()),
            None => key,
        };
        folded.insert(key, value);
    }
    folded
}
