//! Parsers for the note format: frontmatter envelope, inline fields, tags,
//! and wikilinks.

pub mod frontmatter;
pub mod inline_field;
pub mod tag;
pub mod wikilink;

pub use frontmatter::{
    body_of, compose, extract_frontmatter, parse_metadata, serialize_frontmatter,
    split_frontmatter, FrontmatterSplit,
};
pub use inline_field::InlineField;
pub use tag::{dedup_tags, find_hashtags, normalize_tags_value, remove_hashtag, tags_to_value};
pub use wikilink::parse_link_targets;
