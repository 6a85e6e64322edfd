//! Inline field location (`name:: value` annotations in prose).
//!
//! An inline field is the property name followed by `:: ` and a value, either
//! at the start of a line or wrapped in `[...]`/`(...)`. Matching is
//! case-insensitive and spans all occurrences.

use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;

// Any inline field, used to resolve a file's full property set. Values stop
// at a closer or end of line.
static ANY_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(?:^|\[|\()([A-Za-z_][\w-]*):: ([^\]\)\r\n]*)").unwrap());

/// A located inline field occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineField {
    /// Byte offset of the match start (includes the opening bracket/paren
    /// when present).
    pub start: usize,
    /// Byte offset one past the match end (includes a trailing line
    /// terminator when the match consumed one).
    pub end: usize,
    /// The value portion, wrappers stripped.
    pub value: String,
}

/// Regex matching inline occurrences of one property.
///
/// Mirrors the shape of the stored annotation: optional `[`/`(` opener, the
/// name, `:: `, the value up to a closer or end of line, optionally eating
/// one trailing newline.
pub fn field_regex(name: &str) -> Result<Regex> {
    let pattern = format!(r"(?im)(^|\[|\(){}:: .*?(\]|\)|$)\n?", regex::escape(name));
    Ok(Regex::new(&pattern)?)
}

/// Locate all inline occurrences of a property in text.
pub fn locate(text: &str, name: &str) -> Result<Vec<InlineField>> {
    let re = field_regex(name)?;
    let mut fields = Vec::new();
    for m in re.find_iter(text) {
        fields.push(InlineField {
            start: m.start(),
            end: m.end(),
            value: extract_value(m.as_str()).unwrap_or_default(),
        });
    }
    Ok(fields)
}

/// The value of the first inline occurrence, or `None` if there is none.
pub fn first_value(text: &str, name: &str) -> Result<Option<String>> {
    let re = field_regex(name)?;
    Ok(re.find(text).map(|m| extract_value(m.as_str()).unwrap_or_default()))
}

/// Remove every inline occurrence of a property from text.
pub fn remove_all(text: &str, name: &str) -> Result<String> {
    let re = field_regex(name)?;
    Ok(re.replace_all(text, "").into_owned())
}

/// Rewrite the key of every inline occurrence, leaving values untouched.
pub fn rename_key(text: &str, old: &str, new: &str) -> Result<String> {
    let pattern = format!(r"(?im)(^|\[|\(){}::", regex::escape(old));
    let re = Regex::new(&pattern)?;
    let replacement = format!("${{1}}{}::", new);
    Ok(re.replace_all(text, replacement.as_str()).into_owned())
}

/// Scan text for every inline field, returning `(key, value)` pairs in
/// order of appearance.
pub fn scan_all(text: &str) -> Vec<(String, String)> {
    ANY_FIELD
        .captures_iter(text)
        .map(|cap| {
            let key = cap[1].to_string();
            let value = cap[2].trim().to_string();
            (key, value)
        })
        .collect()
}

/// Strip wrappers from a matched occurrence and return the value portion.
fn extract_value(matched: &str) -> Option<String> {
    let mut s = matched.trim_end_matches(['\n', '\r']);
    s = s.strip_suffix([']', ')']).unwrap_or(s);
    s = s.strip_prefix(['[', '(']).unwrap_or(s);
    s.split_once(":: ").map(|(_, value)| value.to_string())
}
