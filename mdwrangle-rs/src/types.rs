//! Shared types for mdwrangle: edit descriptors and per-file results.

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Frontmatter metadata: an ordered mapping from property name to YAML value.
pub type Metadata = Mapping;

/// What to do with a single frontmatter/inline property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum PropertyAction {
    /// Remove the property from frontmatter and any inline occurrence from text.
    Delete,
    /// Rename the property key, in frontmatter and in inline occurrences.
    Rename { to: String },
    /// Move a frontmatter value into an inline `name:: value` field at the end
    /// of the body.
    Inline,
    /// Move an inline `name:: value` field into frontmatter.
    Frontmatter,
    /// Encode the property's resolved value as `name/slug` tags.
    NestedTags,
}

/// What to do with a single tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum TagAction {
    /// Remove the tag from body text and from `metadata.tags`.
    Delete,
    /// Append the tag to `metadata.tags`. Never touches body text.
    Add,
}

/// Pending per-name actions for a property or tag edit.
///
/// A name maps to at most one action: setting again replaces the previous
/// action, cancelling removes the entry. Deltas, not a queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEdits<A>(BTreeMap<String, A>);

impl<A> PendingEdits<A> {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set the pending action for a name, replacing any prior one.
    pub fn set(&mut self, name: impl Into<String>, action: A) {
        self.0.insert(name.into(), action);
    }

    /// Cancel the pending action for a name, if any.
    pub fn cancel(&mut self, name: &str) {
        self.0.remove(name);
    }

    pub fn get(&self, name: &str) -> Option<&A> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &A)> {
        self.0.iter()
    }
}

impl<A> Default for PendingEdits<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Find & replace parameters. `flags` uses the JS-style letters `g`, `i`,
/// `m`, `s`; the engine imposes no global behavior of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindAndReplace {
    pub find: String,
    pub replace: String,
    pub flags: String,
}

/// One bulk operation to perform over a file selection.
///
/// Consumed exactly once by the dispatcher, in preview or commit mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Edit {
    /// Per-property actions, plus an optional key-lowercasing pass.
    Property {
        edits: PendingEdits<PropertyAction>,
        #[serde(default)]
        lowercase_keys: bool,
    },
    /// Per-tag actions.
    Tag { edits: PendingEdits<TagAction> },
    /// A restricted transform script run against `{text, metadata}`.
    Transform { script: String },
    /// Move every selected file into the destination folder.
    MoveFiles { dest: String },
    /// A single regex substitution over the full file text.
    FindAndReplace { edit: FindAndReplace },
}

impl Edit {
    /// Short name for notices and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Edit::Property { .. } => "property",
            Edit::Tag { .. } => "tag",
            Edit::Transform { .. } => "transform",
            Edit::MoveFiles { .. } => "move",
            Edit::FindAndReplace { .. } => "find-and-replace",
        }
    }
}

/// The computed result of applying one edit to one file.
///
/// `metadata` and `text` are complete replacements; persistence happens only
/// through the explicit write step in the dispatcher.
#[derive(Debug, Clone, Serialize)]
pub struct EditedFile {
    /// File name without the `.md` extension.
    pub title: String,
    pub metadata: Metadata,
    pub text: String,
    /// New path, set only by the move engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moved_to: Option<PathBuf>,
}
