//! Note representation: a path plus raw content, with frontmatter accessors.

use crate::error::Result;
use crate::parser::{self, split_frontmatter};
use crate::types::Metadata;
use std::path::{Path, PathBuf};

/// A note in the vault.
#[derive(Debug, Clone)]
pub struct Note {
    /// Path relative to vault root (e.g. `proj/My Project.md`).
    pub path: PathBuf,

    /// Raw content, frontmatter envelope included.
    pub content: String,
}

impl Note {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Load a note from disk.
    pub fn load(vault_root: &Path, relative_path: &Path) -> Result<Self> {
        let full_path = vault_root.join(relative_path);
        let content = std::fs::read_to_string(&full_path)?;
        Ok(Self {
            path: relative_path.to_path_buf(),
            content,
        })
    }

    /// Save the note to disk.
    pub fn save(&self, vault_root: &Path) -> Result<()> {
        let full_path = vault_root.join(&self.path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, &self.content)?;
        Ok(())
    }

    /// File name without the `.md` extension.
    pub fn title(&self) -> &str {
        self.path.file_stem().and_then(|s| s.to_str()).unwrap_or("")
    }

    /// Body text, frontmatter excluded.
    pub fn body(&self) -> &str {
        split_frontmatter(&self.content).body
    }

    /// Parsed frontmatter metadata, `None` if the note has no envelope.
    pub fn metadata(&self) -> Result<Option<Metadata>> {
        parser::parse_metadata(&self.content, &self.path)
    }

    /// Replace the body, keeping the frontmatter block byte-for-byte.
    pub fn with_body(&self, new_body: &str) -> Self {
        let split = split_frontmatter(&self.content);
        let content = match split.yaml {
            Some(yaml) => format!("---\n{}---\n{}", yaml, new_body),
            None => new_body.to_string(),
        };
        Self {
            path: self.path.clone(),
            content,
        }
    }

    /// Replace both metadata and body, re-serializing the envelope.
    pub fn with_metadata_and_body(&self, metadata: &Metadata, body: &str) -> Result<Self> {
        Ok(Self {
            path: self.path.clone(),
            content: parser::compose(metadata, body)?,
        })
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    #[test]
    fn test_title() {
        let note = Note::new("sub/My Note.md", "");
        assert_eq!(note.title(), "My Note");
    }

    #[test]
    fn test_body_and_metadata() {
        let note = Note::new("a.md", "---\nstatus: open\n---\nBody here\n");
        assert_eq!(note.body(), "Body here\n");
        let meta = note.metadata().unwrap().unwrap();
        assert_eq!(meta.get("status"), Some(&Value::String("open".into())));
    }

    #[test]
    fn test_with_body_preserves_envelope() {
        let note = Note::new("a.md", "---\nkey: value   # comment\n---\nold\n");
        let updated = note.with_body("new\n");
        // The YAML block is untouched, comment included.
        assert_eq!(updated.content, "---\nkey: value   # comment\n---\nnew\n");
    }

    #[test]
    fn test_with_metadata_and_body() {
        let note = Note::new("a.md", "---\nold: 1\n---\nbody\n");
        let mut meta = Metadata::new();
        meta.insert(Value::String("new".into()), Value::String("2".into()));
        let updated = note.with_metadata_and_body(&meta, "body\n").unwrap();
        assert!(updated.content.contains("new: '2'") || updated.content.contains("new: \"2\"") || updated.content.contains("new: 2"));
        assert!(!updated.content.contains("old"));
    }
}
