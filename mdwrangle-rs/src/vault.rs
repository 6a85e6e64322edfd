//! Vault representation: the injected file store the engines work against.
//!
//! Everything the edit engines need from the filesystem goes through a
//! `Vault` value passed in by the caller; there is no process-wide handle.

use crate::error::{Result, WrangleError};
use crate::note::Note;
use glob::glob;
use std::path::{Path, PathBuf};

/// A directory tree of markdown notes.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(WrangleError::VaultNotFound(root));
        }
        Ok(Self { root })
    }

    /// Full path for a vault-relative note path.
    pub fn note_path(&self, relative_path: &Path) -> PathBuf {
        self.root.join(relative_path)
    }

    /// Normalize a note path (add `.md` if missing).
    pub fn normalize_note_path(&self, path: &str) -> PathBuf {
        let path = path.trim();
        if path.ends_with(".md") {
            PathBuf::from(path)
        } else {
            PathBuf::from(format!("{}.md", path))
        }
    }

    pub fn note_exists(&self, relative_path: &Path) -> bool {
        self.note_path(relative_path).is_file()
    }

    /// Whether a vault-relative path is an existing directory.
    pub fn dir_exists(&self, relative_path: &str) -> bool {
        self.root.join(relative_path).is_dir()
    }

    pub fn load_note(&self, relative_path: &Path) -> Result<Note> {
        if !self.note_exists(relative_path) {
            return Err(WrangleError::NoteNotFound(relative_path.to_path_buf()));
        }
        Note::load(&self.root, relative_path)
    }

    pub fn save_note(&self, note: &Note) -> Result<()> {
        note.save(&self.root)
    }

    /// Move or rename a note. Fails if the target's parent directory does
    /// not exist; the caller validates destinations.
    pub fn rename_note(&self, from: &Path, to: &Path) -> Result<()> {
        if !self.note_exists(from) {
            return Err(WrangleError::NoteNotFound(from.to_path_buf()));
        }
        let from_full = self.note_path(from);
        let to_full = self.note_path(to);
        if let Some(parent) = to_full.parent() {
            if !parent.is_dir() {
                return Err(WrangleError::InvalidDestination(
                    parent.to_string_lossy().into_owned(),
                ));
            }
        }
        std::fs::rename(from_full, to_full)?;
        Ok(())
    }

    /// List all markdown files in the vault, sorted, hidden paths skipped.
    pub fn list_notes(&self) -> Result<Vec<PathBuf>> {
        self.list_notes_matching("**/*.md")
    }

    /// List markdown files matching a glob pattern relative to the root.
    pub fn list_notes_matching(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let full_pattern = self.root.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        let mut notes = Vec::new();
        for entry in glob(&pattern_str)? {
            match entry {
                Ok(path) => {
                    if !path.is_file() || path.extension().map(|e| e != "md").unwrap_or(true) {
                        continue;
                    }
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        let hidden = relative
                            .components()
                            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'));
                        if !hidden {
                            notes.push(relative.to_path_buf());
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Warning: glob error: {}", e);
                }
            }
        }

        notes.sort();
        Ok(notes)
    }

    /// Resolve a wikilink target to a note path.
    ///
    /// Tries the target as a vault-relative path first, then falls back to a
    /// case-insensitive file-stem match anywhere in the vault; the first
    /// match in path order wins.
    pub fn resolve_link_target(&self, target: &str) -> Result<Option<PathBuf>> {
        let normalized = self.normalize_note_path(target);
        if self.note_exists(&normalized) {
            return Ok(Some(normalized));
        }

        let wanted = target.trim().to_lowercase();
        for note_path in self.list_notes()? {
            let stem = note_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("");
            if stem.to_lowercase() == wanted {
                return Ok(Some(note_path));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_vault() -> (TempDir, Vault) {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path()).unwrap();
        (dir, vault)
    }

    fn write_note(vault: &Vault, path: &str, content: &str) {
        let note = Note::new(path, content);
        vault.save_note(&note).unwrap();
    }

    #[test]
    fn test_vault_root_must_be_dir() {
        let result = Vault::new("/nonexistent/path/hopefully");
        assert!(matches!(result, Err(WrangleError::VaultNotFound(_))));
    }

    #[test]
    fn test_save_and_load() {
        let (_dir, vault) = setup_test_vault();
        write_note(&vault, "test.md", "Hello");
        let note = vault.load_note(&PathBuf::from("test.md")).unwrap();
        assert_eq!(note.content, "Hello");
    }

    #[test]
    fn test_load_missing_fails() {
        let (_dir, vault) = setup_test_vault();
        let result = vault.load_note(&PathBuf::from("missing.md"));
        assert!(matches!(result, Err(WrangleError::NoteNotFound(_))));
    }

    #[test]
    fn test_list_notes_sorted_and_skips_hidden() {
        let (_dir, vault) = setup_test_vault();
        write_note(&vault, "b.md", "B");
        write_note(&vault, "a.md", "A");
        write_note(&vault, "sub/c.md", "C");
        write_note(&vault, ".trash/gone.md", "X");

        let notes = vault.list_notes().unwrap();
        assert_eq!(
            notes,
            vec![
                PathBuf::from("a.md"),
                PathBuf::from("b.md"),
                PathBuf::from("sub/c.md")
            ]
        );
    }

    #[test]
    fn test_list_notes_matching_glob() {
        let (_dir, vault) = setup_test_vault();
        write_note(&vault, "keep/a.md", "A");
        write_note(&vault, "skip/b.md", "B");

        let notes = vault.list_notes_matching("keep/**/*.md").unwrap();
        assert_eq!(notes, vec![PathBuf::from("keep/a.md")]);
    }

    #[test]
    fn test_rename_note_into_existing_dir() {
        let (_dir, vault) = setup_test_vault();
        write_note(&vault, "a.md", "A");
        std::fs::create_dir(vault.root.join("Archive")).unwrap();

        vault
            .rename_note(&PathBuf::from("a.md"), &PathBuf::from("Archive/a.md"))
            .unwrap();
        assert!(vault.note_exists(&PathBuf::from("Archive/a.md")));
        assert!(!vault.note_exists(&PathBuf::from("a.md")));
    }

    #[test]
    fn test_rename_note_missing_parent_fails() {
        let (_dir, vault) = setup_test_vault();
        write_note(&vault, "a.md", "A");

        let result = vault.rename_note(&PathBuf::from("a.md"), &PathBuf::from("nope/a.md"));
        assert!(matches!(result, Err(WrangleError::InvalidDestination(_))));
        assert!(vault.note_exists(&PathBuf::from("a.md")));
    }

    #[test]
    fn test_resolve_link_target_by_stem() {
        let (_dir, vault) = setup_test_vault();
        write_note(&vault, "folder/Target Note.md", "T");

        let resolved = vault.resolve_link_target("target note").unwrap();
        assert_eq!(resolved, Some(PathBuf::from("folder/Target Note.md")));
        assert_eq!(vault.resolve_link_target("missing").unwrap(), None);
    }
}
