//! Edit dispatcher: fans one edit descriptor over a file selection.
//!
//! Every file is an independent unit of work; units run concurrently with no
//! ordering guarantee and no shared mutable state. A failing file is recorded
//! and never aborts its siblings. Preview mode computes everything on copies
//! and touches nothing on disk; commit mode persists per file as each unit
//! completes.

use crate::engine::{
    apply_property_edits, apply_tag_edits, plan_move, CompiledReplace, Program,
};
use crate::error::Result;
use crate::note::Note;
use crate::record::FileRecord;
use crate::types::{Edit, EditedFile, Metadata, PendingEdits, PropertyAction, TagAction};
use crate::vault::Vault;
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

/// A per-file failure, surfaced in the batch outcome.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Aggregate result of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    /// One record per file the edit touched (or would touch, in preview).
    pub previews: Vec<EditedFile>,
    /// Per-file failures; the rest of the batch still ran.
    pub failures: Vec<FileFailure>,
    /// Number of files the edit was applied to.
    pub processed: usize,
}

impl BatchOutcome {
    /// Operator-facing one-line summary.
    pub fn summary(&self) -> String {
        let files = if self.processed == 1 { "file" } else { "files" };
        format!(
            "processed {} {}, {} changed, {} failed",
            self.processed,
            files,
            self.previews.len(),
            self.failures.len()
        )
    }
}

/// An edit with its derived machinery built once, before the fan-out.
/// Malformed patterns and scripts surface here, not per file.
enum CompiledEdit<'e> {
    Property {
        edits: &'e PendingEdits<PropertyAction>,
        lowercase_keys: bool,
    },
    Tag {
        edits: &'e PendingEdits<TagAction>,
    },
    Transform(Program),
    Move {
        dest: &'e str,
    },
    Replace(CompiledReplace),
}

/// Runs edits against a vault. The vault handle is injected; the editor owns
/// no global state.
pub struct BulkEditor<'a> {
    vault: &'a Vault,
}

impl<'a> BulkEditor<'a> {
    pub fn new(vault: &'a Vault) -> Self {
        Self { vault }
    }

    /// Apply `edit` to every file in the selection.
    ///
    /// With `preview` set, computes results without writing; otherwise each
    /// changed file is persisted as its unit of work completes. Files are
    /// processed concurrently and independently.
    pub fn process(
        &self,
        selection: &[FileRecord],
        edit: &Edit,
        preview: bool,
    ) -> Result<BatchOutcome> {
        let compiled = compile(edit)?;

        let results: Vec<(
            &FileRecord,
            std::result::Result<Option<EditedFile>, crate::error::WrangleError>,
        )> = selection
            .par_iter()
            .map(|record| (record, self.process_one(record, &compiled, preview)))
            .collect();

        let mut previews = Vec::new();
        let mut failures = Vec::new();
        for (record, result) in results {
            match result {
                Ok(Some(file)) => previews.push(file),
                Ok(None) => {}
                Err(e) => failures.push(FileFailure {
                    path: record.path.clone(),
                    message: e.to_string(),
                }),
            }
        }

        Ok(BatchOutcome {
            previews,
            failures,
            processed: selection.len(),
        })
    }

    /// One file's unit of work: compute, then persist when committing.
    /// `Ok(None)` means the edit had nothing to do for this file.
    fn process_one(
        &self,
        record: &FileRecord,
        edit: &CompiledEdit<'_>,
        preview: bool,
    ) -> Result<Option<EditedFile>> {
        match edit {
            CompiledEdit::Property {
                edits,
                lowercase_keys,
            } => {
                let (metadata, text) = apply_property_edits(edits, *lowercase_keys, record)?;
                self.finish_text_edit(record, metadata, text, preview)
            }

            CompiledEdit::Tag { edits } => {
                let (metadata, text) = apply_tag_edits(edits, record)?;
                self.finish_text_edit(record, metadata, text, preview)
            }

            CompiledEdit::Transform(program) => {
                let (text, metadata) = program.run(&record.body, &record.metadata)?;
                self.finish_text_edit(record, metadata, text, preview)
            }

            CompiledEdit::Replace(compiled) => {
                // Find & replace works on the full text, envelope included.
                let outcome = compiled.apply(&record.content);
                if !outcome.matched {
                    return Ok(None);
                }
                if !preview {
                    self.vault
                        .save_note(&Note::new(record.path.clone(), outcome.text.clone()))?;
                }
                Ok(Some(EditedFile {
                    title: record.title.clone(),
                    metadata: Metadata::new(),
                    text: outcome.text,
                    moved_to: None,
                }))
            }

            CompiledEdit::Move { dest } => {
                let target = plan_move(self.vault, dest, &record.path)?;
                if !preview {
                    self.vault.rename_note(&record.path, &target)?;
                }
                Ok(Some(EditedFile {
                    title: record.title.clone(),
                    metadata: Metadata::new(),
                    text: format!("MOVED TO {}", target.display()),
                    moved_to: Some(target),
                }))
            }
        }
    }

    /// Shared tail for edits that produce new metadata + body.
    ///
    /// The frontmatter envelope is rewritten only when the metadata actually
    /// changed; a body-only edit keeps the stored YAML byte-for-byte.
    fn finish_text_edit(
        &self,
        record: &FileRecord,
        metadata: Metadata,
        text: String,
        preview: bool,
    ) -> Result<Option<EditedFile>> {
        let metadata_changed = metadata != record.metadata;
        if !metadata_changed && text == record.body {
            return Ok(None);
        }

        if !preview {
            let note = Note::new(record.path.clone(), record.content.clone());
            let updated = if metadata_changed {
                note.with_metadata_and_body(&metadata, &text)?
            } else {
                note.with_body(&text)
            };
            self.vault.save_note(&updated)?;
        }

        Ok(Some(EditedFile {
            title: record.title.clone(),
            metadata,
            text,
            moved_to: None,
        }))
    }
}

fn compile<'e>(edit: &'e Edit) -> Result<CompiledEdit<'e>> {
    match edit {
        Edit::Property {
            edits,
            lowercase_keys,
        } => Ok(CompiledEdit::Property {
            edits,
            lowercase_keys: *lowercase_keys,
        }),
        Edit::Tag { edits } => Ok(CompiledEdit::Tag { edits }),
        Edit::Transform { script } => Ok(CompiledEdit::Transform(Program::parse(script)?)),
        Edit::MoveFiles { dest } => Ok(CompiledEdit::Move { dest }),
        Edit::FindAndReplace { edit } => Ok(CompiledEdit::Replace(CompiledReplace::compile(edit)?)),
    }
}
