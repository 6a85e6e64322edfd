//! CLI command implementations.

pub mod args;
pub mod output;

pub mod list;
pub mod move_files;
pub mod property;
pub mod replace;
pub mod tag;
pub mod transform;

pub use args::{Cli, Commands};
pub use output::Output;

use crate::batch::BulkEditor;
use crate::cli::args::{RunArgs, SelectionArgs};
use crate::error::{ExitCode, Result};
use crate::select::select_files;
use crate::types::Edit;
use crate::vault::Vault;

/// Shared flow for every edit command: select, run, render, summarize.
///
/// Without `--preview` or `--yes` the command falls back to previewing.
pub(crate) fn execute(
    vault: &Vault,
    selection: &SelectionArgs,
    run: &RunArgs,
    edit: &Edit,
    output: &Output,
) -> Result<ExitCode> {
    let records = select_files(
        vault,
        selection.glob.as_deref(),
        selection.filter.as_deref(),
    )?;

    if records.is_empty() {
        output.info("no files selected");
        return Ok(ExitCode::Success);
    }

    let preview = run.preview || !run.yes;
    if preview && !run.preview {
        output.info("previewing only; pass --yes to commit");
    }

    let outcome = BulkEditor::new(vault).process(&records, edit, preview)?;

    if !outcome.previews.is_empty() {
        output.print(&outcome.previews)?;
    }
    for failure in &outcome.failures {
        output.error(&format!("{}: {}", failure.path.display(), failure.message));
    }
    output.info(&outcome.summary());

    if outcome.failures.is_empty() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::PartialFailure)
    }
}
