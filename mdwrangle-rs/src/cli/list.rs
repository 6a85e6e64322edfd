//! List command: show what a selection matches, without editing anything.

use crate::cli::args::ListArgs;
use crate::cli::Output;
use crate::error::{ExitCode, Result};
use crate::select::select_files;
use crate::vault::Vault;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ListedFile {
    path: String,
    tags: Vec<String>,
}

pub fn run(vault: &Vault, args: &ListArgs, output: &Output) -> Result<ExitCode> {
    let records = select_files(
        vault,
        args.selection.glob.as_deref(),
        args.selection.filter.as_deref(),
    )?;

    let listed: Vec<ListedFile> = records
        .iter()
        .map(|r| ListedFile {
            path: r.path.to_string_lossy().into_owned(),
            tags: r.tags.clone(),
        })
        .collect();

    output.print(&listed)?;
    let files = if records.len() == 1 { "file" } else { "files" };
    output.info(&format!("{} {} selected", records.len(), files));
    Ok(ExitCode::Success)
}
