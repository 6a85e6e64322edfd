//! Tag command: build a tag edit from NAME=ACTION specs and run it.

use crate::cli::args::TagArgs;
use crate::cli::Output;
use crate::error::{ExitCode, Result, WrangleError};
use crate::types::{Edit, PendingEdits, TagAction};
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &TagArgs, output: &Output) -> Result<ExitCode> {
    let edits = parse_edits(&args.edits)?;
    if edits.is_empty() {
        output.info("all edits cancelled; nothing to do");
        return Ok(ExitCode::Success);
    }

    let edit = Edit::Tag { edits };
    crate::cli::execute(vault, &args.selection, &args.run, &edit, output)
}

fn parse_edits(specs: &[String]) -> Result<PendingEdits<TagAction>> {
    let mut edits = PendingEdits::new();
    for spec in specs {
        let (name, action) = spec.split_once('=').ok_or_else(|| WrangleError::BadEditSpec {
            spec: spec.clone(),
            message: "expected NAME=ACTION".to_string(),
        })?;
        // Accept '#work' and 'work' alike.
        let name = name.trim_start_matches('#');
        if name.is_empty() {
            return Err(WrangleError::BadEditSpec {
                spec: spec.clone(),
                message: "empty tag name".to_string(),
            });
        }

        match action {
            "cancel" => edits.cancel(name),
            "add" => edits.set(name, TagAction::Add),
            "delete" => edits.set(name, TagAction::Delete),
            other => {
                return Err(WrangleError::BadEditSpec {
                    spec: spec.clone(),
                    message: format!("unknown action '{}'", other),
                });
            }
        }
    }
    Ok(edits)
}
