//! Transform command: run an operator-authored script over the selection.

use crate::cli::args::TransformArgs;
use crate::cli::Output;
use crate::error::{ExitCode, Result, WrangleError};
use crate::types::Edit;
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &TransformArgs, output: &Output) -> Result<ExitCode> {
    let script = match (&args.script, &args.script_file) {
        (Some(script), _) => script.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            return Err(WrangleError::Other(
                "provide a transform via --script or --script-file".to_string(),
            ));
        }
    };

    let edit = Edit::Transform { script };
    crate::cli::execute(vault, &args.selection, &args.run, &edit, output)
}
