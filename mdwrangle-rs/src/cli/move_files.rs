//! Move command: relocate the selection into a destination folder.

use crate::cli::args::MoveArgs;
use crate::cli::Output;
use crate::error::{ExitCode, Result};
use crate::types::Edit;
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &MoveArgs, output: &Output) -> Result<ExitCode> {
    let edit = Edit::MoveFiles {
        dest: args.dest.clone(),
    };
    crate::cli::execute(vault, &args.selection, &args.run, &edit, output)
}
