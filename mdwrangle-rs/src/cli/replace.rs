//! Replace command: regex find & replace over the selection.

use crate::cli::args::ReplaceArgs;
use crate::cli::Output;
use crate::config::Config;
use crate::error::{ExitCode, Result};
use crate::types::{Edit, FindAndReplace};
use crate::vault::Vault;

pub fn run(vault: &Vault, config: &Config, args: &ReplaceArgs, output: &Output) -> Result<ExitCode> {
    let flags = args
        .flags
        .clone()
        .or_else(|| config.default_replace_flags.clone())
        .unwrap_or_default();

    let edit = Edit::FindAndReplace {
        edit: FindAndReplace {
            find: args.find.clone(),
            replace: args.replace.clone(),
            flags,
        },
    };
    crate::cli::execute(vault, &args.selection, &args.run, &edit, output)
}
