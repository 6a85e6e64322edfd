//! Mdwrangle CLI entry point.

use clap::Parser;
use mdwrangle::cli::args::{Cli, Commands};
use mdwrangle::cli::output::Output;
use mdwrangle::cli::{list, move_files, property, replace, tag, transform};
use mdwrangle::config::Config;
use mdwrangle::error::{ExitCode as WrangleExitCode, WrangleError};
use mdwrangle::vault::Vault;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<WrangleExitCode, WrangleError> {
    let config = Config::load()?;

    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let vault = Vault::new(vault_path)?;

    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::List(args) => list::run(&vault, args, &output),
        Commands::Property(args) => property::run(&vault, args, &output),
        Commands::Tag(args) => tag::run(&vault, args, &output),
        Commands::Replace(args) => replace::run(&vault, &config, args, &output),
        Commands::Move(args) => move_files::run(&vault, args, &output),
        Commands::Transform(args) => transform::run(&vault, args, &output),
    }
}
