//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mdwrangle")]
#[command(author, version, about = "Bulk metadata and text edits over a markdown note vault", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides the configured default)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with = "yaml")]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with = "json")]
    pub yaml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Which files an edit applies to.
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Filter predicates, e.g. 'tag:project -path:archive'
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Glob restricting paths, e.g. 'projects/**/*.md'
    #[arg(short, long)]
    pub glob: Option<String>,
}

/// Preview/commit switches shared by all edit commands.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Dry-run: compute and show results without writing
    #[arg(short, long)]
    pub preview: bool,

    /// Actually commit the edit (required unless --preview)
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the files a selection matches
    List(ListArgs),

    /// Edit frontmatter/inline properties across the selection
    Property(PropertyArgs),

    /// Add or delete tags across the selection
    Tag(TagArgs),

    /// Regex find & replace across the selection
    Replace(ReplaceArgs),

    /// Move selected files into a folder
    Move(MoveArgs),

    /// Run a transform script against each selected file
    Transform(TransformArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Args, Debug)]
pub struct PropertyArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Edits of the form name=delete|inline|frontmatter|nested-tags|cancel
    /// or name=rename:<new-name>; a repeated name keeps only the last
    #[arg(required = true, value_name = "NAME=ACTION")]
    pub edits: Vec<String>,

    /// Fold every metadata key to lowercase
    #[arg(long)]
    pub lowercase_keys: bool,
}

#[derive(Args, Debug)]
pub struct TagArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Edits of the form name=add|delete|cancel; a repeated name keeps only
    /// the last
    #[arg(required = true, value_name = "NAME=ACTION")]
    pub edits: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ReplaceArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Regex pattern to find
    #[arg(long)]
    pub find: String,

    /// Replacement template; `\n` inserts a line break, `$1` a capture
    #[arg(long)]
    pub replace: String,

    /// Regex flags, any of 'gims'
    #[arg(long)]
    pub flags: Option<String>,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Destination folder (must already exist in the vault)
    #[arg(long)]
    pub dest: String,
}

#[derive(Args, Debug)]
pub struct TransformArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Transform script source
    #[arg(long, conflicts_with = "script_file")]
    pub script: Option<String>,

    /// Read the transform script from a file
    #[arg(long)]
    pub script_file: Option<PathBuf>,
}
