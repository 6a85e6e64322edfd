//! Error types and exit codes for mdwrangle.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOTE_NOT_FOUND: i32 = 2;
    pub const INVALID_DESTINATION: i32 = 3;
    pub const BAD_PATTERN: i32 = 4;
    pub const INVALID_FRONTMATTER: i32 = 5;
    pub const SCRIPT_ERROR: i32 = 6;
    pub const PARTIAL_FAILURE: i32 = 10;
}

/// Main error type for mdwrangle operations.
#[derive(Error, Debug)]
pub enum WrangleError {
    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Note not found: {0}")]
    NoteNotFound(PathBuf),

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    #[error("Invalid destination '{0}': not an existing folder")]
    InvalidDestination(String),

    #[error("Invalid pattern: {0}")]
    BadPattern(String),

    #[error("Transform script error: {0}")]
    Script(String),

    #[error("Invalid edit spec '{spec}': {message}")]
    BadEditSpec { spec: String, message: String },

    #[error("Invalid filter: {0}")]
    BadFilter(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("{0}")]
    Other(String),
}

impl WrangleError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            WrangleError::NoteNotFound(_) => exit_code::NOTE_NOT_FOUND,
            WrangleError::InvalidDestination(_) => exit_code::INVALID_DESTINATION,
            WrangleError::BadPattern(_) | WrangleError::RegexError(_) => exit_code::BAD_PATTERN,
            WrangleError::InvalidFrontmatter { .. } => exit_code::INVALID_FRONTMATTER,
            WrangleError::Script(_) => exit_code::SCRIPT_ERROR,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for mdwrangle operations.
pub type Result<T> = std::result::Result<T, WrangleError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GeneralError,
    PartialFailure,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::GeneralError => exit_code::GENERAL_ERROR,
            ExitCode::PartialFailure => exit_code::PARTIAL_FAILURE,
        }
    }
}
