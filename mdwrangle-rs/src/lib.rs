//! Mdwrangle - bulk metadata and text edits over markdown note vaults.
//!
//! # Overview
//!
//! Mdwrangle applies one declarative edit to every file in a selection:
//! - Property edits: rename, delete, convert between frontmatter and inline
//!   `name:: value` fields, or encode a property's values as nested tags
//! - Tag edits: add to frontmatter, or delete from frontmatter and prose
//! - Regex find & replace with JS-style flags
//! - Operator-authored transform scripts over `{text, metadata}`
//! - Moving files into a folder
//!
//! Every run can be previewed: the same computation, nothing written.
//!
//! # Example
//!
//! ```no_run
//! use mdwrangle::{BulkEditor, Edit, PendingEdits, PropertyAction, Vault};
//! use mdwrangle::select::select_files;
//!
//! let vault = Vault::new("/path/to/vault").unwrap();
//! let records = select_files(&vault, None, Some("tag:project")).unwrap();
//!
//! let mut edits = PendingEdits::new();
//! edits.set("status", PropertyAction::Rename { to: "state".into() });
//! let edit = Edit::Property { edits, lowercase_keys: false };
//!
//! // Dry run: compute everything, write nothing.
//! let outcome = BulkEditor::new(&vault).process(&records, &edit, true).unwrap();
//! println!("{}", outcome.summary());
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod note;
pub mod parser;
pub mod record;
pub mod select;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use batch::{BatchOutcome, BulkEditor, FileFailure};
pub use config::Config;
pub use error::{Result, WrangleError};
pub use note::Note;
pub use record::FileRecord;
pub use types::*;
pub use vault::Vault;
