//! Move engine: compute a file's target path under a destination folder.

use crate::error::{Result, WrangleError};
use crate::vault::Vault;
use std::path::{Path, PathBuf};

/// Validate the destination and compute `<destination>/<file name>`.
///
/// The destination must already exist as a directory inside the vault; a
/// missing path or a file raises `InvalidDestination` for this file only.
/// Name collisions at the destination are not checked; the store's
/// last-write-wins policy applies.
pub fn plan_move(vault: &Vault, dest: &str, path: &Path) -> Result<PathBuf> {
    let dest = dest.trim_end_matches('/');
    if !vault.dir_exists(dest) {
        return Err(WrangleError::InvalidDestination(dest.to_string()));
    }
    let name = path
        .file_name()
        .ok_or_else(|| WrangleError::Other(format!("path has no file name: {}", path.display())))?;
    Ok(PathBuf::from(dest).join(name))
}
