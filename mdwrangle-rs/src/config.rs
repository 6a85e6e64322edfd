//! Configuration loading.
//!
//! Read from `<config dir>/mdwrangle/config.toml`; a missing file just means
//! defaults. The CLI `--vault` flag overrides the configured default vault.

use crate::error::{Result, WrangleError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Vault used when `--vault` is not given.
    #[serde(default)]
    pub default_vault: Option<PathBuf>,

    /// Default flags for find & replace when the command omits `--flags`.
    #[serde(default)]
    pub default_replace_flags: Option<String>,
}

impl Config {
    /// Path of the config file, if a config directory is known.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mdwrangle").join("config.toml"))
    }

    /// Load the config, tolerating an absent file.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load a config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Resolve the vault path from the CLI override or the config default.
    pub fn resolve_vault_path(&self, cli_vault: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_vault {
            return Ok(path.to_path_buf());
        }
        if let Some(ref path) = self.default_vault {
            return Ok(path.clone());
        }
        Err(WrangleError::ConfigError(
            "no vault given: pass --vault or set default_vault in the config".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override_wins() {
        let config = Config {
            default_vault: Some(PathBuf::from("/configured")),
            default_replace_flags: None,
        };
        let resolved = config
            .resolve_vault_path(Some(Path::new("/override")))
            .unwrap();
        assert_eq!(resolved, PathBuf::from("/override"));
    }

    #[test]
    fn test_config_default_used() {
        let config = Config {
            default_vault: Some(PathBuf::from("/configured")),
            default_replace_flags: None,
        };
        assert_eq!(
            config.resolve_vault_path(None).unwrap(),
            PathBuf::from("/configured")
        );
    }

    #[test]
    fn test_missing_vault_is_config_error() {
        let config = Config::default();
        assert!(matches!(
            config.resolve_vault_path(None),
            Err(WrangleError::ConfigError(_))
        ));
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_vault = \"/my/vault\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_vault, Some(PathBuf::from("/my/vault")));
        assert_eq!(config.default_replace_flags, None);
    }
}
