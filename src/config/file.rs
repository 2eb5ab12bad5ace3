//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/homebrew-sync/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! remote = "/media/usb"
//! workspace = "~/wii/Projects"
//!
//! [upload]
//! extensions = ["dol", "xml", "png", "ogg"]
//! verbose = true
//!
//! [init]
//! author = "Jane"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default mount point of the SD card or USB drive
    pub remote: Option<PathBuf>,

    /// Default workspace directory
    pub workspace: Option<PathBuf>,

    /// Upload options
    #[serde(default)]
    pub upload: FileUploadConfig,

    /// Project scaffolding options
    #[serde(default)]
    pub init: FileInitConfig,
}

/// Upload options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileUploadConfig {
    /// Auxiliary file extensions to copy next to the boot binary
    pub extensions: Option<Vec<String>>,

    /// Whether to print every copied file
    pub verbose: Option<bool>,
}

/// Scaffolding options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileInitConfig {
    /// Author written into new `meta.xml` files
    pub author: Option<String>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/homebrew-sync/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("homebrew-sync").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path, treating a missing file as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or contains
    /// invalid TOML or unexpected fields.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_file_config() {
        let config = FileConfig::default();

        assert!(config.remote.is_none());
        assert!(config.workspace.is_none());
        assert!(config.upload.extensions.is_none());
        assert!(config.upload.verbose.is_none());
        assert!(config.init.author.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
remote = "/media/usb"
workspace = "~/wii/Projects"

[upload]
extensions = ["dol", "ogg"]
verbose = true

[init]
author = "Jane"
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.remote, Some(PathBuf::from("/media/usb")));
        assert_eq!(config.workspace, Some(PathBuf::from("~/wii/Projects")));
        assert_eq!(
            config.upload.extensions,
            Some(vec!["dol".to_string(), "ogg".to_string()])
        );
        assert_eq!(config.upload.verbose, Some(true));
        assert_eq!(config.init.author, Some("Jane".to_string()));
    }

    #[test]
    fn test_parse_partial_config() {
        let config: FileConfig = toml::from_str("[init]\nauthor = \"Sam\"\n").unwrap();

        assert!(config.remote.is_none());
        assert!(config.upload.extensions.is_none());
        assert_eq!(config.init.author.as_deref(), Some("Sam"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();

        assert!(config.remote.is_none());
        assert!(config.workspace.is_none());
    }

    #[test]
    fn test_malformed_config_errors() {
        let result = toml::from_str::<FileConfig>("[upload]\nverbose = \"loud\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_errors() {
        let result = toml::from_str::<FileConfig>("remtoe = \"/media/usb\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_returns_expected_suffix() {
        if let Some(p) = FileConfig::config_path() {
            assert!(p.ends_with("homebrew-sync/config.toml"));
        }
    }

    #[test]
    fn test_load_from_missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = FileConfig::load_from(&tmp.path().join("config.toml")).unwrap();

        assert!(config.remote.is_none());
    }

    #[test]
    fn test_load_from_reports_path_on_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "remote = [").unwrap();

        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_expand_tilde_with_home() {
        let expanded = expand_tilde(&PathBuf::from("~/Projects"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("Projects"));
        }
    }

    #[test]
    fn test_expand_tilde_absolute_path_unchanged() {
        let expanded = expand_tilde(&PathBuf::from("/absolute/path"));
        assert_eq!(expanded, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_expand_tilde_relative_path_unchanged() {
        let expanded = expand_tilde(&PathBuf::from("relative/path"));
        assert_eq!(expanded, PathBuf::from("relative/path"));
    }
}
