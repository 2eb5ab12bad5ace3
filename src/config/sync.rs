//! Resolved configuration for a single run.
//!
//! A [`SyncConfig`] is assembled once in `main` from CLI arguments, the
//! persistent config file and built-in defaults, then handed by reference to
//! the locator, the merger and the destination volume.

use std::path::{Path, PathBuf};

use super::CopyExtensionSet;

/// Default workspace directory, relative to the current working directory.
pub const DEFAULT_WORKSPACE: &str = "Projects";

/// Extension of compiled homebrew binaries.
pub const DEFAULT_BINARY_EXTENSION: &str = "dol";

/// File name the homebrew loader executes inside `apps/<name>/`.
pub const DEFAULT_BOOT_FILE_NAME: &str = "boot.dol";

/// Per-project folder holding compiled binaries.
pub const BUILD_OUTPUT_DIR: &str = "bin";

/// Per-project folder holding secondary data assets.
pub const DATA_DIR: &str = "data";

/// Folder under the volume root scanned by the homebrew loader.
pub const APPS_DIR: &str = "apps";

/// Immutable settings shared by every operation of one invocation.
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Mount point of the SD card or USB drive
    pub remote_root: PathBuf,

    /// Local directory containing one folder per project
    pub workspace: PathBuf,

    /// Auxiliary file extensions copied next to the boot binary
    pub extensions: CopyExtensionSet,

    /// Extension identifying compiled binaries inside `bin/`
    pub binary_extension: String,

    /// Name the binary is given on the destination volume
    pub boot_file_name: String,
}

impl SyncConfig {
    /// Create a configuration with the default extension set and file names.
    #[must_use]
    pub fn new(remote_root: impl Into<PathBuf>, workspace: impl Into<PathBuf>) -> Self {
        Self {
            remote_root: remote_root.into(),
            workspace: workspace.into(),
            extensions: CopyExtensionSet::default(),
            binary_extension: DEFAULT_BINARY_EXTENSION.to_string(),
            boot_file_name: DEFAULT_BOOT_FILE_NAME.to_string(),
        }
    }

    /// Replace the auxiliary extension allow-list.
    #[must_use]
    pub fn with_extensions(mut self, extensions: CopyExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }

    /// Whether `path` carries the compiled binary extension (case-insensitive).
    #[must_use]
    pub fn is_binary(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.binary_extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::new("/media/usb", DEFAULT_WORKSPACE);

        assert_eq!(config.remote_root, PathBuf::from("/media/usb"));
        assert_eq!(config.workspace, PathBuf::from("Projects"));
        assert_eq!(config.extensions, CopyExtensionSet::default());
        assert_eq!(config.boot_file_name, "boot.dol");
    }

    #[test]
    fn test_is_binary() {
        let config = SyncConfig::new("/media/usb", "Projects");

        assert!(config.is_binary(Path::new("Projects/Pong/bin/boot.dol")));
        assert!(config.is_binary(Path::new("Projects/Pong/bin/PONG.DOL")));
        assert!(!config.is_binary(Path::new("Projects/Pong/bin/boot.elf")));
        assert!(!config.is_binary(Path::new("Projects/Pong/bin/dol")));
    }

    #[test]
    fn test_with_extensions() {
        let config = SyncConfig::new("/r", "w").with_extensions(CopyExtensionSet::new(["ogg"]));

        assert!(config.extensions.contains("ogg"));
        assert!(!config.extensions.contains("png"));
    }
}
