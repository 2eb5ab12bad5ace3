//! The destination volume (SD card or USB drive) guard.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::sync::APPS_DIR,
    error::{Result, SyncError},
};

/// A mounted destination volume whose root is known to exist.
///
/// The only way to obtain one is [`DestinationVolume::open`], so holding a
/// `DestinationVolume` means the mount check has already passed.
#[derive(Clone, Debug)]
pub struct DestinationVolume {
    root: PathBuf,
}

impl DestinationVolume {
    /// Check that `root` is mounted and make sure `root/apps` exists.
    ///
    /// Nothing is written when the root is missing.
    ///
    /// # Errors
    ///
    /// - [`SyncError::VolumeNotMounted`] if `root` does not exist
    /// - [`SyncError::CreateDir`] if `apps/` cannot be created
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.exists() {
            return Err(SyncError::VolumeNotMounted(root));
        }

        let apps = root.join(APPS_DIR);
        fs::create_dir_all(&apps).map_err(|source| SyncError::CreateDir {
            path: apps.clone(),
            source,
        })?;

        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/apps`
    #[must_use]
    pub fn apps_dir(&self) -> PathBuf {
        self.root.join(APPS_DIR)
    }
}
