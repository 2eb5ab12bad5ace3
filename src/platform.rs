//! Platform-specific capabilities.
//!
//! The core never branches on the operating system directly. Instead a
//! [`PlatformProvider`] answers the two questions that differ between
//! platforms: whether writing to the volume needs elevated privileges, and
//! where the volume is most likely mounted.

use std::path::PathBuf;

use crate::error::{Result, SyncError};

/// Mount point guessed on Unix-like systems.
pub const UNIX_DEFAULT_VOLUME: &str = "/media/usb";

/// Drive letters probed on Windows, in order.
pub const WINDOWS_DRIVE_LETTERS: &str = "DEFGHIJKLMNOPQRSTUVWXYZ";

/// Capabilities that vary by platform.
pub trait PlatformProvider {
    /// Whether uploads must be refused because the process lacks the
    /// privileges this platform needs to write to a mounted volume.
    fn requires_elevated_write(&self) -> bool;

    /// Best guess for the volume root when none was configured.
    fn default_volume_guess(&self) -> PathBuf;

    /// Fail with [`SyncError::ElevationRequired`] when
    /// [`requires_elevated_write`](Self::requires_elevated_write) holds.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::ElevationRequired`] if elevated privileges are missing.
    fn ensure_write_access(&self) -> Result<()> {
        if self.requires_elevated_write() {
            Err(SyncError::ElevationRequired)
        } else {
            Ok(())
        }
    }
}

/// The platform the binary is running on.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativePlatform;

impl PlatformProvider for NativePlatform {
    #[cfg(unix)]
    fn requires_elevated_write(&self) -> bool {
        !nix::unistd::geteuid().is_root()
    }

    #[cfg(not(unix))]
    fn requires_elevated_write(&self) -> bool {
        false
    }

    #[cfg(windows)]
    fn default_volume_guess(&self) -> PathBuf {
        first_existing_drive(WINDOWS_DRIVE_LETTERS)
    }

    #[cfg(not(windows))]
    fn default_volume_guess(&self) -> PathBuf {
        PathBuf::from(UNIX_DEFAULT_VOLUME)
    }
}

/// First `X:\` root that exists among `letters`, falling back to the first letter.
#[cfg(windows)]
fn first_existing_drive(letters: &str) -> PathBuf {
    letters
        .chars()
        .map(|letter| PathBuf::from(format!("{letter}:\\")))
        .find(|root| root.exists())
        .unwrap_or_else(|| PathBuf::from("D:\\"))
}
