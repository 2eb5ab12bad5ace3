//! Error types for locating and uploading homebrew projects.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Library-wide error type for sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The destination volume root does not exist.
    #[error("Wii SD/USB not mounted ({}).", .0.display())]
    VolumeNotMounted(PathBuf),

    /// A project index was not a number or fell outside `1..=count`.
    #[error("Invalid choice '{input}': expected a number between 1 and {count}.")]
    InvalidSelection { input: String, count: usize },

    /// Writing to the destination needs privileges the process doesn't have.
    #[error("This command must be run as root.")]
    ElevationRequired,

    /// A project binary has no `<project>/bin/` parent to take a name from.
    #[error("Cannot derive a project name from {}", .0.display())]
    UnnamedProject(PathBuf),

    /// Copying a single file failed.
    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Creating a destination directory failed.
    #[error("Failed to create {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used across the library.
pub type Result<T> = std::result::Result<T, SyncError>;
