//! Core project data structures and types.
//!
//! This module defines the data structures used to represent homebrew
//! projects, whether they live in the local workspace or on the destination
//! volume.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    config::sync::DATA_DIR,
    error::{Result, SyncError},
};

/// Where a project was discovered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectLocation {
    /// `<workspace>/<name>/bin/<binary>`
    Local,

    /// `<volume>/apps/<name>/boot.dol`
    Remote,
}

/// Representation of a homebrew project and its compiled binary.
///
/// A project is rebuilt from the filesystem on every scan and is never
/// mutated afterwards. A local project with several binaries in `bin/`
/// appears once per binary, each entry sharing the same name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    /// Where the project was found
    pub location: ProjectLocation,

    /// Project name, taken from the project folder
    pub name: String,

    /// Path to the compiled binary
    ///
    /// For local projects this is a file inside `<project>/bin/`; for remote
    /// projects it is the `boot.dol` inside `apps/<name>/`.
    pub binary_path: PathBuf,

    /// Optional secondary data directory (`<project>/data/`)
    ///
    /// Only set for local projects whose `data/` folder exists.
    pub data_dir: Option<PathBuf>,
}

impl Project {
    /// Build a local project from the path of one of its compiled binaries.
    ///
    /// The name is the base name of the binary's grandparent folder
    /// (`<workspace>/<name>/bin/<binary>`), and `data_dir` is set when the
    /// sibling `data/` folder exists.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::UnnamedProject`] if the binary path has no
    /// grandparent folder with a UTF-8 name.
    pub fn from_binary(binary_path: PathBuf) -> Result<Self> {
        let project_root = binary_path
            .parent()
            .and_then(Path::parent)
            .ok_or_else(|| SyncError::UnnamedProject(binary_path.clone()))?;

        let name = project_root
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SyncError::UnnamedProject(binary_path.clone()))?
            .to_string();

        let data_dir = project_root.join(DATA_DIR);
        let data_dir = data_dir.is_dir().then_some(data_dir);

        Ok(Self {
            location: ProjectLocation::Local,
            name,
            binary_path,
            data_dir,
        })
    }

    /// Build a remote project from its `apps/<name>` folder and boot binary.
    #[must_use]
    pub fn remote(name: String, binary_path: PathBuf) -> Self {
        Self {
            location: ProjectLocation::Remote,
            name,
            binary_path,
            data_dir: None,
        }
    }

    /// The folder holding the binary (`bin/` locally, `apps/<name>/` remotely).
    #[must_use]
    pub fn build_output_dir(&self) -> Option<&Path> {
        self.binary_path.parent()
    }

    /// File name of the compiled binary, for display.
    #[must_use]
    pub fn binary_file_name(&self) -> String {
        self.binary_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The folder this project occupies under a volume's `apps/` directory.
    #[must_use]
    pub fn destination_in(&self, apps_dir: &Path) -> PathBuf {
        apps_dir.join(&self.name)
    }
}

impl Display for Project {
    /// Format the project for listings.
    ///
    /// - `Pong (boot.dol)` for local projects
    /// - `Pong` for projects on the volume
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.location {
            ProjectLocation::Local => write!(f, "{} ({})", self.name, self.binary_file_name()),
            ProjectLocation::Remote => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_binary_takes_grandparent_name() {
        let project = Project::from_binary(PathBuf::from("Projects/Pong/bin/boot.dol")).unwrap();

        assert_eq!(project.name, "Pong");
        assert_eq!(project.location, ProjectLocation::Local);
        assert_eq!(project.build_output_dir(), Some(Path::new("Projects/Pong/bin")));
        assert!(project.data_dir.is_none());
    }

    #[test]
    fn test_from_binary_keeps_suffix_like_names_intact() {
        // Names that end in "bin" or contain ".dol" must survive untouched
        let project =
            Project::from_binary(PathBuf::from("/ws/Cabin.dol/bin/game.dol")).unwrap();
        assert_eq!(project.name, "Cabin.dol");
    }

    #[test]
    fn test_from_binary_without_grandparent_fails() {
        let err = Project::from_binary(PathBuf::from("boot.dol")).unwrap_err();
        assert!(matches!(err, SyncError::UnnamedProject(_)));
    }

    #[test]
    fn test_from_binary_detects_data_dir() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Pong");
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::create_dir_all(root.join("data")).unwrap();

        let project = Project::from_binary(root.join("bin").join("boot.dol")).unwrap();
        assert_eq!(project.data_dir, Some(root.join("data")));
    }

    #[test]
    fn test_destination_in_apps_dir() {
        let project = Project::from_binary(PathBuf::from("Projects/Pong/bin/pong.dol")).unwrap();

        assert_eq!(
            project.destination_in(Path::new("/media/usb/apps")),
            PathBuf::from("/media/usb/apps/Pong")
        );
    }

    #[test]
    fn test_display() {
        let local = Project::from_binary(PathBuf::from("Projects/Pong/bin/pong.dol")).unwrap();
        let remote = Project::remote(
            "Pong".to_string(),
            PathBuf::from("/media/usb/apps/Pong/boot.dol"),
        );

        assert_eq!(local.to_string(), "Pong (pong.dol)");
        assert_eq!(remote.to_string(), "Pong");
    }
}
