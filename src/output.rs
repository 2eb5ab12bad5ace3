//! JSON output types for `list --json`.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::project::{Project, ProjectLocation, Projects};

/// Top-level JSON document emitted by `list --json`.
#[derive(Serialize, Debug)]
pub struct JsonListing {
    /// The directory that was scanned (workspace or volume root)
    pub root: PathBuf,

    /// Whether the listing comes from the workspace or the volume
    pub location: ProjectLocation,

    /// Projects in listing order
    pub projects: Vec<JsonProject>,
}

/// A single listed project.
#[derive(Serialize, Debug)]
pub struct JsonProject {
    /// 1-based index, usable with `upload <INDEX>` for local listings
    pub index: usize,

    pub name: String,

    /// Path to the compiled binary
    pub binary: PathBuf,

    /// Secondary data directory, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl JsonListing {
    #[must_use]
    pub fn new(root: &Path, location: ProjectLocation, projects: &Projects) -> Self {
        Self {
            root: root.to_path_buf(),
            location,
            projects: projects
                .iter()
                .enumerate()
                .map(|(i, project)| JsonProject::new(i + 1, project))
                .collect(),
        }
    }
}

impl JsonProject {
    fn new(index: usize, project: &Project) -> Self {
        Self {
            index,
            name: project.name.clone(),
            binary: project.binary_path.clone(),
            data_dir: project.data_dir.clone(),
        }
    }
}
