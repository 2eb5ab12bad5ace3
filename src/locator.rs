//! Project discovery in the local workspace and on the destination volume.
//!
//! This module provides the scanning logic that turns the on-disk layout
//! into ordered project listings:
//!
//! - Workspace: `<workspace>/<name>/bin/*.dol`, one entry per binary
//! - Volume: `<root>/apps/<name>/boot.dol`, one entry per folder
//!
//! Every directory level is read in case-insensitive name order so that a
//! listing and a later index-based selection see the same sequence.

use std::{cmp::Ordering, ffi::OsStr, path::Path};

use colored::Colorize;
use walkdir::{DirEntry, WalkDir};

use crate::{
    config::{SyncConfig, sync::BUILD_OUTPUT_DIR},
    project::{Project, Projects},
    volume::DestinationVolume,
};

/// Compare two file names case-insensitively, breaking ties by plain string order.
///
/// Non UTF-8 names are compared through their lossy conversion.
#[must_use]
pub fn compare_names(a: &OsStr, b: &OsStr) -> Ordering {
    let a = a.to_string_lossy();
    let b = b.to_string_lossy();

    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(&b))
}

/// Directory scanner for homebrew projects.
///
/// The locator never caches: each call walks the filesystem again, so two
/// calls against an unchanged tree return identical listings.
pub struct Locator<'a> {
    /// Run configuration (binary extension, boot file name)
    config: &'a SyncConfig,

    /// Whether to report unreadable entries on stderr
    verbose: bool,
}

impl<'a> Locator<'a> {
    #[must_use]
    pub const fn new(config: &'a SyncConfig) -> Self {
        Self {
            config,
            verbose: false,
        }
    }

    /// Enable or disable reporting of entries that could not be read.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// List the compiled binaries of every project in `workspace`.
    ///
    /// Project folders are visited in case-insensitive order, and so are the
    /// binaries inside each `bin/` folder. A project with several binaries
    /// yields several entries sharing the project name. A missing workspace,
    /// or project folders without `bin/`, contribute nothing.
    #[must_use]
    pub fn list_local_projects(&self, workspace: &Path) -> Projects {
        let mut projects = Vec::new();

        for project_dir in self.sorted_children(workspace).filter(is_dir) {
            let bin_dir = project_dir.path().join(BUILD_OUTPUT_DIR);
            if !bin_dir.is_dir() {
                continue;
            }

            for binary in self
                .sorted_children(&bin_dir)
                .filter(|entry| entry.file_type().is_file())
                .filter(|entry| self.config.is_binary(entry.path()))
            {
                match Project::from_binary(binary.into_path()) {
                    Ok(project) => projects.push(project),
                    Err(e) => self.report(&e.to_string()),
                }
            }
        }

        projects.into()
    }

    /// List the projects installed on the volume.
    ///
    /// A folder under `apps/` counts only if it holds a regular file named
    /// after the boot binary. A missing `apps/` folder yields an empty listing.
    #[must_use]
    pub fn list_remote_projects(&self, volume: &DestinationVolume) -> Projects {
        self.sorted_children(&volume.apps_dir())
            .filter(is_dir)
            .filter_map(|app_dir| {
                let boot = app_dir.path().join(&self.config.boot_file_name);
                if !boot.is_file() {
                    return None;
                }

                let name = app_dir.file_name().to_string_lossy().into_owned();
                Some(Project::remote(name, boot))
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Immediate children of `dir`, in case-insensitive name order.
    ///
    /// Symlinks are followed so that linked project folders are listed like
    /// real ones. Unreadable entries are skipped.
    fn sorted_children(&self, dir: &Path) -> impl Iterator<Item = DirEntry> + '_ {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by(|a, b| compare_names(a.file_name(), b.file_name()))
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    // A missing root is an empty listing, not a failure
                    if e.io_error().map(std::io::Error::kind)
                        != Some(std::io::ErrorKind::NotFound)
                    {
                        self.report(&e.to_string());
                    }
                    None
                }
            })
    }

    fn report(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", "Warning:".yellow(), message.yellow());
        }
    }
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
}
