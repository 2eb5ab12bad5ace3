//! Artifact upload onto the destination volume.
//!
//! This module copies a project's compiled binary and its auxiliary data
//! files into `apps/<name>/` on the volume. Two sources feed the destination
//! folder, in priority order:
//!
//! 1. the build output folder (`bin/`) next to the binary
//! 2. the optional secondary data folder (`data/`)
//!
//! A file name (compared case-insensitively) is written by the first source
//! that provides it; later sources never overwrite it. Uploads are not
//! transactional: a failure leaves already-copied files in place, and
//! re-running the upload overwrites them.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use colored::Colorize;
use filetime::FileTime;
use humansize::{DECIMAL, format_size};
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use crate::{
    config::SyncConfig,
    error::{Result, SyncError},
    locator::{Locator, compare_names},
    project::Project,
    volume::DestinationVolume,
};

/// A single file written to the volume.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopiedFile {
    /// Where the file came from
    pub source: PathBuf,

    /// Where it was written
    pub destination: PathBuf,

    /// Number of bytes copied
    pub size: u64,
}

/// Outcome of uploading one project.
#[derive(Clone, Debug, Default)]
pub struct UploadReport {
    /// Name of the uploaded project
    pub project: String,

    /// The project folder on the volume (`apps/<name>`)
    pub destination: PathBuf,

    /// Every file written, boot binary first
    pub copied: Vec<CopiedFile>,

    /// Data files not copied because a higher-priority source claimed their name
    pub shadowed: Vec<PathBuf>,
}

impl UploadReport {
    /// Total number of bytes written.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.copied.iter().map(|f| f.size).sum()
    }

    /// One-line confirmation naming the destination.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "✅ Uploaded {} to {} ({} files, {})",
            self.project.bold(),
            self.destination.display(),
            self.copied.len(),
            format_size(self.total_size(), DECIMAL)
        )
    }

    /// Print the summary line, followed by every copied and shadowed file when `verbose`.
    pub fn print(&self, verbose: bool) {
        println!("{}", self.summary_line());

        if verbose {
            for line in self.detail_lines() {
                println!("{line}");
            }
        }
    }

    fn detail_lines(&self) -> Vec<String> {
        let copied = self.copied.iter().map(|file| {
            format!(
                "   → {} ({})",
                file.destination
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy(),
                format_size(file.size, DECIMAL)
            )
        });
        let shadowed = self.shadowed.iter().map(|path| {
            format!(
                "   {} {} (already provided by the build output)",
                "↷".yellow(),
                path.display()
            )
        });

        copied.chain(shadowed).collect()
    }
}

/// Copies projects onto a destination volume.
pub struct Merger<'a> {
    /// Run configuration (extension allow-list, boot file name)
    config: &'a SyncConfig,

    /// Whether to list every copied file
    verbose: bool,

    /// When `true`, suppresses the progress bar and per-project output
    quiet: bool,
}

impl<'a> Merger<'a> {
    #[must_use]
    pub const fn new(config: &'a SyncConfig) -> Self {
        Self {
            config,
            verbose: false,
            quiet: false,
        }
    }

    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable or disable quiet mode (suppresses progress and summaries).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Upload one project into `apps/<name>/` on `volume`.
    ///
    /// Steps, in order:
    /// 1. create the destination folder if needed
    /// 2. copy the binary to the boot file name, overwriting any previous one
    /// 3. copy allow-listed files from the build output folder, except the binary
    /// 4. copy allow-listed files from the data folder whose names are still unclaimed
    ///
    /// Both folders are read in case-insensitive name order. Copies keep the
    /// source's access and modification times.
    ///
    /// # Errors
    ///
    /// Any directory creation, read or copy failure aborts the upload and is
    /// returned as is. Files copied before the failure stay on the volume.
    pub fn upload_project(
        &self,
        project: &Project,
        volume: &DestinationVolume,
    ) -> Result<UploadReport> {
        let destination = project.destination_in(&volume.apps_dir());
        fs::create_dir_all(&destination).map_err(|source| SyncError::CreateDir {
            path: destination.clone(),
            source,
        })?;

        let mut report = UploadReport {
            project: project.name.clone(),
            destination: destination.clone(),
            ..UploadReport::default()
        };

        let boot = destination.join(&self.config.boot_file_name);
        let size = copy_preserving_times(&project.binary_path, &boot)?;
        report.copied.push(CopiedFile {
            source: project.binary_path.clone(),
            destination: boot,
            size,
        });

        // Names already present in the destination for this upload
        let mut claimed: HashSet<String> = HashSet::new();
        claimed.insert(self.config.boot_file_name.to_lowercase());

        let build_output = project
            .build_output_dir()
            .ok_or_else(|| SyncError::UnnamedProject(project.binary_path.clone()))?;

        for source in self.data_files(build_output)? {
            if source == project.binary_path {
                continue;
            }
            self.merge_file(source, &destination, &mut claimed, &mut report)?;
        }

        if let Some(data_dir) = &project.data_dir {
            for source in self.data_files(data_dir)? {
                self.merge_file(source, &destination, &mut claimed, &mut report)?;
            }
        }

        Ok(report)
    }

    /// Upload every project of `workspace`, in listing order.
    ///
    /// The first failing project aborts the run; projects after it are not
    /// attempted. An empty workspace uploads nothing, shows no progress bar,
    /// and succeeds.
    ///
    /// # Panics
    ///
    /// This method may panic if the progress bar template string is invalid,
    /// though this should not occur as the template is hardcoded and valid.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`upload_project`](Self::upload_project).
    pub fn upload_all_projects(
        &self,
        workspace: &Path,
        volume: &DestinationVolume,
    ) -> Result<Vec<UploadReport>> {
        let projects = Locator::new(self.config)
            .with_verbose(self.verbose)
            .list_local_projects(workspace);

        if projects.is_empty() {
            return Ok(Vec::new());
        }

        let progress = if self.quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(projects.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("█▉▊▋▌▍▎▏  "),
            );
            pb
        };

        let mut reports = Vec::with_capacity(projects.len());

        for project in &projects {
            progress.set_message(project.name.clone());

            let report = match self.upload_project(project, volume) {
                Ok(report) => report,
                Err(e) => {
                    progress.abandon_with_message(format!("❌ {}", project.name));
                    return Err(e);
                }
            };

            progress.println(report.summary_line());
            if self.verbose {
                for line in report.detail_lines() {
                    progress.println(line);
                }
            }

            reports.push(report);
            progress.inc(1);
        }

        progress.finish_with_message("✅ Upload complete");

        Ok(reports)
    }

    /// Regular files of `dir` whose extension is allow-listed, in case-insensitive order.
    fn data_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by(|a, b| compare_names(a.file_name(), b.file_name()))
        {
            let entry = match entry {
                Ok(entry) => entry,
                // The folder itself can't be read
                Err(err) if err.depth() == 0 => return Err(io::Error::from(err).into()),
                // Dangling symlink or an entry that vanished mid-scan
                Err(err) => {
                    if self.verbose {
                        eprintln!("{} {}", "Warning:".yellow(), format!("skipping {err}").yellow());
                    }
                    continue;
                }
            };

            if entry.file_type().is_file() && self.config.extensions.matches(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Copy `source` into `destination` unless its name was already claimed.
    fn merge_file(
        &self,
        source: PathBuf,
        destination: &Path,
        claimed: &mut HashSet<String>,
        report: &mut UploadReport,
    ) -> Result<()> {
        let Some(file_name) = source.file_name() else {
            return Ok(());
        };

        if !claimed.insert(file_name.to_string_lossy().to_lowercase()) {
            report.shadowed.push(source);
            return Ok(());
        }

        let target = destination.join(file_name);
        let size = copy_preserving_times(&source, &target)?;
        report.copied.push(CopiedFile {
            source,
            destination: target,
            size,
        });

        Ok(())
    }
}

/// Copy a file, then carry over its access and modification times.
///
/// Returns the number of bytes copied.
fn copy_preserving_times(from: &Path, to: &Path) -> Result<u64> {
    let copy_error = |source: io::Error| SyncError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    let size = fs::copy(from, to).map_err(copy_error)?;
    let metadata = fs::metadata(from).map_err(copy_error)?;

    filetime::set_file_times(
        to,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )
    .map_err(copy_error)?;

    Ok(size)
}
