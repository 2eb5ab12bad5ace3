//! # homebrew-sync
//!
//! A CLI tool for scaffolding Wii homebrew projects and syncing their built
//! binaries and data assets onto an SD card or USB drive.
//!
//! Projects live in a workspace, one folder each:
//! `<workspace>/<Name>/bin/*.dol` for compiled binaries and
//! `<workspace>/<Name>/data/*` for extra assets. Uploading writes them to
//! `<volume>/apps/<Name>/boot.dol` plus the allow-listed data files, which is
//! where the Homebrew Channel looks for them.
//!
//! ## Usage
//!
//! ```bash
//! # Create a new project skeleton
//! homebrew-sync init --name Pong --author me
//!
//! # List what is installed on the SD card
//! homebrew-sync list -r /media/sd
//!
//! # Pick a local project to upload
//! homebrew-sync upload
//!
//! # Upload everything
//! homebrew-sync upload-all
//! ```

mod cli;

use std::process::exit;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, InitArgs, ListArgs, UploadAllArgs, UploadArgs};
use colored::Colorize;
use homebrew_sync::{
    config::{FileConfig, SyncConfig},
    locator::Locator,
    merger::Merger,
    output::JsonListing,
    platform::{NativePlatform, PlatformProvider},
    project::ProjectLocation,
    scaffold::ProjectTemplate,
    volume::DestinationVolume,
};
use humansize::{DECIMAL, format_size};
use inquire::{InquireError, Text};

/// Entry point for the homebrew-sync application.
///
/// Errors from [`inner_main`] are printed as a single line and the process
/// exits with status 1. Interrupted prompts exit the same way after
/// printing `Exiting...`.
fn main() {
    if let Err(err) = inner_main() {
        if is_interrupt(&err) {
            println!("Exiting...");
        } else {
            println!("{}", err.to_string().red());
        }

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Installs the Ctrl+C handler
/// 3. Loads the persistent configuration file (if present)
/// 4. Resolves the run configuration and dispatches the subcommand
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    ctrlc::set_handler(|| {
        println!("Exiting...");
        exit(1);
    })?;

    let file_config = match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            FileConfig::default()
        }
    };

    let platform = NativePlatform;
    let config = args.sync_config(&file_config, &platform);
    let verbose = args.verbose(&file_config);

    match &args.command {
        Command::List(list) => run_list(&config, list, verbose),
        Command::Upload(upload) => run_upload(&config, &platform, upload, verbose),
        Command::UploadAll(upload_all) => run_upload_all(&config, &platform, upload_all, verbose),
        Command::Init(init) => run_init(&config, &file_config, init, verbose),
    }
}

/// Print the projects on the volume, or in the workspace with `--local`.
fn run_list(config: &SyncConfig, args: &ListArgs, verbose: bool) -> Result<()> {
    let locator = Locator::new(config).with_verbose(verbose);

    let (root, location, projects) = if args.local {
        let projects = locator.list_local_projects(&config.workspace);
        (config.workspace.clone(), ProjectLocation::Local, projects)
    } else {
        let volume = DestinationVolume::open(&config.remote_root)?;
        let projects = locator.list_remote_projects(&volume);
        (volume.root().to_path_buf(), ProjectLocation::Remote, projects)
    };

    if args.json {
        let output = JsonListing::new(&root, location, &projects);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", format!("Projects in {}:", root.display()).bold());

    if projects.is_empty() {
        println!("  No projects found.");
    } else {
        projects.print_numbered();
    }
    println!();

    Ok(())
}

/// Upload one local project, chosen by index or interactively.
fn run_upload(
    config: &SyncConfig,
    platform: &impl PlatformProvider,
    args: &UploadArgs,
    verbose: bool,
) -> Result<()> {
    let volume = DestinationVolume::open(&config.remote_root)?;
    platform.ensure_write_access()?;

    let projects = Locator::new(config)
        .with_verbose(verbose)
        .list_local_projects(&config.workspace);

    if projects.is_empty() {
        print_no_local_projects(config);
        return Ok(());
    }

    let project = if let Some(index) = &args.index {
        projects.select(index)?
    } else {
        projects.print_numbered();
        println!();
        projects.interactive_selection()?
    };

    let report = Merger::new(config)
        .with_verbose(verbose)
        .upload_project(project, &volume)?;
    report.print(verbose);

    Ok(())
}

/// Upload every local project, stopping at the first failure.
fn run_upload_all(
    config: &SyncConfig,
    platform: &impl PlatformProvider,
    args: &UploadAllArgs,
    verbose: bool,
) -> Result<()> {
    let volume = DestinationVolume::open(&config.remote_root)?;
    platform.ensure_write_access()?;

    let reports = Merger::new(config)
        .with_verbose(verbose)
        .with_quiet(args.quiet)
        .upload_all_projects(&config.workspace, &volume)?;

    if reports.is_empty() {
        print_no_local_projects(config);
        return Ok(());
    }

    if !args.quiet {
        let total: u64 = reports.iter().map(|r| r.total_size()).sum();
        println!(
            "\n  📊 Uploaded {} projects ({})",
            reports.len().to_string().bright_white(),
            format_size(total, DECIMAL).bright_green().bold()
        );
    }

    Ok(())
}

/// Scaffold a new project in the workspace.
fn run_init(
    config: &SyncConfig,
    file_config: &FileConfig,
    args: &InitArgs,
    verbose: bool,
) -> Result<()> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => Text::new("Project name:").prompt()?,
    };

    let author = match args.author.as_ref().or(file_config.init.author.as_ref()) {
        Some(author) => author.clone(),
        None => Text::new("Author:").prompt()?,
    };

    let template = ProjectTemplate::new(&name, &author);
    let report = template.create(&config.workspace)?;

    println!(
        "{} {} in {}",
        "✨ Created project".green(),
        template.name().bold(),
        report.root.display()
    );

    if verbose {
        for path in &report.written {
            println!("   → {}", path.display());
        }
    }

    Ok(())
}

fn print_no_local_projects(config: &SyncConfig) {
    println!(
        "No local projects found in {}/<name>/bin/*.{}",
        config.workspace.display(),
        config.binary_extension
    );
}

/// Whether `err` comes from the user interrupting or cancelling a prompt.
fn is_interrupt(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationInterrupted | InquireError::OperationCanceled)
    )
}
