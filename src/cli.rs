use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use homebrew_sync::{
    config::{
        CopyExtensionSet, FileConfig, SyncConfig, file::expand_tilde, sync::DEFAULT_WORKSPACE,
    },
    platform::PlatformProvider,
};

#[derive(Args)]
pub(crate) struct ListArgs {
    /// List projects in the local workspace instead of the SD/USB
    #[arg(short = 'l', long)]
    pub(crate) local: bool,

    /// Output the listing as a JSON document
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct UploadArgs {
    /// Number of the project to upload, as shown by `list --local`; prompts when omitted
    pub(crate) index: Option<String>,
}

#[derive(Args)]
pub(crate) struct UploadAllArgs {
    /// Hide the progress bar and per-project summaries
    #[arg(short = 'q', long)]
    pub(crate) quiet: bool,
}

#[derive(Args)]
pub(crate) struct InitArgs {
    /// Project name; prompts when omitted
    #[arg(short = 'n', long)]
    pub(crate) name: Option<String>,

    /// Author written into meta.xml; prompts when omitted
    #[arg(short = 'a', long)]
    pub(crate) author: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// List all projects on the Wii SD/USB
    List(ListArgs),

    /// Upload a local project (choose from list)
    Upload(UploadArgs),

    /// Upload all local projects
    UploadAll(UploadAllArgs),

    /// Create a new project
    Init(InitArgs),
}

#[derive(Parser)]
#[command(name = "homebrew-sync", version)]
#[command(about = "Scaffold Wii homebrew projects and sync them to an SD card or USB drive")]
pub(crate) struct Cli {
    /// Path to the mounted Wii SD/USB [default: first drive letter found on Windows, /media/usb elsewhere]
    #[arg(short = 'r', long, global = true)]
    remote: Option<PathBuf>,

    /// Directory containing one folder per project [default: Projects]
    #[arg(short = 'w', long, global = true)]
    workspace: Option<PathBuf>,

    /// Print every copied file and every unreadable entry
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Cli {
    /// Resolve the run configuration: CLI argument > config file > default.
    pub(crate) fn sync_config(
        &self,
        file_config: &FileConfig,
        platform: &impl PlatformProvider,
    ) -> SyncConfig {
        let remote = self
            .remote
            .as_ref()
            .or(file_config.remote.as_ref())
            .map_or_else(|| platform.default_volume_guess(), |p| expand_tilde(p));

        let workspace = self
            .workspace
            .as_ref()
            .or(file_config.workspace.as_ref())
            .map_or_else(|| PathBuf::from(DEFAULT_WORKSPACE), |p| expand_tilde(p));

        let extensions = file_config
            .upload
            .extensions
            .as_ref()
            .map_or_else(CopyExtensionSet::default, CopyExtensionSet::new);

        SyncConfig::new(remote, workspace).with_extensions(extensions)
    }

    pub(crate) fn verbose(&self, file_config: &FileConfig) -> bool {
        self.verbose || file_config.upload.verbose.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPlatform;

    impl PlatformProvider for FixedPlatform {
        fn requires_elevated_write(&self) -> bool {
            false
        }

        fn default_volume_guess(&self) -> PathBuf {
            PathBuf::from("/mnt/guess")
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("homebrew-sync").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults_without_config() {
        let cli = parse(&["list"]);
        let config = cli.sync_config(&FileConfig::default(), &FixedPlatform);

        assert_eq!(config.remote_root, PathBuf::from("/mnt/guess"));
        assert_eq!(config.workspace, PathBuf::from("Projects"));
        assert_eq!(config.extensions, CopyExtensionSet::default());
        assert!(!cli.verbose(&FileConfig::default()));
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let file: FileConfig = toml::from_str(
            "remote = \"/media/sd\"\nworkspace = \"/src/wii\"\n[upload]\nextensions = [\"ogg\"]\nverbose = true\n",
        )
        .unwrap();
        let cli = parse(&["upload-all"]);
        let config = cli.sync_config(&file, &FixedPlatform);

        assert_eq!(config.remote_root, PathBuf::from("/media/sd"));
        assert_eq!(config.workspace, PathBuf::from("/src/wii"));
        assert!(config.extensions.contains("ogg"));
        assert!(!config.extensions.contains("png"));
        assert!(cli.verbose(&file));
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let file: FileConfig = toml::from_str("remote = \"/media/sd\"\n").unwrap();
        let cli = parse(&["-r", "/media/usb1", "list", "-w", "/tmp/ws"]);
        let config = cli.sync_config(&file, &FixedPlatform);

        assert_eq!(config.remote_root, PathBuf::from("/media/usb1"));
        assert_eq!(config.workspace, PathBuf::from("/tmp/ws"));
    }

    #[test]
    fn test_subcommands_parse() {
        assert!(matches!(
            parse(&["upload", "3"]).command,
            Command::Upload(UploadArgs { index: Some(ref i) }) if i == "3"
        ));
        assert!(matches!(
            parse(&["upload"]).command,
            Command::Upload(UploadArgs { index: None })
        ));
        assert!(matches!(
            parse(&["upload-all", "--quiet"]).command,
            Command::UploadAll(UploadAllArgs { quiet: true })
        ));
        assert!(matches!(
            parse(&["list", "--local", "--json"]).command,
            Command::List(ListArgs {
                local: true,
                json: true
            })
        ));
        assert!(matches!(
            parse(&["init", "--name", "Pong"]).command,
            Command::Init(InitArgs { name: Some(ref n), author: None }) if n == "Pong"
        ));
    }

    #[test]
    fn test_upload_index_is_validated_at_selection() {
        // Non-numeric indices reach the selection step, which reports them
        assert!(matches!(
            parse(&["upload", "two"]).command,
            Command::Upload(UploadArgs { index: Some(ref i) }) if i == "two"
        ));
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["homebrew-sync"]).is_err());
    }
}
