//! Command-line interface.

use std::path::{
    Path,
    PathBuf,
};

use clap::{
    ArgAction,
    Parser,
    Subcommand,
};

use crate::config::{
    ConfigError,
    ConfigManager,
};
use crate::document::JsonFileStore;
use crate::paths::LayoutResolver;
use crate::processor::FileReport;
use crate::publisher::{
    PublishOptions,
    Publisher,
    Report,
};

#[derive(Debug, Parser)]
#[command(name = "lang-publisher", version, about, long_about = None)]
pub struct Cli {
    /// Application root containing the vendor and language directories
    #[arg(short, long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file (defaults to `.lang-publisher.json` in the workspace)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Publish locales; existing files are left alone unless --force is given
    Install {
        /// Locales to install, or `*` for every available locale
        #[arg(required = true)]
        locales: Vec<String>,
        /// Merge new keys into files that already exist
        #[arg(short, long)]
        force: bool,
    },
    /// Merge new vendor keys into every installed locale
    Update,
    /// Re-publish locales (all installed ones when none are given)
    Reset {
        locales: Vec<String>,
        /// Discard local edits and copy the vendor files as they are
        #[arg(long)]
        full: bool,
    },
    /// Remove the published files of locales
    Uninstall {
        #[arg(required = true)]
        locales: Vec<String>,
    },
    /// List locales
    Locales {
        /// Show installed locales instead of the ones the vendor ships
        #[arg(long)]
        installed: bool,
    },
}

/// Lines to print and whether every locale succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub lines: Vec<String>,
    pub success: bool,
}

/// Executes a parsed command line.
///
/// # Errors
/// Configuration that cannot be loaded or fails validation.
pub fn run(cli: &Cli) -> Result<RunOutput, ConfigError> {
    let mut config_manager = ConfigManager::new(cli.workspace.clone());
    config_manager.load_settings(cli.config.as_deref())?;

    let settings = config_manager.get_settings();
    let resolver = LayoutResolver::new(config_manager.workspace_root(), settings);
    let store = JsonFileStore::new(settings.indent);
    let publisher = Publisher::new(settings, &resolver, &store);

    let output = match &cli.command {
        Command::Install { locales, force } => {
            let report = publisher.publish(locales, PublishOptions::install(*force));
            render_report(&report, |file| describe_file(&cli.workspace, file))
        }
        Command::Update => {
            let report = publisher.update();
            render_report(&report, |file| describe_file(&cli.workspace, file))
        }
        Command::Reset { locales, full } => {
            let report = publisher.reset(locales, *full);
            render_report(&report, |file| describe_file(&cli.workspace, file))
        }
        Command::Uninstall { locales } => {
            let report = publisher.uninstall(locales);
            render_report(&report, |path| {
                format!("{}: removed", relative_display(&cli.workspace, path))
            })
        }
        Command::Locales { installed } => {
            let lines =
                if *installed { publisher.installed_locales() } else { publisher.available_locales() };
            RunOutput { lines, success: true }
        }
    };

    Ok(output)
}

fn render_report<T>(report: &Report<T>, describe: impl Fn(&T) -> String) -> RunOutput {
    let mut lines = Vec::new();
    for locale in &report.locales {
        match &locale.result {
            Ok(items) => lines.extend(items.iter().map(&describe)),
            Err(err) => lines.push(format!("{}: error: {err}", locale.locale)),
        }
    }
    RunOutput { lines, success: report.is_success() }
}

fn describe_file(workspace: &Path, file: &FileReport) -> String {
    format!("{}: {}", relative_display(workspace, &file.target_path), file.outcome)
}

fn relative_display(workspace: &Path, path: &Path) -> String {
    path.strip_prefix(workspace).unwrap_or(path).display().to_string()
}
