//! Command-line interface module for mvr.
//!
//! This module handles:
//! - Argument parsing into an [`Options`] record
//! - Orchestration of a run: resolve directories and patterns, scan, move

use crate::directories::resolve_directories;
use crate::mover::{MoveReport, move_candidates};
use crate::options::{DEFAULT_WINDOW_MINUTES, Options, OptionsError};
use crate::output::OutputFormatter;
use crate::patterns::resolve_patterns;
use crate::scanner::{CreationTimeSource, ScanRequest, find_candidates};
use chrono::{DateTime, Local};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use thiserror::Error;

const EXAMPLES: &str = "\
Examples:
  mvr --docs --window=10 --scr    # Move screenshots from Documents (last 10 mins)
  mvr --desktop --window=5        # Move all files from Desktop (last 5 mins)
  mvr --auto                      # Move from common dirs (last 5 mins)
  mvr --auto --dr                 # Dry run
  mvr '*.dmg' --dl                # Move .dmg files from Downloads (last 5 mins)
  mvr --images                    # Move image files (last 5 mins)
  mvr --videos --window=30        # Move video files (last 30 mins)";

/// Move recently created files to the current directory.
#[derive(Debug, Parser)]
#[command(name = "mvr", version, after_help = EXAMPLES)]
pub struct Cli {
    /// Search in ~/Documents
    #[arg(long)]
    pub docs: bool,

    /// Search in ~/Desktop
    #[arg(long)]
    pub desktop: bool,

    /// Search in ~/Downloads
    #[arg(long = "dl")]
    pub downloads: bool,

    /// Search in ~, ~/Downloads, ~/Desktop, ~/Documents
    #[arg(long)]
    pub auto: bool,

    /// Match Screenshot* files
    #[arg(long = "scr")]
    pub screenshots: bool,

    /// Match image files
    #[arg(long)]
    pub images: bool,

    /// Match video files
    #[arg(long)]
    pub videos: bool,

    /// Time window in minutes
    #[arg(long, value_name = "MINUTES", default_value_t = DEFAULT_WINDOW_MINUTES, env = "MVR_WINDOW")]
    pub window: u32,

    /// Dry run - list files without moving
    #[arg(long = "dr")]
    pub dry_run: bool,

    /// Custom file patterns (e.g. '*.dmg')
    #[arg(value_name = "PATTERNS")]
    pub patterns: Vec<String>,

    /// Verbosity level
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors in the log
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Log level selected by `--verbose` / `--quiet`.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        Self {
            docs: cli.docs,
            desktop: cli.desktop,
            downloads: cli.downloads,
            auto: cli.auto,
            screenshots: cli.screenshots,
            images: cli.images,
            videos: cli.videos,
            patterns: cli.patterns,
            window_minutes: cli.window,
            dry_run: cli.dry_run,
        }
    }
}

/// Environment a run executes against.
pub struct RunContext<'a> {
    /// Directory files are moved into, normally the working directory.
    pub destination: PathBuf,
    /// Home directory the well-known source directories live under.
    pub home: PathBuf,
    /// Instant the time window is measured back from.
    pub now: DateTime<Local>,
    /// Where creation times come from.
    pub times: &'a dyn CreationTimeSource,
}

/// Errors that stop a run before any file is touched.
#[derive(Debug, Error)]
pub enum RunError {
    /// The options record is malformed.
    #[error(transparent)]
    Options(#[from] OptionsError),
}

/// What a completed run did.
#[derive(Debug)]
pub struct RunSummary {
    /// Files skipped because their creation time could not be read.
    pub skipped: Vec<PathBuf>,
    /// Outcome of every candidate.
    pub report: MoveReport,
}

/// Runs one invocation: resolve, scan, then move (or plan) every match.
///
/// Per-file problems are reported and recorded in the summary; only a
/// malformed options record is returned as an error.
///
/// # Examples
///
/// ```no_run
/// use chrono::Local;
/// use mvr::cli::{RunContext, run_cli};
/// use mvr::options::Options;
/// use mvr::scanner::FileSystemCreationTime;
/// use std::path::PathBuf;
///
/// let context = RunContext {
///     destination: PathBuf::from("."),
///     home: PathBuf::from("/home/me"),
///     now: Local::now(),
///     times: &FileSystemCreationTime,
/// };
/// let options = Options { auto: true, dry_run: true, ..Options::default() };
/// let summary = run_cli(&options, &context).expect("valid options");
/// println!("{} file(s) would move", summary.report.planned());
/// ```
pub fn run_cli(options: &Options, context: &RunContext<'_>) -> Result<RunSummary, RunError> {
    options.validate()?;

    let directories = resolve_directories(options, &context.home, &context.destination);
    let patterns = resolve_patterns(options);

    log::info!(
        "Searching {} director(ies) for {} pattern(s), window {} min",
        directories.len(),
        patterns.len(),
        options.window_minutes
    );

    let request = ScanRequest {
        directories: &directories,
        patterns: &patterns,
        window_minutes: options.window_minutes,
        destination: &context.destination,
        now: context.now,
    };
    let outcome = find_candidates(&request, context.times);

    let report = move_candidates(&outcome.candidates, &context.destination, options.dry_run);

    if options.dry_run && !outcome.candidates.is_empty() {
        OutputFormatter::info("Dry run complete. No files were modified.");
    }
    if !report.is_complete_success() {
        OutputFormatter::warning(&format!(
            "{} file(s) could not be moved. Please review errors above.",
            report.failed()
        ));
    }

    Ok(RunSummary {
        skipped: outcome.skipped,
        report,
    })
}
