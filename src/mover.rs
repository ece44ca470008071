//! Mover: relocates candidates into the destination directory.
//!
//! Destination names are computed one candidate at a time against the
//! filesystem as it is after the previous move, so later candidates see the
//! names taken by earlier ones. Nothing is reserved ahead of time.

use crate::output::OutputFormatter;
use crate::scanner::Candidate;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while moving a single file.
#[derive(Debug, Error)]
pub enum MoveError {
    /// The source path has no file name component.
    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),
    /// The filesystem refused the move.
    #[error("failed to move {} to {}: {source}", .from.display(), .to.display())]
    Failed {
        /// File being moved.
        from: PathBuf,
        /// Computed destination.
        to: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
}

impl MoveError {
    /// The cause alone, without the paths the variant carries.
    pub fn reason(&self) -> String {
        match self {
            MoveError::NoFileName(_) => "no file name".to_string(),
            MoveError::Failed { source, .. } => source.to_string(),
        }
    }
}

/// What happened to one candidate.
#[derive(Debug)]
pub enum MoveOutcome {
    /// Dry run: the file would be moved to `destination`.
    Planned {
        /// Source file.
        source: PathBuf,
        /// Destination that would be used.
        destination: PathBuf,
    },
    /// The file now lives at `destination`.
    Moved {
        /// Former location.
        source: PathBuf,
        /// New location.
        destination: PathBuf,
    },
    /// The move was attempted and failed; the batch carried on.
    Failed {
        /// File that could not be moved.
        source: PathBuf,
        /// Why it failed.
        error: MoveError,
    },
}

/// Per-file outcomes of a batch, in candidate order.
#[derive(Debug, Default)]
pub struct MoveReport {
    /// One outcome per candidate.
    pub outcomes: Vec<MoveOutcome>,
}

impl MoveReport {
    /// Number of files actually moved.
    pub fn moved(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, MoveOutcome::Moved { .. }))
            .count()
    }

    /// Number of files that would have been moved in a dry run.
    pub fn planned(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, MoveOutcome::Planned { .. }))
            .count()
    }

    /// Number of failed moves.
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, MoveOutcome::Failed { .. }))
            .count()
    }

    /// Returns true if no move failed.
    pub fn is_complete_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Returns the first free path for `file_name` inside `dest_dir`.
///
/// Tries the name itself, then `<stem>_1<.ext>`, `<stem>_2<.ext>`, and so on.
///
/// # Examples
///
/// ```no_run
/// use mvr::mover::unique_destination;
/// use std::ffi::OsStr;
/// use std::path::Path;
///
/// // With report.pdf already present this yields report_1.pdf.
/// let dest = unique_destination(Path::new("/tmp/inbox"), OsStr::new("report.pdf"));
/// println!("{}", dest.display());
/// ```
pub fn unique_destination(dest_dir: &Path, file_name: &OsStr) -> PathBuf {
    let first = dest_dir.join(file_name);
    if !is_taken(&first) {
        return first;
    }

    let name = Path::new(file_name);
    let stem = name.file_stem().unwrap_or(file_name);
    let extension = name.extension();

    (1u64..)
        .map(|counter| dest_dir.join(suffixed_name(stem, counter, extension)))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or(first)
}

fn suffixed_name(stem: &OsStr, counter: u64, extension: Option<&OsStr>) -> OsString {
    let mut name = stem.to_os_string();
    name.push(format!("_{}", counter));
    if let Some(ext) = extension {
        name.push(".");
        name.push(ext);
    }
    name
}

/// Anything at `path`, including a dangling symlink, makes the name unavailable.
fn is_taken(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Moves `source` to `destination`.
///
/// Uses a rename, falling back to copy-then-delete when the two paths are on
/// different filesystems.
///
/// # Errors
///
/// Returns `MoveError::Failed` carrying the underlying I/O error.
pub fn move_file(source: &Path, destination: &Path) -> Result<(), MoveError> {
    let failed = |e: io::Error| MoveError::Failed {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        source: e,
    };

    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!(
                "Rename across devices, copying {} -> {}",
                source.display(),
                destination.display()
            );
            copy_then_remove(source, destination).map_err(failed)
        }
        Err(e) => Err(failed(e)),
    }
}

/// Copies `source` to `destination`, then removes `source`.
///
/// On any failure a destination created here is removed again, so the file
/// is only ever left at `source`.
pub(crate) fn copy_then_remove(source: &Path, destination: &Path) -> io::Result<()> {
    let preexisting = is_taken(destination);

    let result = fs::copy(source, destination).and_then(|_| fs::remove_file(source));
    if result.is_err() && !preexisting {
        let _ = fs::remove_file(destination);
    }
    result
}

/// Moves each candidate into `dest_dir`, or reports the plan in a dry run.
///
/// Prints one line per candidate. A failed move is reported on stderr and
/// never stops the batch.
pub fn move_candidates(candidates: &[Candidate], dest_dir: &Path, dry_run: bool) -> MoveReport {
    let mut report = MoveReport::default();

    if candidates.is_empty() {
        OutputFormatter::plain("No matching files found.");
        return report;
    }

    OutputFormatter::plain(&format!("Found {} file(s):", candidates.len()));

    for candidate in candidates {
        let outcome = process_candidate(&candidate.path, dest_dir, dry_run);
        match &outcome {
            MoveOutcome::Planned {
                source,
                destination,
            } => OutputFormatter::dry_run_notice(&format!(
                "  [DRY RUN] Would move: {} -> {}",
                source.display(),
                destination.display()
            )),
            MoveOutcome::Moved {
                source,
                destination,
            } => OutputFormatter::item_success(&format!(
                "Moved: {} -> {}",
                source.display(),
                destination.display()
            )),
            MoveOutcome::Failed { source, error } => OutputFormatter::item_error(&format!(
                "Error moving {}: {}",
                source.display(),
                error.reason()
            )),
        }
        report.outcomes.push(outcome);
    }

    report
}

fn process_candidate(source: &Path, dest_dir: &Path, dry_run: bool) -> MoveOutcome {
    let Some(file_name) = source.file_name() else {
        return MoveOutcome::Failed {
            source: source.to_path_buf(),
            error: MoveError::NoFileName(source.to_path_buf()),
        };
    };

    let destination = unique_destination(dest_dir, file_name);

    if dry_run {
        return MoveOutcome::Planned {
            source: source.to_path_buf(),
            destination,
        };
    }

    match move_file(source, &destination) {
        Ok(()) => MoveOutcome::Moved {
            source: source.to_path_buf(),
            destination,
        },
        Err(error) => MoveOutcome::Failed {
            source: source.to_path_buf(),
            error,
        },
    }
}
