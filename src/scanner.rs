//! Candidate Scanner: finds recently created files matching the patterns.
//!
//! Scanning is non-recursive. Every resolved pattern is applied to every
//! resolved directory, and a match survives only when it is a regular,
//! non-hidden file sitting directly in the searched directory whose creation
//! time falls inside the window.

use crate::output::OutputFormatter;
use chrono::{DateTime, Local, TimeDelta};
use glob::Pattern;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// First character of a hidden file's name.
pub const HIDDEN_MARKER: char = '.';

/// A file eligible to be moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path of the file inside the searched directory.
    pub path: PathBuf,
    /// Birth time reported by the filesystem.
    pub created: DateTime<Local>,
}

/// Why the creation time of a file could not be read.
#[derive(Debug, Error)]
pub enum CreationTimeError {
    /// The platform or filesystem does not record birth times.
    #[error("creation time is not available on this platform or filesystem")]
    Unsupported,
    /// Reading the file's metadata failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Capability-checked access to file creation times.
pub trait CreationTimeSource {
    /// Returns the creation time of `path`, or why it is unavailable.
    fn creation_time(&self, path: &Path) -> Result<DateTime<Local>, CreationTimeError>;
}

/// Reads birth times from the filesystem.
///
/// Modification time is never used as a substitute.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemCreationTime;

impl CreationTimeSource for FileSystemCreationTime {
    fn creation_time(&self, path: &Path) -> Result<DateTime<Local>, CreationTimeError> {
        let metadata = fs::metadata(path)?;
        let created = metadata.created().map_err(|e| match e.kind() {
            io::ErrorKind::Unsupported => CreationTimeError::Unsupported,
            _ => CreationTimeError::Io(e),
        })?;
        Ok(DateTime::<Local>::from(created))
    }
}

/// Inputs of a single scan.
#[derive(Debug, Clone)]
pub struct ScanRequest<'a> {
    /// Directories to search, in order. Duplicates are allowed.
    pub directories: &'a [PathBuf],
    /// Glob patterns matched against entries of each directory.
    pub patterns: &'a [String],
    /// Trailing window in whole minutes.
    pub window_minutes: u32,
    /// Directory files are moved into; never scanned.
    pub destination: &'a Path,
    /// Instant the window is measured back from.
    pub now: DateTime<Local>,
}

impl ScanRequest<'_> {
    /// Oldest creation time still inside the window.
    pub fn cutoff(&self) -> DateTime<Local> {
        self.now - TimeDelta::minutes(i64::from(self.window_minutes))
    }
}

/// Result of a scan.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Matching files, deduplicated and sorted by path.
    pub candidates: Vec<Candidate>,
    /// Files skipped because their creation time could not be read.
    pub skipped: Vec<PathBuf>,
}

/// Collects every file that satisfies the scan request.
///
/// Missing directories and the destination directory are skipped without a
/// diagnostic. Files whose creation time is unreadable are reported on stderr
/// and listed in [`ScanOutcome::skipped`].
pub fn find_candidates(request: &ScanRequest<'_>, times: &dyn CreationTimeSource) -> ScanOutcome {
    let cutoff = request.cutoff();
    let destination = resolved(request.destination);

    let mut found: BTreeMap<PathBuf, Candidate> = BTreeMap::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut skipped: Vec<PathBuf> = Vec::new();

    for directory in request.directories {
        if !directory.exists() {
            log::debug!("Skipping missing directory: {}", directory.display());
            continue;
        }

        if resolved(directory) == destination {
            log::debug!("Skipping destination directory: {}", directory.display());
            continue;
        }

        for pattern in request.patterns {
            for path in matching_entries(directory, pattern) {
                if !is_direct_visible_file(&path, directory) || !seen.insert(path.clone()) {
                    continue;
                }

                match times.creation_time(&path) {
                    Ok(created) if created >= cutoff => {
                        found.insert(path.clone(), Candidate { path, created });
                    }
                    Ok(created) => {
                        log::trace!("Outside window ({}): {}", created, path.display());
                    }
                    Err(e) => {
                        OutputFormatter::warning(&creation_time_warning(&path, &e));
                        skipped.push(path);
                    }
                }
            }
        }
    }

    log::debug!(
        "Scan finished: {} candidate(s), {} skipped",
        found.len(),
        skipped.len()
    );

    ScanOutcome {
        candidates: found.into_values().collect(),
        skipped,
    }
}

fn creation_time_warning(path: &Path, error: &CreationTimeError) -> String {
    format!(
        "Cannot determine creation time for {}, skipping ({})",
        path.display(),
        error
    )
}

/// Expands `pattern` inside `directory`, treating the directory path literally.
fn matching_entries(directory: &Path, pattern: &str) -> Vec<PathBuf> {
    let escaped = Pattern::escape(&directory.to_string_lossy());
    let full_pattern = Path::new(&escaped).join(pattern);

    let paths = match glob::glob(&full_pattern.to_string_lossy()) {
        Ok(paths) => paths,
        Err(e) => {
            log::debug!("Ignoring pattern '{}' in {}: {}", pattern, directory.display(), e);
            return Vec::new();
        }
    };

    paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::debug!("Unreadable glob entry: {}", e);
                None
            }
        })
        .collect()
}

/// True for a regular file directly inside `directory` whose name is not hidden.
fn is_direct_visible_file(path: &Path, directory: &Path) -> bool {
    if path.parent() != Some(directory) {
        return false;
    }

    let hidden = path
        .file_name()
        .map(|name| name.to_string_lossy().starts_with(HIDDEN_MARKER))
        .unwrap_or(true);

    !hidden && path.is_file()
}

fn resolved(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// Creation times keyed by file name; unknown names are unsupported.
    struct FixedTimes(HashMap<String, DateTime<Local>>);

    impl FixedTimes {
        fn new(entries: &[(&str, DateTime<Local>)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(name, time)| (name.to_string(), *time))
                    .collect(),
            )
        }
    }

    impl CreationTimeSource for FixedTimes {
        fn creation_time(&self, path: &Path) -> Result<DateTime<Local>, CreationTimeError> {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            self.0
                .get(&name)
                .copied()
                .ok_or(CreationTimeError::Unsupported)
        }
    }

    fn minutes_ago(now: DateTime<Local>, minutes: i64) -> DateTime<Local> {
        now - TimeDelta::minutes(minutes)
    }

    fn scan(
        dirs: &[PathBuf],
        patterns: &[&str],
        window: u32,
        dest: &Path,
        now: DateTime<Local>,
        times: &FixedTimes,
    ) -> ScanOutcome {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        let request = ScanRequest {
            directories: dirs,
            patterns: &patterns,
            window_minutes: window,
            destination: dest,
            now,
        };
        find_candidates(&request, times)
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(source.path().join("edge.txt"), "x").unwrap();
        let now = Local::now();
        let times = FixedTimes::new(&[("edge.txt", minutes_ago(now, 5))]);

        let outcome = scan(&[source.path().to_path_buf()], &["*"], 5, dest.path(), now, &times);
        assert_eq!(outcome.candidates.len(), 1);
    }

    #[test]
    fn test_ten_minute_old_file_depends_on_window() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(source.path().join("old.png"), "x").unwrap();
        let now = Local::now();
        let times = FixedTimes::new(&[("old.png", minutes_ago(now, 10))]);
        let dirs = [source.path().to_path_buf()];

        assert!(scan(&dirs, &["*"], 5, dest.path(), now, &times).candidates.is_empty());
        assert_eq!(scan(&dirs, &["*"], 15, dest.path(), now, &times).candidates.len(), 1);
    }

    #[test]
    fn test_hidden_files_and_directories_are_excluded() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(source.path().join(".secret.png"), "x").unwrap();
        fs::write(source.path().join("shown.png"), "x").unwrap();
        fs::create_dir(source.path().join("folder.png")).unwrap();
        let now = Local::now();
        let times = FixedTimes::new(&[
            (".secret.png", now),
            ("shown.png", now),
            ("folder.png", now),
        ]);

        let outcome = scan(
            &[source.path().to_path_buf()],
            &["*.png"],
            5,
            dest.path(),
            now,
            &times,
        );
        let names: Vec<_> = outcome
            .candidates
            .iter()
            .map(|c| c.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["shown.png"]);
    }

    #[test]
    fn test_nested_matches_are_excluded() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::create_dir(source.path().join("sub")).unwrap();
        fs::write(source.path().join("sub").join("deep.txt"), "x").unwrap();
        let now = Local::now();
        let times = FixedTimes::new(&[("deep.txt", now)]);

        let outcome = scan(
            &[source.path().to_path_buf()],
            &["sub/*", "*/*"],
            5,
            dest.path(),
            now,
            &times,
        );
        assert!(outcome.candidates.is_empty());
    }

    #[test]
    fn test_duplicates_collapse_and_results_are_sorted() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        for name in ["b.png", "a.png", "c.jpg"] {
            fs::write(source.path().join(name), "x").unwrap();
        }
        let now = Local::now();
        let times = FixedTimes::new(&[("a.png", now), ("b.png", now), ("c.jpg", now)]);
        let dir = source.path().to_path_buf();

        let outcome = scan(
            &[dir.clone(), dir.clone()],
            &["*.png", "*", "a*"],
            5,
            dest.path(),
            now,
            &times,
        );
        let paths: Vec<_> = outcome.candidates.iter().map(|c| c.path.clone()).collect();
        assert_eq!(
            paths,
            vec![dir.join("a.png"), dir.join("b.png"), dir.join("c.jpg")]
        );
    }

    #[test]
    fn test_destination_and_missing_directories_are_skipped() {
        let dest = TempDir::new().unwrap();
        fs::write(dest.path().join("here.txt"), "x").unwrap();
        let now = Local::now();
        let times = FixedTimes::new(&[("here.txt", now)]);
        let missing = dest.path().join("does-not-exist");

        let outcome = scan(
            &[missing, dest.path().to_path_buf()],
            &["*"],
            5,
            dest.path(),
            now,
            &times,
        );
        assert!(outcome.candidates.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_unknown_creation_time_is_skipped_not_fatal() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(source.path().join("known.txt"), "x").unwrap();
        fs::write(source.path().join("unknown.txt"), "x").unwrap();
        let now = Local::now();
        let times = FixedTimes::new(&[("known.txt", now)]);

        let outcome = scan(&[source.path().to_path_buf()], &["*"], 5, dest.path(), now, &times);
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.skipped, vec![source.path().join("unknown.txt")]);
    }

    #[test]
    fn test_creation_time_warning_has_no_redundant_prefix() {
        let message =
            creation_time_warning(Path::new("/tmp/a.png"), &CreationTimeError::Unsupported);
        assert!(message.starts_with("Cannot determine creation time for /tmp/a.png, skipping"));
    }

    #[test]
    fn test_directory_name_with_glob_characters_is_literal() {
        let root = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let source = root.path().join("shots [2024]");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("Screenshot 1.png"), "x").unwrap();
        let now = Local::now();
        let times = FixedTimes::new(&[("Screenshot 1.png", now)]);

        let outcome = scan(&[source.clone()], &["Screenshot*"], 5, dest.path(), now, &times);
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].path, source.join("Screenshot 1.png"));
    }

    #[test]
    fn test_cutoff_subtracts_whole_minutes() {
        let now = Local::now();
        let dirs: Vec<PathBuf> = Vec::new();
        let patterns: Vec<String> = Vec::new();
        let request = ScanRequest {
            directories: &dirs,
            patterns: &patterns,
            window_minutes: 30,
            destination: Path::new("/"),
            now,
        };
        assert_eq!(now - request.cutoff(), TimeDelta::minutes(30));
    }
}
