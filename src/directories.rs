//! Well-known source directories and the Directory Resolver.

use crate::options::Options;
use std::path::{Path, PathBuf};

/// A directory the tool knows how to find relative to the home directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceDir {
    /// The home directory itself.
    Home,
    /// `~/Downloads`
    Downloads,
    /// `~/Desktop`
    Desktop,
    /// `~/Documents`
    Documents,
}

/// Directories searched by `--auto`, in search order.
pub const AUTO_DIRS: [SourceDir; 4] = [
    SourceDir::Home,
    SourceDir::Downloads,
    SourceDir::Desktop,
    SourceDir::Documents,
];

impl SourceDir {
    /// Returns the name of this directory below home, empty for home itself.
    pub fn dir_name(&self) -> &'static str {
        match self {
            SourceDir::Home => "",
            SourceDir::Downloads => "Downloads",
            SourceDir::Desktop => "Desktop",
            SourceDir::Documents => "Documents",
        }
    }

    /// Returns the absolute path of this directory for the given home.
    pub fn path(&self, home: &Path) -> PathBuf {
        match self {
            SourceDir::Home => home.to_path_buf(),
            _ => home.join(self.dir_name()),
        }
    }
}

/// Builds the ordered list of directories to search.
///
/// `--auto` wins over the individual flags. Individual flags are applied in
/// the fixed order documents, desktop, downloads. With nothing selected the
/// result is `[cwd]`.
pub fn resolve_directories(options: &Options, home: &Path, cwd: &Path) -> Vec<PathBuf> {
    let selected: Vec<SourceDir> = if options.auto {
        AUTO_DIRS.to_vec()
    } else {
        [
            (options.docs, SourceDir::Documents),
            (options.desktop, SourceDir::Desktop),
            (options.downloads, SourceDir::Downloads),
        ]
        .into_iter()
        .filter_map(|(flag, dir)| flag.then_some(dir))
        .collect()
    };

    let mut directories: Vec<PathBuf> = selected.iter().map(|dir| dir.path(home)).collect();

    if directories.is_empty() {
        directories.push(cwd.to_path_buf());
    }

    log::debug!("Resolved search directories: {:?}", directories);
    directories
}
