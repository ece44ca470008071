//! mvr - move recently created files into the current directory
//!
//! This library resolves which well-known directories and file name patterns
//! to search, collects files created within a trailing time window, and moves
//! them into a destination directory without overwriting anything already
//! there.

pub mod cli;
pub mod directories;
pub mod mover;
pub mod options;
pub mod output;
pub mod paths;
pub mod patterns;
pub mod scanner;

pub use cli::{Cli, RunContext, RunError, RunSummary, run_cli};
pub use directories::{SourceDir, resolve_directories};
pub use mover::{MoveError, MoveOutcome, MoveReport, move_candidates, unique_destination};
pub use options::{Options, OptionsError};
pub use patterns::{PatternCategory, resolve_patterns};
pub use scanner::{Candidate, CreationTimeSource, FileSystemCreationTime, find_candidates};
