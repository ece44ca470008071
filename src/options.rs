//! The parsed options record consumed by every stage of a run.
//!
//! `Options` is deliberately free of any argument-parser types: the CLI layer
//! builds it, the resolvers and the scanner only read it.

use glob::Pattern;
use std::path::Path;
use thiserror::Error;

/// Window applied when `--window` is not given.
pub const DEFAULT_WINDOW_MINUTES: u32 = 5;

/// Errors raised while validating an options record.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// A custom pattern could not be compiled as a glob.
    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as supplied on the command line.
        pattern: String,
        /// Why the glob compiler rejected it.
        reason: String,
    },
    /// A custom pattern is an absolute path; patterns are relative to each
    /// searched directory.
    #[error("absolute glob pattern '{0}' is not supported")]
    AbsolutePattern(String),
}

/// Immutable description of what to search for and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Search `~/Documents`.
    pub docs: bool,
    /// Search `~/Desktop`.
    pub desktop: bool,
    /// Search `~/Downloads`.
    pub downloads: bool,
    /// Search the fixed set of common directories, overriding the flags above.
    pub auto: bool,
    /// Match screenshot files.
    pub screenshots: bool,
    /// Match image files.
    pub images: bool,
    /// Match video files.
    pub videos: bool,
    /// Custom glob patterns, in the order given.
    pub patterns: Vec<String>,
    /// Trailing creation-time window in whole minutes.
    pub window_minutes: u32,
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            docs: false,
            desktop: false,
            downloads: false,
            auto: false,
            screenshots: false,
            images: false,
            videos: false,
            patterns: Vec::new(),
            window_minutes: DEFAULT_WINDOW_MINUTES,
            dry_run: false,
        }
    }
}

impl Options {
    /// Checks that every custom pattern is a well-formed glob.
    ///
    /// # Errors
    ///
    /// Returns `OptionsError::InvalidPattern` for the first pattern the glob
    /// compiler rejects, or `OptionsError::AbsolutePattern` for an absolute one.
    pub fn validate(&self) -> Result<(), OptionsError> {
        for pattern in &self.patterns {
            if Path::new(pattern).has_root() {
                return Err(OptionsError::AbsolutePattern(pattern.clone()));
            }
            Pattern::new(pattern).map_err(|e| OptionsError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.msg.to_string(),
            })?;
        }
        Ok(())
    }
}
