//! Pattern categories and the Pattern Resolver.
//!
//! Each category expands to a fixed list of glob patterns matched against
//! file base names.
//!
//! # Examples
//!
//! ```
//! use mvr::options::Options;
//! use mvr::patterns::{PatternCategory, resolve_patterns};
//!
//! assert_eq!(PatternCategory::Screenshot.globs(), &["Screenshot*"]);
//! assert_eq!(resolve_patterns(&Options::default()), vec!["*".to_string()]);
//! ```

use crate::options::Options;

/// Pattern used when no category and no custom pattern is selected.
pub const MATCH_ALL: &str = "*";

const SCREENSHOT_GLOBS: &[&str] = &["Screenshot*"];

const IMAGE_GLOBS: &[&str] = &[
    "*.jpg", "*.jpeg", "*.png", "*.gif", "*.bmp", "*.tiff", "*.webp", "*.heic",
];

const VIDEO_GLOBS: &[&str] = &[
    "*.mov", "*.mp4", "*.mkv", "*.avi", "*.wmv", "*.flv", "*.webm", "*.m4v",
];

/// A predefined group of file name patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternCategory {
    /// Screenshots (`Screenshot*`)
    Screenshot,
    /// Image files (JPG, PNG, HEIC, etc.)
    Image,
    /// Video files (MOV, MP4, MKV, etc.)
    Video,
}

impl PatternCategory {
    /// All categories, in the order they are expanded.
    pub const ALL: [PatternCategory; 3] = [
        PatternCategory::Screenshot,
        PatternCategory::Image,
        PatternCategory::Video,
    ];

    /// Returns the glob patterns this category expands to.
    pub fn globs(&self) -> &'static [&'static str] {
        match self {
            PatternCategory::Screenshot => SCREENSHOT_GLOBS,
            PatternCategory::Image => IMAGE_GLOBS,
            PatternCategory::Video => VIDEO_GLOBS,
        }
    }

    /// Returns true if `options` selects this category.
    pub fn is_selected(&self, options: &Options) -> bool {
        match self {
            PatternCategory::Screenshot => options.screenshots,
            PatternCategory::Image => options.images,
            PatternCategory::Video => options.videos,
        }
    }
}

/// Builds the ordered list of glob patterns to apply.
///
/// Category groups come first (screenshot, image, video), then custom
/// patterns in the order given. Falls back to [`MATCH_ALL`].
pub fn resolve_patterns(options: &Options) -> Vec<String> {
    let mut patterns: Vec<String> = PatternCategory::ALL
        .iter()
        .filter(|category| category.is_selected(options))
        .flat_map(|category| category.globs().iter().map(|glob| glob.to_string()))
        .collect();

    patterns.extend(options.patterns.iter().cloned());

    if patterns.is_empty() {
        patterns.push(MATCH_ALL.to_string());
    }

    log::debug!("Resolved patterns: {:?}", patterns);
    patterns
}
