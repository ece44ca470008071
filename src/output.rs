//! Output formatting and styling module.
//!
//! All user-facing lines go through here: results to stdout, diagnostics to
//! stderr. Styling comes from `colored`, which honors `NO_COLOR` and
//! `CLICOLOR`.

use colored::*;

/// Prints CLI output with consistent styling.
///
/// - Per-file success and error lines (indented ✓ / ✗)
/// - Error messages (red with ✗, stderr)
/// - Warning messages (yellow with ⚠, stderr)
/// - Dry-run notices (yellow)
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints an error message to stderr in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }

    /// Prints an indented per-file success line: `  ✓ <message>`.
    pub fn item_success(message: &str) {
        println!("{}", Self::item_line("✓".green(), message));
    }

    /// Prints an indented per-file error line to stderr: `  ✗ <message>`.
    pub fn item_error(message: &str) {
        eprintln!("{}", Self::item_line("✗".red(), &message.red().to_string()));
    }

    /// Formats a glyph-marked line nested under a header.
    pub fn item_line(glyph: ColoredString, message: &str) -> String {
        format!("  {} {}", glyph, message)
    }

    /// Prints a warning to stderr in yellow with a warning symbol.
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a dry-run line in yellow.
    pub fn dry_run_notice(message: &str) {
        println!("{}", message.yellow());
    }
}
