//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag. Styling
//! goes through the palette below so every command colors the same thing
//! the same way; `colored` drops the escapes itself when stdout is not a
//! terminal.

use std::fmt::Display;

use colored::{ColoredString, Colorize};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

// ===== Palette =====

/// A dependency name.
pub fn dep_name(name: &str) -> ColoredString {
    name.blue().bold()
}

/// A revision identifier.
pub fn revision(rev: &str) -> ColoredString {
    rev.italic()
}

/// A branch name.
pub fn branch_name(name: &str) -> ColoredString {
    name.bold()
}

/// A healthy state ("clean", an unmodified build version).
pub fn good(text: &str) -> ColoredString {
    text.green()
}

/// A state needing attention ("uncommitted", failed checks).
pub fn problem(text: &str) -> ColoredString {
    text.red()
}

/// A caveat (a dirty build version, skipped entries).
pub fn notice(text: &str) -> ColoredString {
    text.yellow()
}

/// Secondary detail (remote deltas).
pub fn accent(text: &str) -> ColoredString {
    text.cyan()
}
