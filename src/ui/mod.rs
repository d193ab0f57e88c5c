//! ui
//!
//! User-facing output utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting, verbosity, and the color palette
//!
//! # Design
//!
//! All human-readable output goes through this module so formatting and
//! quiet-mode handling stay consistent across commands.

pub mod output;
