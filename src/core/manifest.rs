//! core::manifest
//!
//! Loading the dependency manifest.
//!
//! # Overview
//!
//! `hitch.toml` is one top-level table per dependency; the table key is
//! the dependency name. Entries are kept in declaration order (updates
//! apply in that order). A malformed entry does not poison the manifest:
//! it is skipped, with the reason reported alongside the good entries so
//! the caller can warn without aborting.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::dependency::{Declaration, DeclarationError};

/// Errors from reading the manifest document itself.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

/// A validated declaration together with its manifest key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDeclaration {
    pub name: String,
    pub declaration: Declaration,
}

/// A manifest entry that failed validation.
#[derive(Debug)]
pub struct SkippedDependency {
    pub name: String,
    pub reason: DeclarationError,
}

/// Result of loading a manifest.
#[derive(Debug)]
pub struct ManifestLoadResult {
    /// Valid declarations, in declaration order.
    pub declarations: Vec<NamedDeclaration>,
    /// Entries that failed validation, in declaration order.
    pub skipped: Vec<SkippedDependency>,
}

/// Load and validate the manifest at `path`.
///
/// # Errors
///
/// Fails only if the document itself cannot be read or parsed as TOML.
/// Per-entry validation failures land in
/// [`ManifestLoadResult::skipped`] instead.
pub fn load(path: &Path) -> Result<ManifestLoadResult, ManifestError> {
    let contents = fs::read_to_string(path).map_err(|e| ManifestError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let table: toml::Table = toml::from_str(&contents).map_err(|e| ManifestError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut declarations = Vec::new();
    let mut skipped = Vec::new();
    for (name, value) in table {
        match Declaration::from_toml(&value) {
            Ok(declaration) => declarations.push(NamedDeclaration { name, declaration }),
            Err(reason) => skipped.push(SkippedDependency { name, reason }),
        }
    }

    Ok(ManifestLoadResult {
        declarations,
        skipped,
    })
}
