//! core::state
//!
//! Reading and writing the recorded-state document.
//!
//! # Overview
//!
//! `hitch.lock` maps dependency names to captured states. The document is
//! pretty-printed JSON so diffs stay reviewable; entries are written in
//! whatever order the caller supplies (the project hands them over sorted
//! case-insensitively by name).
//!
//! Reading is deliberately permissive: [`RawState`] tolerates absent
//! fields and unknown keys so that validation can report every defect in
//! one pass instead of dying on the first malformed entry. Writing always
//! goes through a temp file and an atomic rename; a crash mid-write never
//! leaves a truncated lock file behind.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from lock file operations.
#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("no recorded dependency states at '{path}' (run 'hitch record' first)")]
    NotFound { path: PathBuf },

    #[error("failed to read lock file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse lock file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write lock file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize dependency states: {0}")]
    SerializeError(String),
}

/// A captured dependency state.
///
/// `revision` is the contract: an exact, full-length native identifier
/// that the backend can check out verbatim. `date` is informational
/// metadata for humans reading the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepState {
    /// Full native revision identifier (40-hex for git, node id for hg).
    pub revision: String,

    /// Commit timestamp, RFC 3339 where the backend's output parses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// One lock file entry as found on disk, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawState {
    pub revision: Option<String>,
    pub date: Option<String>,
}

/// Read the lock file into unvalidated entries.
///
/// # Errors
///
/// A missing file is [`StateStoreError::NotFound`]; any other read or
/// parse failure is reported with the offending path.
pub fn read_states(path: &Path) -> Result<HashMap<String, RawState>, StateStoreError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StateStoreError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StateStoreError::ReadError {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    serde_json::from_str(&contents).map_err(|e| StateStoreError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write the lock file, replacing any previous content.
///
/// Entries are emitted in iteration order. The document is written to a
/// temp file in the same directory and renamed into place.
pub fn write_states<'a, I>(path: &Path, entries: I) -> Result<(), StateStoreError>
where
    I: IntoIterator<Item = (&'a str, &'a DepState)>,
{
    let mut document = serde_json::Map::new();
    for (name, state) in entries {
        let value = serde_json::to_value(state)
            .map_err(|e| StateStoreError::SerializeError(e.to_string()))?;
        document.insert(name.to_string(), value);
    }

    let mut contents = serde_json::to_string_pretty(&document)
        .map_err(|e| StateStoreError::SerializeError(e.to_string()))?;
    contents.push('\n');

    let temp_path = path.with_extension("lock.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| StateStoreError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| StateStoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

    file.sync_all().map_err(|e| StateStoreError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| StateStoreError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
