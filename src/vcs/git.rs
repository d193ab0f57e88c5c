//! vcs::git
//!
//! Git backend, driven through the `git` executable.
//!
//! Remote deltas compare HEAD against the configured upstream (`@{u}`); a
//! working copy without an upstream fails the query with git's own
//! explanation rather than guessing.

use std::path::{Path, PathBuf};

use super::process;
use super::{normalize_timestamp, parse_count, BackendError, RemoteChanges, UpdateMode, VcsBackend, VcsKind};

/// Backend for one git working copy.
#[derive(Debug, Clone)]
pub struct GitBackend {
    root: PathBuf,
    binary: String,
}

impl GitBackend {
    /// Bind to the working copy at `root`, invoking `binary`.
    pub fn new(root: &Path, binary: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            binary: binary.to_string(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, BackendError> {
        process::run(&self.binary, args, &self.root)
    }
}

impl VcsBackend for GitBackend {
    fn kind(&self) -> VcsKind {
        VcsKind::Git
    }

    fn exists(&self) -> bool {
        self.root.join(".git").is_dir()
    }

    fn fetch(&self) -> Result<(), BackendError> {
        self.run(&["fetch"])?;
        Ok(())
    }

    fn has_uncommitted_changes(&self) -> Result<bool, BackendError> {
        let status = self.run(&["status", "--porcelain"])?;
        Ok(!status.is_empty())
    }

    fn remote_changes(&self) -> Result<RemoteChanges, BackendError> {
        let outgoing = self.revision_count("@{u}..")?;
        let incoming = self.revision_count("..@{u}")?;
        Ok(RemoteChanges { incoming, outgoing })
    }

    fn revision(&self) -> Result<String, BackendError> {
        self.run(&["rev-parse", "HEAD"])
    }

    fn revision_count(&self, range: &str) -> Result<u64, BackendError> {
        let output = self.run(&["rev-list", "--count", range])?;
        parse_count(&output)
    }

    fn head_count(&self) -> Result<u64, BackendError> {
        self.revision_count("HEAD")
    }

    fn date(&self) -> Result<String, BackendError> {
        let raw = self.run(&["log", "-1", "--pretty=format:%ci"])?;
        Ok(normalize_timestamp(&raw))
    }

    fn current_branch(&self) -> Result<String, BackendError> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn update_to_revision(&self, revision: &str, mode: UpdateMode) -> Result<(), BackendError> {
        match mode {
            UpdateMode::Checked => self.run(&["checkout", revision])?,
            UpdateMode::Clean => self.run(&["checkout", "--force", revision])?,
        };
        Ok(())
    }
}
