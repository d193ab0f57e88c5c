//! vcs::mercurial
//!
//! Mercurial backend, driven through the `hg` executable.
//!
//! Queries about the current revision go through `hg parents` templates,
//! which address the working directory's parent changeset. `fetch` maps to
//! `hg pull`, which brings in remote history without updating the working
//! directory. Remote deltas are not computed for mercurial; the trait's
//! zero-delta default applies.

use std::path::{Path, PathBuf};

use super::process;
use super::{normalize_timestamp, BackendError, UpdateMode, VcsBackend, VcsKind};

/// Backend for one mercurial working copy.
#[derive(Debug, Clone)]
pub struct MercurialBackend {
    root: PathBuf,
    binary: String,
}

impl MercurialBackend {
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

impl VcsBackend for MercurialBackend {
    fn kind(&self) -> VcsKind {
        VcsKind::Mercurial
    }

    fn exists(&self) -> bool {
        self.root.join(".hg").is_dir()
    }

    fn fetch(&self) -> Result<(), BackendError> {
        self.run(&["pull"])?;
        Ok(())
    }

    fn has_uncommitted_changes(&self) -> Result<bool, BackendError> {
        let status = self.run(&["status"])?;
        Ok(!status.is_empty())
    }

    fn revision(&self) -> Result<String, BackendError> {
        self.run(&["parents", "--template", "{node}"])
    }

    fn revision_count(&self, range: &str) -> Result<u64, BackendError> {
        // One node per line; the revset decides which commits count.
        let output = self.run(&["log", "-r", range, "--template", "{node}\n"])?;
        if output.is_empty() {
            return Ok(0);
        }
        Ok(output.lines().count() as u64)
    }

    fn head_count(&self) -> Result<u64, BackendError> {
        self.revision_count("0::.")
    }

    fn date(&self) -> Result<String, BackendError> {
        let raw = self.run(&["parents", "--template", "{date|isodatesec}"])?;
        Ok(normalize_timestamp(&raw))
    }

    fn current_branch(&self) -> Result<String, BackendError> {
        self.run(&["parents", "--template", "{branch}"])
    }

    fn update_to_revision(&self, revision: &str, mode: UpdateMode) -> Result<(), BackendError> {
        match mode {
            UpdateMode::Checked => self.run(&["update", "--check", "--rev", revision])?,
            UpdateMode::Clean => self.run(&["update", "--clean", "--rev", revision])?,
        };
        Ok(())
    }
}
