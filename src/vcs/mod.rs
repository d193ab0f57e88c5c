//! vcs
//!
//! Version-control backends behind one trait.
//!
//! # Architecture
//!
//! This module is the single doorway to every working copy. Each backend
//! shells out to the external VCS executable (`git` or `hg`) through
//! [`process`]; no other module spawns VCS processes. The [`VcsBackend`]
//! trait exposes exactly the capability set the rest of the crate needs:
//! presence and cleanliness checks, revision/branch/date queries, remote
//! deltas, and moving the working copy to a recorded revision.
//!
//! Backends are selected two ways:
//!
//! - by declared kind ([`backend_for`]), when a dependency names its VCS
//!   in the manifest
//! - by detection ([`detect_backend`]), when only a path is known (the
//!   host project for `buildversion`)
//!
//! # Error Handling
//!
//! Every fallible operation returns [`BackendError`]. A non-zero exit from
//! the underlying executable becomes [`BackendError::CommandFailed`],
//! carrying the command line, the working copy it ran in, the exit code,
//! and captured stderr. Backend errors are never swallowed; callers decide
//! whether to abort or report.

pub mod git;
pub mod mercurial;
pub mod mock;
mod process;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use git::GitBackend;
use mercurial::MercurialBackend;

/// Errors from version-control operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The VCS executable could not be launched at all.
    #[error("failed to run '{binary}': {source}")]
    Spawn {
        /// The executable that failed to start
        binary: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The VCS command ran and exited with a non-zero status.
    #[error("`{}` failed in '{}' ({}): {}", .command, .dir.display(), describe_exit(.code), .stderr)]
    CommandFailed {
        /// The full command line that was executed
        command: String,
        /// The working copy the command ran in
        dir: PathBuf,
        /// Exit code, if the process exited normally
        code: Option<i32>,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// A revision identifier does not start with three hex characters.
    #[error("revision '{revision}' does not start with three hex characters")]
    MalformedRevision {
        /// The offending revision string
        revision: String,
    },

    /// A commit-count query produced something other than a number.
    #[error("could not parse commit count from '{output}'")]
    MalformedCount {
        /// The raw command output
        output: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Supported version-control systems.
///
/// The set is closed: a dependency is either git or mercurial, and an
/// unrecognized `type` in the manifest is rejected at load time rather
/// than carried around as a dependency without a working backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsKind {
    /// Git, driven through the `git` executable.
    Git,
    /// Mercurial, driven through the `hg` executable.
    Mercurial,
}

impl VcsKind {
    /// Parse the manifest `type` field.
    ///
    /// Returns `None` for anything other than `"git"` or `"hg"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "git" => Some(VcsKind::Git),
            "hg" => Some(VcsKind::Mercurial),
            _ => None,
        }
    }

    /// The manifest spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            VcsKind::Git => "git",
            VcsKind::Mercurial => "hg",
        }
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How [`VcsBackend::update_to_revision`] treats local modifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Refuse to clobber local modifications; the backend blocks instead
    /// of discarding.
    Checked,
    /// Discard local modifications and move to the target revision.
    Clean,
}

/// Commit deltas between the working copy and its remote counterpart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoteChanges {
    /// Commits on the remote-tracking reference not reachable from HEAD.
    pub incoming: u64,
    /// Local commits not reachable from the remote-tracking reference.
    pub outgoing: u64,
}

/// Paths of the VCS executables to invoke.
///
/// Defaults to the PATH-resolved names; the user configuration file can
/// point at specific binaries instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binaries {
    /// The git executable.
    pub git: String,
    /// The mercurial executable.
    pub hg: String,
}

impl Default for Binaries {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            hg: "hg".to_string(),
        }
    }
}

/// Operations every version-control backend provides for one working copy.
///
/// All operations are synchronous and block on the external process. Range
/// expressions passed to [`revision_count`](Self::revision_count) are
/// backend-native (`rev-list` ranges for git, revsets for mercurial).
pub trait VcsBackend: fmt::Debug {
    /// Which VCS this backend drives.
    fn kind(&self) -> VcsKind;

    /// Whether the working copy exists, judged by the presence of the VCS
    /// metadata directory. Never errors.
    fn exists(&self) -> bool;

    /// Retrieve remote history without touching the working tree.
    fn fetch(&self) -> Result<(), BackendError>;

    /// Whether the working copy has any uncommitted changes, untracked
    /// files included, per the backend's native status semantics.
    fn has_uncommitted_changes(&self) -> Result<bool, BackendError>;

    /// Commits ahead/behind the remote-tracking reference.
    ///
    /// Backends that cannot compute this report zero deltas rather than
    /// failing.
    fn remote_changes(&self) -> Result<RemoteChanges, BackendError> {
        Ok(RemoteChanges::default())
    }

    /// The current revision, in the backend's full native form.
    fn revision(&self) -> Result<String, BackendError>;

    /// Number of commits in a backend-native range expression.
    fn revision_count(&self, range: &str) -> Result<u64, BackendError>;

    /// Number of commits reachable from the current revision.
    fn head_count(&self) -> Result<u64, BackendError>;

    /// Timestamp of the current revision, RFC 3339 when the backend's
    /// native form parses, the trimmed raw string otherwise.
    fn date(&self) -> Result<String, BackendError>;

    /// Name of the branch the working copy is on. For git, a detached
    /// working copy reports the literal `HEAD`.
    fn current_branch(&self) -> Result<String, BackendError>;

    /// Move the working copy to the given revision.
    fn update_to_revision(&self, revision: &str, mode: UpdateMode) -> Result<(), BackendError>;

    /// The reproducible build identifier for the current revision.
    ///
    /// See [`compose_build_number`] for the derivation.
    fn build_number_string(&self) -> Result<String, BackendError> {
        let count = self.head_count()?;
        let revision = self.revision()?;
        compose_build_number(count, &revision)
    }
}

/// Construct the backend for a declared kind.
pub fn backend_for(kind: VcsKind, root: &Path, binaries: &Binaries) -> Box<dyn VcsBackend> {
    match kind {
        VcsKind::Git => Box::new(GitBackend::new(root, &binaries.git)),
        VcsKind::Mercurial => Box::new(MercurialBackend::new(root, &binaries.hg)),
    }
}

/// Resolve a backend by inspecting a path for VCS metadata directories.
///
/// Checks `.git` first, then `.hg`. Returns `None` when the path is not a
/// recognized working copy.
pub fn detect_backend(path: &Path, binaries: &Binaries) -> Option<Box<dyn VcsBackend>> {
    if path.join(".git").is_dir() {
        return Some(Box::new(GitBackend::new(path, &binaries.git)));
    }
    if path.join(".hg").is_dir() {
        return Some(Box::new(MercurialBackend::new(path, &binaries.hg)));
    }
    None
}

/// Compose the two-part build identifier `{count}.{decimal}`.
///
/// The first part is the number of commits leading to the current
/// revision, which grows monotonically along a line of history. The second
/// is the base-10 value of the revision's first three hex characters,
/// enough of a fingerprint to look the commit up in the log.
///
/// # Example
///
/// ```
/// use hitch::vcs::compose_build_number;
///
/// let version = compose_build_number(42, "a1b2c3d4").unwrap();
/// assert_eq!(version, "42.2587");
/// ```
pub fn compose_build_number(count: u64, revision: &str) -> Result<String, BackendError> {
    let prefix = revision
        .get(..3)
        .ok_or_else(|| BackendError::MalformedRevision {
            revision: revision.to_string(),
        })?;
    let decimal =
        u32::from_str_radix(prefix, 16).map_err(|_| BackendError::MalformedRevision {
            revision: revision.to_string(),
        })?;
    Ok(format!("{}.{}", count, decimal))
}

/// Parse a commit-count query result. Empty output counts as zero.
pub(crate) fn parse_count(output: &str) -> Result<u64, BackendError> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| BackendError::MalformedCount {
            output: trimmed.to_string(),
        })
}

/// Normalize a backend timestamp to RFC 3339.
///
/// Both `git log --pretty=format:%ci` and mercurial's `isodatesec` filter
/// emit `YYYY-MM-DD HH:MM:SS +ZZZZ`. Anything that does not parse passes
/// through trimmed; the timestamp is informational metadata and must not
/// fail an otherwise valid state capture.
pub(crate) fn normalize_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    match chrono::DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z") {
        Ok(dt) => dt.to_rfc3339(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod kinds {
        use super::*;

        #[test]
        fn parse_known_kinds() {
            assert_eq!(VcsKind::parse("git"), Some(VcsKind::Git));
            assert_eq!(VcsKind::parse("hg"), Some(VcsKind::Mercurial));
        }

        #[test]
        fn parse_rejects_unknown() {
            assert_eq!(VcsKind::parse("svn"), None);
            assert_eq!(VcsKind::parse("Git"), None);
            assert_eq!(VcsKind::parse(""), None);
        }

        #[test]
        fn display_round_trips() {
            for kind in [VcsKind::Git, VcsKind::Mercurial] {
                assert_eq!(VcsKind::parse(kind.as_str()), Some(kind));
            }
        }
    }

    mod build_number {
        use super::*;

        #[test]
        fn composes_count_and_hex_prefix() {
            assert_eq!(compose_build_number(42, "a1b2c3d4").unwrap(), "42.2587");
            assert_eq!(compose_build_number(0, "000abc").unwrap(), "0.0");
            assert_eq!(compose_build_number(7, "fff000").unwrap(), "7.4095");
        }

        #[test]
        fn exactly_three_characters_is_enough() {
            assert_eq!(compose_build_number(1, "abc").unwrap(), "1.2748");
        }

        #[test]
        fn short_revision_rejected() {
            let err = compose_build_number(1, "ab").unwrap_err();
            assert!(matches!(err, BackendError::MalformedRevision { .. }));
        }

        #[test]
        fn non_hex_prefix_rejected() {
            let err = compose_build_number(1, "xyz123").unwrap_err();
            assert!(matches!(err, BackendError::MalformedRevision { .. }));
        }
    }

    mod counts {
        use super::*;

        #[test]
        fn parses_plain_number() {
            assert_eq!(parse_count("42\n").unwrap(), 42);
        }

        #[test]
        fn empty_output_is_zero() {
            assert_eq!(parse_count("").unwrap(), 0);
            assert_eq!(parse_count("  \n").unwrap(), 0);
        }

        #[test]
        fn garbage_rejected() {
            assert!(matches!(
                parse_count("forty-two"),
                Err(BackendError::MalformedCount { .. })
            ));
        }
    }

    mod timestamps {
        use super::*;

        #[test]
        fn normalizes_vcs_form_to_rfc3339() {
            assert_eq!(
                normalize_timestamp("2026-08-25 10:15:00 +0200"),
                "2026-08-25T10:15:00+02:00"
            );
        }

        #[test]
        fn unparseable_passes_through_trimmed() {
            assert_eq!(normalize_timestamp("  yesterday \n"), "yesterday");
        }
    }

    mod detection {
        use super::*;
        use tempfile::TempDir;

        #[test]
        fn detects_git_metadata() {
            let dir = TempDir::new().unwrap();
            std::fs::create_dir(dir.path().join(".git")).unwrap();

            let backend = detect_backend(dir.path(), &Binaries::default());
            assert_eq!(backend.map(|b| b.kind()), Some(VcsKind::Git));
        }

        #[test]
        fn detects_mercurial_metadata() {
            let dir = TempDir::new().unwrap();
            std::fs::create_dir(dir.path().join(".hg")).unwrap();

            let backend = detect_backend(dir.path(), &Binaries::default());
            assert_eq!(backend.map(|b| b.kind()), Some(VcsKind::Mercurial));
        }

        #[test]
        fn plain_directory_is_not_detected() {
            let dir = TempDir::new().unwrap();
            assert!(detect_backend(dir.path(), &Binaries::default()).is_none());
        }

        #[test]
        fn metadata_file_is_not_a_working_copy() {
            // Submodules use a .git file; only a directory counts here.
            let dir = TempDir::new().unwrap();
            std::fs::write(dir.path().join(".git"), "gitdir: elsewhere").unwrap();

            assert!(detect_backend(dir.path(), &Binaries::default()).is_none());
        }
    }
}
