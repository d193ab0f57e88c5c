//! vcs::mock
//!
//! Mock backend for deterministic testing.
//!
//! # Design
//!
//! The mock provides an in-memory implementation of [`VcsBackend`] with
//! configurable state and failure injection. Handles are cheap clones
//! sharing the same state, so a test can keep one handle for assertions
//! while a dependency owns another.
//!
//! # Example
//!
//! ```
//! use hitch::vcs::mock::MockVcs;
//! use hitch::vcs::VcsBackend;
//!
//! let vcs = MockVcs::new();
//! vcs.set_uncommitted(true);
//!
//! assert!(vcs.exists());
//! assert!(vcs.has_uncommitted_changes().unwrap());
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{BackendError, RemoteChanges, UpdateMode, VcsBackend, VcsKind};

/// Mock backend for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockVcs {
    inner: Arc<Mutex<MockVcsInner>>,
}

#[derive(Debug)]
struct MockVcsInner {
    kind: VcsKind,
    exists: bool,
    uncommitted: bool,
    revision: String,
    date: String,
    branch: String,
    head_count: u64,
    remote: RemoteChanges,
    fetch_calls: u32,
    updates: Vec<(String, UpdateMode)>,
    fail_on: Option<FailOn>,
}

/// Which operation should fail with an injected error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    /// Fail `fetch`.
    Fetch,
    /// Fail `has_uncommitted_changes`.
    Status,
    /// Fail `revision`, `date`, and count queries.
    Revision,
    /// Fail `update_to_revision`.
    Update,
}

impl MockVcs {
    /// A present, clean git working copy at a fixed synthetic revision.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockVcsInner {
                kind: VcsKind::Git,
                exists: true,
                uncommitted: false,
                revision: "0123456789abcdef0123456789abcdef01234567".to_string(),
                date: "2026-08-25T10:15:00+02:00".to_string(),
                branch: "main".to_string(),
                head_count: 1,
                remote: RemoteChanges::default(),
                fetch_calls: 0,
                updates: Vec::new(),
                fail_on: None,
            })),
        }
    }

    /// A working copy whose repository is absent on disk.
    pub fn missing() -> Self {
        let vcs = Self::new();
        vcs.set_exists(false);
        vcs
    }

    pub fn set_kind(&self, kind: VcsKind) {
        self.inner.lock().unwrap().kind = kind;
    }

    pub fn set_exists(&self, exists: bool) {
        self.inner.lock().unwrap().exists = exists;
    }

    pub fn set_uncommitted(&self, uncommitted: bool) {
        self.inner.lock().unwrap().uncommitted = uncommitted;
    }

    pub fn set_revision(&self, revision: &str) {
        self.inner.lock().unwrap().revision = revision.to_string();
    }

    pub fn set_date(&self, date: &str) {
        self.inner.lock().unwrap().date = date.to_string();
    }

    pub fn set_branch(&self, branch: &str) {
        self.inner.lock().unwrap().branch = branch.to_string();
    }

    pub fn set_head_count(&self, count: u64) {
        self.inner.lock().unwrap().head_count = count;
    }

    pub fn set_remote(&self, remote: RemoteChanges) {
        self.inner.lock().unwrap().remote = remote;
    }

    /// Make one operation fail with an injected error.
    pub fn fail_on(&self, fail: FailOn) {
        self.inner.lock().unwrap().fail_on = Some(fail);
    }

    /// How many times `fetch` was called.
    pub fn fetch_calls(&self) -> u32 {
        self.inner.lock().unwrap().fetch_calls
    }

    /// Every `update_to_revision` call, in order.
    pub fn updates(&self) -> Vec<(String, UpdateMode)> {
        self.inner.lock().unwrap().updates.clone()
    }

    fn injected_failure(&self, op: FailOn) -> Result<(), BackendError> {
        if self.inner.lock().unwrap().fail_on == Some(op) {
            return Err(BackendError::CommandFailed {
                command: "mock".to_string(),
                dir: PathBuf::from("mock"),
                code: Some(1),
                stderr: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl VcsBackend for MockVcs {
    fn kind(&self) -> VcsKind {
        self.inner.lock().unwrap().kind
    }

    fn exists(&self) -> bool {
        self.inner.lock().unwrap().exists
    }

    fn fetch(&self) -> Result<(), BackendError> {
        self.injected_failure(FailOn::Fetch)?;
        self.inner.lock().unwrap().fetch_calls += 1;
        Ok(())
    }

    fn has_uncommitted_changes(&self) -> Result<bool, BackendError> {
        self.injected_failure(FailOn::Status)?;
        Ok(self.inner.lock().unwrap().uncommitted)
    }

    fn remote_changes(&self) -> Result<RemoteChanges, BackendError> {
        Ok(self.inner.lock().unwrap().remote)
    }

    fn revision(&self) -> Result<String, BackendError> {
        self.injected_failure(FailOn::Revision)?;
        Ok(self.inner.lock().unwrap().revision.clone())
    }

    fn revision_count(&self, _range: &str) -> Result<u64, BackendError> {
        self.head_count()
    }

    fn head_count(&self) -> Result<u64, BackendError> {
        self.injected_failure(FailOn::Revision)?;
        Ok(self.inner.lock().unwrap().head_count)
    }

    fn date(&self) -> Result<String, BackendError> {
        self.injected_failure(FailOn::Revision)?;
        Ok(self.inner.lock().unwrap().date.clone())
    }

    fn current_branch(&self) -> Result<String, BackendError> {
        Ok(self.inner.lock().unwrap().branch.clone())
    }

    fn update_to_revision(&self, revision: &str, mode: UpdateMode) -> Result<(), BackendError> {
        self.injected_failure(FailOn::Update)?;
        let mut inner = self.inner.lock().unwrap();
        inner.revision = revision.to_string();
        inner.updates.push((revision.to_string(), mode));
        Ok(())
    }
}
