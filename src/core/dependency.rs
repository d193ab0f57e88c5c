//! core::dependency
//!
//! A declared sub-repository bound to its version control backend.
//!
//! # Overview
//!
//! The manifest declares each dependency as a TOML table with four
//! required string fields (`path`, `type`, `branch`, `url`). Validation
//! is exhaustive: a bad declaration reports every missing field at once,
//! and an unrecognized `type` is rejected by name. A [`Dependency`] that
//! exists at all therefore always carries a working backend; there is no
//! half-constructed state to defend against downstream.
//!
//! The declared branch is informational. Operations never check it out;
//! the working copy's actual branch may legitimately diverge.

use std::path::Path;

use thiserror::Error;

use crate::core::state::DepState;
use crate::vcs::{
    backend_for, BackendError, Binaries, RemoteChanges, UpdateMode, VcsBackend, VcsKind,
};

/// Fields every manifest declaration must carry, in manifest order.
const REQUIRED_FIELDS: [&str; 4] = ["path", "type", "branch", "url"];

/// Errors from validating a single manifest declaration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("declaration is not a table (found {0})")]
    NotATable(&'static str),

    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("unrecognized vcs type '{0}' (expected \"git\" or \"hg\")")]
    UnrecognizedKind(String),
}

/// A validated manifest declaration, not yet bound to a working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Working copy location, relative to the project root.
    pub path: String,
    /// Version control system managing the working copy.
    pub kind: VcsKind,
    /// Branch the dependency is expected to track.
    pub branch: String,
    /// Remote the dependency is cloned from.
    pub url: String,
}

impl Declaration {
    /// Validate one manifest entry.
    ///
    /// # Errors
    ///
    /// Collects every missing (or non-string) required field into a
    /// single [`DeclarationError::MissingFields`] before checking the
    /// `type` value.
    pub fn from_toml(value: &toml::Value) -> Result<Self, DeclarationError> {
        let table = value
            .as_table()
            .ok_or(DeclarationError::NotATable(value.type_str()))?;

        let mut missing = Vec::new();
        for name in REQUIRED_FIELDS {
            if table.get(name).and_then(toml::Value::as_str).is_none() {
                missing.push(name);
            }
        }
        if !missing.is_empty() {
            return Err(DeclarationError::MissingFields(missing));
        }

        let kind_raw = field_str(table, "type");
        let kind = VcsKind::parse(kind_raw)
            .ok_or_else(|| DeclarationError::UnrecognizedKind(kind_raw.to_string()))?;

        Ok(Self {
            path: field_str(table, "path").to_string(),
            kind,
            branch: field_str(table, "branch").to_string(),
            url: field_str(table, "url").to_string(),
        })
    }
}

/// Fetch a string field already known to be present.
fn field_str<'t>(table: &'t toml::Table, name: &str) -> &'t str {
    table
        .get(name)
        .and_then(toml::Value::as_str)
        .unwrap_or_default()
}

/// A declared dependency bound to a live backend.
#[derive(Debug)]
pub struct Dependency {
    name: String,
    path: String,
    kind: VcsKind,
    branch: String,
    url: String,
    backend: Box<dyn VcsBackend>,
}

impl Dependency {
    /// Bind a validated declaration to the working copy at `workdir`.
    pub fn new(
        name: impl Into<String>,
        declaration: &Declaration,
        workdir: &Path,
        binaries: &Binaries,
    ) -> Self {
        Self {
            name: name.into(),
            path: declaration.path.clone(),
            kind: declaration.kind,
            branch: declaration.branch.clone(),
            url: declaration.url.clone(),
            backend: backend_for(declaration.kind, workdir, binaries),
        }
    }

    /// Construct a dependency around an existing backend.
    ///
    /// Intended for tests that inject a [`crate::vcs::mock::MockVcs`];
    /// the declared path defaults to the name and the url is left empty.
    pub fn with_backend(
        name: impl Into<String>,
        branch: impl Into<String>,
        backend: Box<dyn VcsBackend>,
    ) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            kind: backend.kind(),
            branch: branch.into(),
            url: String::new(),
            name,
            backend,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The path declared in the manifest, relative to the project root.
    pub fn declared_path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> VcsKind {
        self.kind
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the declared path holds a working copy of the right kind.
    pub fn exists(&self) -> bool {
        self.backend.exists()
    }

    pub fn fetch(&self) -> Result<(), BackendError> {
        self.backend.fetch()
    }

    pub fn has_uncommitted_changes(&self) -> Result<bool, BackendError> {
        self.backend.has_uncommitted_changes()
    }

    pub fn remote_changes(&self) -> Result<RemoteChanges, BackendError> {
        self.backend.remote_changes()
    }

    pub fn revision(&self) -> Result<String, BackendError> {
        self.backend.revision()
    }

    pub fn current_branch(&self) -> Result<String, BackendError> {
        self.backend.current_branch()
    }

    /// Capture the working copy's current state.
    pub fn state(&self) -> Result<DepState, BackendError> {
        Ok(DepState {
            revision: self.backend.revision()?,
            date: Some(self.backend.date()?),
        })
    }

    /// Move the working copy to a previously captured state.
    pub fn apply_state(&self, state: &DepState, mode: UpdateMode) -> Result<(), BackendError> {
        self.backend.update_to_revision(&state.revision, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::mock::MockVcs;

    mod declarations {
        use super::*;

        fn parse(body: &str) -> Result<Declaration, DeclarationError> {
            let value: toml::Value = toml::from_str(body).unwrap();
            Declaration::from_toml(&value)
        }

        #[test]
        fn accepts_complete_declaration() {
            let declaration = parse(
                r#"
                path = "vendor/libalpha"
                type = "git"
                branch = "main"
                url = "https://example.com/libalpha.git"
                "#,
            )
            .unwrap();

            assert_eq!(declaration.path, "vendor/libalpha");
            assert_eq!(declaration.kind, VcsKind::Git);
            assert_eq!(declaration.branch, "main");
            assert_eq!(declaration.url, "https://example.com/libalpha.git");
        }

        #[test]
        fn reports_every_missing_field() {
            let result = parse(r#"path = "vendor/libalpha""#);
            assert_eq!(
                result,
                Err(DeclarationError::MissingFields(vec![
                    "type", "branch", "url"
                ]))
            );
        }

        #[test]
        fn non_string_field_counts_as_missing() {
            let result = parse(
                r#"
                path = 42
                type = "hg"
                branch = "default"
                url = "https://example.com/lib"
                "#,
            );
            assert_eq!(result, Err(DeclarationError::MissingFields(vec!["path"])));
        }

        #[test]
        fn rejects_unrecognized_kind() {
            let result = parse(
                r#"
                path = "vendor/lib"
                type = "svn"
                branch = "trunk"
                url = "https://example.com/lib"
                "#,
            );
            assert_eq!(
                result,
                Err(DeclarationError::UnrecognizedKind("svn".to_string()))
            );
        }

        #[test]
        fn rejects_non_table_entries() {
            let value = toml::Value::String("not a table".to_string());
            let result = Declaration::from_toml(&value);
            assert_eq!(result, Err(DeclarationError::NotATable("string")));
        }
    }

    mod behavior {
        use super::*;

        #[test]
        fn captures_revision_and_date() {
            let mock = MockVcs::new();
            mock.set_revision("feedfacefeedfacefeedfacefeedfacefeedface");
            mock.set_date("2026-03-01T12:00:00+00:00");

            let dep = Dependency::with_backend("libalpha", "main", Box::new(mock));
            let state = dep.state().unwrap();

            assert_eq!(state.revision, "feedfacefeedfacefeedfacefeedfacefeedface");
            assert_eq!(state.date.as_deref(), Some("2026-03-01T12:00:00+00:00"));
        }

        #[test]
        fn applies_recorded_state() {
            let mock = MockVcs::new();
            let dep = Dependency::with_backend("libalpha", "main", Box::new(mock.clone()));

            let state = DepState {
                revision: "0000111122223333444455556666777788889999".to_string(),
                date: None,
            };
            dep.apply_state(&state, UpdateMode::Checked).unwrap();

            assert_eq!(
                mock.updates(),
                vec![(
                    "0000111122223333444455556666777788889999".to_string(),
                    UpdateMode::Checked
                )]
            );
        }

        #[test]
        fn reports_missing_working_copy() {
            let dep = Dependency::with_backend("ghost", "main", Box::new(MockVcs::missing()));
            assert!(!dep.exists());
        }
    }
}
