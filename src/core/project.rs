//! core::project
//!
//! The host project and its dependency workflows.
//!
//! # Overview
//!
//! A [`Project`] owns the dependencies declared in the manifest and runs
//! every multi-dependency workflow: consistency gates, state capture to
//! the lock file, state application from it, and build-version
//! derivation. Commands never touch backends directly; they go through
//! the project so the gates cannot be skipped.
//!
//! # Ordering
//!
//! Updates apply in declaration order. The lock file is written sorted
//! case-insensitively by name so rewrites diff cleanly. Failure listings
//! name every offender, not just the first found.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::dependency::Dependency;
use crate::core::manifest::{self, ManifestError, SkippedDependency};
use crate::core::paths::ProjectPaths;
use crate::core::state::{self, DepState, RawState, StateStoreError};
use crate::vcs::{detect_backend, BackendError, Binaries, UpdateMode, VcsBackend};

/// Errors from project workflows.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("the following dependencies are not valid repositories:\n\t{}", .0.join("\n\t"))]
    MissingRepositories(Vec<String>),

    #[error("the following dependencies have uncommitted changes:\n\t{}", .0.join("\n\t"))]
    UncommittedChanges(Vec<String>),

    #[error("recorded states are not usable:\n\t{}", .0.join("\n\t"))]
    StateValidation(Vec<String>),

    #[error("no recorded state for dependency '{0}'")]
    MissingState(String),

    #[error("'{path}' is not a recognized repository (expected .git or .hg)")]
    NotARepository { path: PathBuf },

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Store(#[from] StateStoreError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Result of loading a project.
#[derive(Debug)]
pub struct ProjectLoadResult {
    /// The loaded project.
    pub project: Project,
    /// Manifest entries that failed validation and were left out.
    pub skipped: Vec<SkippedDependency>,
}

/// One dependency update that was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedUpdate {
    pub name: String,
    pub revision: String,
}

/// The derived build identifier for the host repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVersion {
    /// `{count}.{decimal}`, with a trailing `.1` when dirty.
    pub version: String,
    /// Whether the host or any dependency had uncommitted changes.
    pub dirty: bool,
}

/// A host project with declared dependencies.
#[derive(Debug)]
pub struct Project {
    paths: ProjectPaths,
    dependencies: Vec<Dependency>,
    binaries: Binaries,
    host: Option<Box<dyn VcsBackend>>,
}

impl Project {
    /// Load the project rooted at `root` from its manifest.
    ///
    /// Malformed manifest entries are skipped and reported, not fatal;
    /// a manifest that cannot be read or parsed at all is.
    pub fn load(root: &Path, binaries: &Binaries) -> Result<ProjectLoadResult, ProjectError> {
        let paths = ProjectPaths::new(root);
        let manifest = manifest::load(&paths.manifest())?;

        let dependencies = manifest
            .declarations
            .iter()
            .map(|entry| {
                let workdir = paths.dependency(&entry.declaration.path);
                Dependency::new(&entry.name, &entry.declaration, &workdir, binaries)
            })
            .collect();

        Ok(ProjectLoadResult {
            project: Project {
                paths,
                dependencies,
                binaries: binaries.clone(),
                host: None,
            },
            skipped: manifest.skipped,
        })
    }

    /// Construct a project around pre-built dependencies.
    ///
    /// Intended for tests; no manifest is read.
    pub fn from_dependencies(root: &Path, dependencies: Vec<Dependency>) -> Self {
        Self {
            paths: ProjectPaths::new(root),
            dependencies,
            binaries: Binaries::default(),
            host: None,
        }
    }

    /// Pin the host repository backend instead of detecting it from the
    /// root path. Intended for tests.
    pub fn set_host_backend(&mut self, backend: Box<dyn VcsBackend>) {
        self.host = Some(backend);
    }

    pub fn root(&self) -> &Path {
        self.paths.root()
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Dependencies in declaration order.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Dependencies sorted case-insensitively by name.
    pub fn sorted_dependencies(&self) -> Vec<&Dependency> {
        let mut sorted: Vec<&Dependency> = self.dependencies.iter().collect();
        sorted.sort_by_key(|dep| dep.name().to_lowercase());
        sorted
    }

    /// Dependencies whose working copy is absent or the wrong kind.
    pub fn missing_dependencies(&self) -> Vec<&Dependency> {
        self.dependencies.iter().filter(|dep| !dep.exists()).collect()
    }

    /// Dependencies with uncommitted changes.
    pub fn uncommitted_dependencies(&self) -> Result<Vec<&Dependency>, ProjectError> {
        let mut dirty = Vec::new();
        for dep in &self.dependencies {
            if dep.has_uncommitted_changes()? {
                dirty.push(dep);
            }
        }
        Ok(dirty)
    }

    /// Whether any dependency has uncommitted changes.
    pub fn has_uncommitted_dependencies(&self) -> Result<bool, ProjectError> {
        for dep in &self.dependencies {
            if dep.has_uncommitted_changes()? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Fetch remote history for every dependency, in declaration order.
    pub fn fetch_dependencies(&self) -> Result<(), ProjectError> {
        for dep in &self.dependencies {
            dep.fetch()?;
        }
        Ok(())
    }

    /// Gate: every declared working copy must exist.
    pub fn fail_if_missing_dependencies(&self) -> Result<(), ProjectError> {
        let missing = self.missing_dependencies();
        if missing.is_empty() {
            return Ok(());
        }
        Err(ProjectError::MissingRepositories(
            missing.iter().map(|dep| dep.name().to_string()).collect(),
        ))
    }

    /// Gate: every working copy must be clean.
    pub fn fail_if_uncommitted_dependencies(&self) -> Result<(), ProjectError> {
        let dirty = self.uncommitted_dependencies()?;
        if dirty.is_empty() {
            return Ok(());
        }
        Err(ProjectError::UncommittedChanges(
            dirty.iter().map(|dep| dep.name().to_string()).collect(),
        ))
    }

    /// Capture the current state of every dependency.
    ///
    /// Refuses outright if any working copy is dirty; a state captured
    /// over uncommitted changes would not be reproducible.
    pub fn states(&self) -> Result<HashMap<String, DepState>, ProjectError> {
        self.fail_if_uncommitted_dependencies()?;

        let mut states = HashMap::new();
        for dep in &self.dependencies {
            states.insert(dep.name().to_string(), dep.state()?);
        }
        Ok(states)
    }

    /// Capture all states and write the lock file.
    ///
    /// Nothing is written unless every capture succeeds. Returns the
    /// lock file path.
    pub fn record_states(&self) -> Result<PathBuf, ProjectError> {
        let states = self.states()?;
        let lock = self.paths.lock();

        let ordered: Vec<(&str, &DepState)> = self
            .sorted_dependencies()
            .into_iter()
            .filter_map(|dep| states.get(dep.name()).map(|state| (dep.name(), state)))
            .collect();

        state::write_states(&lock, ordered)?;
        Ok(lock)
    }

    /// Read the lock file and validate it against the declared
    /// dependencies.
    pub fn load_states(&self) -> Result<HashMap<String, DepState>, ProjectError> {
        let raw = state::read_states(&self.paths.lock())?;
        self.check_states(&raw)
    }

    /// Validate raw lock entries.
    ///
    /// Every declared dependency must have an entry with a revision.
    /// All defects are collected before failing; entries for unknown
    /// names are ignored.
    pub fn check_states(
        &self,
        raw: &HashMap<String, RawState>,
    ) -> Result<HashMap<String, DepState>, ProjectError> {
        let mut states = HashMap::new();
        let mut problems = Vec::new();

        for dep in &self.dependencies {
            match raw.get(dep.name()) {
                None => problems.push(format!("no entry for dependency '{}'", dep.name())),
                Some(entry) => match &entry.revision {
                    None => {
                        problems.push(format!("entry for '{}' has no revision", dep.name()));
                    }
                    Some(revision) => {
                        states.insert(
                            dep.name().to_string(),
                            DepState {
                                revision: revision.clone(),
                                date: entry.date.clone(),
                            },
                        );
                    }
                },
            }
        }

        if !problems.is_empty() {
            return Err(ProjectError::StateValidation(problems));
        }
        Ok(states)
    }

    /// Move every dependency to its recorded state, in declaration
    /// order.
    ///
    /// A dependency without an entry in `states` aborts the run;
    /// dependencies already visited stay where they were moved.
    pub fn update_dependencies(
        &self,
        states: &HashMap<String, DepState>,
        mode: UpdateMode,
    ) -> Result<Vec<AppliedUpdate>, ProjectError> {
        let mut applied = Vec::new();
        for dep in &self.dependencies {
            let state = states
                .get(dep.name())
                .ok_or_else(|| ProjectError::MissingState(dep.name().to_string()))?;
            dep.apply_state(state, mode)?;
            applied.push(AppliedUpdate {
                name: dep.name().to_string(),
                revision: state.revision.clone(),
            });
        }
        Ok(applied)
    }

    /// Derive the host repository's build version.
    ///
    /// The identifier comes from the host's own history; uncommitted
    /// changes anywhere (host or dependencies) append a `.1` marker so
    /// the version never silently describes an unreproducible build.
    pub fn build_version(&self) -> Result<BuildVersion, ProjectError> {
        let detected;
        let host: &dyn VcsBackend = match self.host.as_deref() {
            Some(backend) => backend,
            None => {
                detected = detect_backend(self.paths.root(), &self.binaries).ok_or_else(|| {
                    ProjectError::NotARepository {
                        path: self.paths.root().to_path_buf(),
                    }
                })?;
                detected.as_ref()
            }
        };

        let mut version = host.build_number_string()?;
        let dirty = host.has_uncommitted_changes()? || self.has_uncommitted_dependencies()?;
        if dirty {
            version.push_str(".1");
        }
        Ok(BuildVersion { version, dirty })
    }
}
