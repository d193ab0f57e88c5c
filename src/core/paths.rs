//! core::paths
//!
//! Well-known file locations inside a host project.
//!
//! Both documents live at the project root: the manifest declares the
//! dependencies, the lock file records their captured states. No code
//! outside this module should spell those file names.

use std::path::{Path, PathBuf};

/// File declaring the project's dependencies.
pub const MANIFEST_FILE: &str = "hitch.toml";

/// File recording the captured dependency states.
pub const LOCK_FILE: &str = "hitch.lock";

/// Path routing for one host project.
///
/// # Example
///
/// ```
/// use hitch::core::paths::ProjectPaths;
/// use std::path::{Path, PathBuf};
///
/// let paths = ProjectPaths::new(Path::new("/work/app"));
/// assert_eq!(paths.manifest(), PathBuf::from("/work/app/hitch.toml"));
/// assert_eq!(paths.lock(), PathBuf::from("/work/app/hitch.lock"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    /// Route paths under the given project root.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the dependency manifest.
    pub fn manifest(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Location of the recorded-state lock file.
    pub fn lock(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    /// Absolute location of a dependency declared with a relative path.
    pub fn dependency(&self, declared_path: &str) -> PathBuf {
        self.root.join(declared_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_under_root() {
        let paths = ProjectPaths::new(Path::new("/work/app"));
        assert_eq!(paths.root(), Path::new("/work/app"));
        assert_eq!(
            paths.dependency("vendor/lib"),
            PathBuf::from("/work/app/vendor/lib")
        );
    }
}
