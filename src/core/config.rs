//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Hitch has a single, user-level configuration scope. The only settings
//! today are the names (or absolute paths) of the version control
//! executables to invoke. Projects themselves are described by the
//! manifest, not by configuration.
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$HITCH_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/hitch/config.toml`
//! 3. `~/.hitch/config.toml`
//!
//! Missing config files are not an error; defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use hitch::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! let binaries = config.binaries();
//! println!("git is invoked as '{}'", binaries.git);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::vcs::Binaries;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// The `[binaries]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinariesConfig {
    /// Name or path of the git executable.
    pub git: Option<String>,
    /// Name or path of the mercurial executable.
    pub hg: Option<String>,
}

impl BinariesConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [("binaries.git", &self.git), ("binaries.hg", &self.hg)] {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidValue(format!(
                        "{key} must not be empty"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// User-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Version control executables.
    pub binaries: Option<BinariesConfig>,

    /// Path the config was loaded from (not part of the schema).
    #[serde(skip)]
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read,
    /// parsed, or validated. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        // 1. Check $HITCH_CONFIG
        if let Ok(path) = std::env::var("HITCH_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/hitch/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("hitch/config.toml");
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        // 3. Check ~/.hitch/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".hitch/config.toml");
            if path.exists() {
                return Self::load_file(&path);
            }
        }

        // No config found, use defaults
        Ok(Self::default())
    }

    /// Read, parse, and validate a specific config file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if let Some(ref binaries) = config.binaries {
            binaries.validate()?;
        }

        config.loaded_from = Some(path.to_path_buf());
        Ok(config)
    }

    /// The executables to invoke, with defaults applied.
    pub fn binaries(&self) -> Binaries {
        let defaults = Binaries::default();
        match &self.binaries {
            Some(section) => Binaries {
                git: section.git.clone().unwrap_or(defaults.git),
                hg: section.hg.clone().unwrap_or(defaults.hg),
            },
            None => defaults,
        }
    }

    /// Path of the loaded config file, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_nothing_configured() {
        let config = Config::default();
        let binaries = config.binaries();
        assert_eq!(binaries.git, "git");
        assert_eq!(binaries.hg, "hg");
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn load_file_overrides_binaries() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [binaries]
            git = "/opt/git/bin/git"
            "#,
        )
        .unwrap();

        let config = Config::load_file(&path).unwrap();
        let binaries = config.binaries();

        assert_eq!(binaries.git, "/opt/git/bin/git");
        assert_eq!(binaries.hg, "hg");
        assert_eq!(config.loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "unknown_field = true").unwrap();

        let result = Config::load_file(&path);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn empty_binary_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [binaries]
            hg = "  "
            "#,
        )
        .unwrap();

        let result = Config::load_file(&path);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn missing_file_is_an_error_for_explicit_loads() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");

        let result = Config::load_file(&path);
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
