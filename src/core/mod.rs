//! core
//!
//! Core domain types and workflows for Hitch.
//!
//! # Modules
//!
//! - [`config`] - User configuration schema and loading
//! - [`dependency`] - Declared dependencies bound to VCS backends
//! - [`manifest`] - Loading and validating `hitch.toml`
//! - [`paths`] - Well-known file locations inside a host project
//! - [`project`] - The host project and its dependency workflows
//! - [`state`] - Reading and writing `hitch.lock`
//!
//! # Design Principles
//!
//! - Validation is exhaustive: failures name every offender at once
//! - Invalid declarations never become dependencies
//! - The lock file is written atomically or not at all

pub mod config;
pub mod dependency;
pub mod manifest;
pub mod paths;
pub mod project;
pub mod state;
