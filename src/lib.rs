//! Hitch - Keep multi-repository projects on recorded dependency states
//!
//! Hitch coordinates a host project whose dependencies live in sibling
//! git or mercurial working copies. It records the exact revision of
//! every dependency into a lock file, moves working copies back to those
//! recorded states, gates builds on everything being committed, and
//! derives a reproducible build version from the host repository.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to core)
//! - [`core`] - Manifest, dependencies, lock file, and project workflows
//! - [`vcs`] - Version-control backends behind one trait
//! - [`ui`] - Output formatting utilities
//!
//! # Correctness Invariants
//!
//! Hitch maintains the following invariants:
//!
//! 1. States are never recorded over uncommitted changes
//! 2. The lock file is replaced atomically or not at all
//! 3. An incomplete lock file is rejected wholesale, never half-applied
//! 4. Failures name every offending dependency, not just the first

pub mod cli;
pub mod core;
pub mod ui;
pub mod vcs;
