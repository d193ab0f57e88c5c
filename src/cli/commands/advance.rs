//! advance command - Advance dependencies to their branch heads

use anyhow::{bail, Result};

use crate::cli::Context;

/// Advance the named dependencies to the head of their current branch.
///
/// The operation is declared but not built yet; arguments are validated
/// so callers learn about typos before learning about the gap.
pub fn advance(ctx: &Context, deps: &[String], all: bool) -> Result<()> {
    let project = super::load_project(ctx)?;
    project.fail_if_missing_dependencies()?;

    if !all && deps.is_empty() {
        bail!("name at least one dependency to advance, or pass --all");
    }
    for name in deps {
        if !project.dependencies().iter().any(|dep| dep.name() == name) {
            bail!("unknown dependency '{}'", name);
        }
    }

    bail!("advancing dependencies is not implemented yet; move the branches manually and run 'hitch record'");
}
