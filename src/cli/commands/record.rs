//! record command - Capture dependency states into the lock file

use anyhow::Result;

use crate::cli::Context;
use crate::core::paths::LOCK_FILE;
use crate::ui::output;

/// Record the current state of every dependency.
pub fn record(ctx: &Context) -> Result<()> {
    let project = super::load_project(ctx)?;
    project.fail_if_missing_dependencies()?;

    project.record_states()?;

    let count = project.dependencies().len();
    let noun = if count == 1 {
        "dependency"
    } else {
        "dependencies"
    };
    output::print(
        format!("Recorded {} {} to {}", count, noun, LOCK_FILE),
        ctx.verbosity(),
    );

    Ok(())
}
