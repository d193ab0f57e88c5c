//! update command - Move dependencies to their recorded states

use anyhow::Result;

use crate::cli::Context;
use crate::ui::output;
use crate::vcs::UpdateMode;

/// Move every dependency to the revision recorded in the lock file.
///
/// Without `clean`, uncommitted changes anywhere abort before anything
/// moves. With `clean`, local modifications are discarded and the gate is
/// skipped; that is exactly what the flag is for.
pub fn update(ctx: &Context, clean: bool) -> Result<()> {
    let project = super::load_project(ctx)?;
    project.fail_if_missing_dependencies()?;

    let mode = if clean {
        UpdateMode::Clean
    } else {
        project.fail_if_uncommitted_dependencies()?;
        UpdateMode::Checked
    };

    let states = project.load_states()?;
    let applied = project.update_dependencies(&states, mode)?;

    for update in &applied {
        output::print(
            format!(
                "{} updated to {}",
                output::dep_name(&update.name),
                output::revision(&update.revision)
            ),
            ctx.verbosity(),
        );
    }

    Ok(())
}
