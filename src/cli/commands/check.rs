//! check command - Verify every dependency is committed

use anyhow::Result;

use crate::cli::Context;

/// Exit non-zero when any dependency has uncommitted changes.
///
/// The offender list goes to stdout, not to the error channel: the list
/// is the command's result, and scripts consume it via `--raw`.
pub fn check(ctx: &Context, raw: bool) -> Result<()> {
    let project = super::load_project(ctx)?;
    project.fail_if_missing_dependencies()?;

    let dirty = project.uncommitted_dependencies()?;
    if !dirty.is_empty() {
        let names: Vec<&str> = dirty.iter().map(|dep| dep.name()).collect();
        let joined = names.join(", ");
        if raw {
            println!("{}", joined);
        } else {
            println!(
                "Check failed. The following dependencies have uncommitted changes:\n\t{}",
                joined
            );
        }
        std::process::exit(1);
    }

    if !raw {
        println!("All dependencies are committed");
    }

    Ok(())
}
