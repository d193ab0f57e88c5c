//! status command - Working copy status for every dependency

use std::io::Write;

use anyhow::Result;

use crate::cli::Context;
use crate::ui::output;

/// Show each dependency's cleanliness, branch, and revision.
///
/// With `remote`, every dependency is fetched first (names stream as each
/// fetch completes) and pending push/pull counts are shown next to the
/// status.
pub fn status(ctx: &Context, remote: bool) -> Result<()> {
    let project = super::load_project(ctx)?;
    project.fail_if_missing_dependencies()?;

    if remote {
        if ctx.quiet {
            project.fetch_dependencies()?;
        } else {
            let mut stdout = std::io::stdout();
            write!(stdout, "Fetching ")?;
            for dep in project.dependencies() {
                dep.fetch()?;
                write!(stdout, "{} ", dep.name())?;
                stdout.flush()?;
            }
            writeln!(stdout)?;
        }
    }

    for dep in project.dependencies() {
        let uncommitted = dep.has_uncommitted_changes()?;

        let mut remote_status = String::new();
        if remote {
            let changes = dep.remote_changes()?;
            if changes.outgoing > 0 || changes.incoming > 0 {
                remote_status = format!(
                    " {}{} {}{}",
                    changes.outgoing,
                    output::accent("↑"),
                    changes.incoming,
                    output::accent("↓")
                );
            }
        }

        let state = if uncommitted {
            output::problem("uncommitted")
        } else {
            output::good("clean")
        };

        println!(
            "{} (at {}/, type={}):",
            output::dep_name(dep.name()),
            dep.declared_path(),
            dep.kind()
        );
        println!("\tstatus: {}{}", state, remote_status);
        println!(
            "\tcurrent branch: {}",
            output::branch_name(&dep.current_branch()?)
        );
        println!("\trevision: {}", output::revision(&dep.revision()?));
    }

    Ok(())
}
