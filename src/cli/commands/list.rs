//! list command - List declared dependencies

use anyhow::Result;

use crate::cli::Context;
use crate::ui::output;

/// List every dependency declared in the manifest.
pub fn list(ctx: &Context) -> Result<()> {
    let project = super::load_project(ctx)?;

    println!("Dependencies:");
    for dep in project.dependencies() {
        println!(
            "\t{}: path=\"{}\" type={} url=\"{}\"",
            output::dep_name(dep.name()),
            dep.declared_path(),
            dep.kind(),
            dep.url()
        );
    }

    Ok(())
}
