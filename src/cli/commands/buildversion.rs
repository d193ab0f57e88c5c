//! buildversion command - Derive the build version from the host repository

use anyhow::Result;

use crate::cli::Context;
use crate::ui::output;

/// Print the host repository's build version.
pub fn buildversion(ctx: &Context, raw: bool) -> Result<()> {
    let project = super::load_project(ctx)?;
    project.fail_if_missing_dependencies()?;

    let build = project.build_version()?;

    if raw {
        println!("{}", build.version);
    } else if build.dirty {
        println!(
            "Build Version: {} (uncommitted changes)",
            output::notice(&build.version)
        );
    } else {
        println!("Build Version: {}", output::good(&build.version));
    }

    Ok(())
}
