//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads the user configuration and the project
//! 2. Runs the consistency gates its operation requires
//! 3. Calls into [`crate::core::project`] and formats the output
//!
//! Handlers do NOT talk to version control backends directly.

mod advance;
mod buildversion;
mod check;
mod completion;
mod list;
mod record;
mod status;
mod update;

// Re-export command functions for testing and direct invocation
pub use advance::advance;
pub use buildversion::buildversion;
pub use check::check;
pub use completion::completion;
pub use list::list;
pub use record::record;
pub use status::status;
pub use update::update;

use anyhow::{Context as _, Result};

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::project::Project;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::List => list(ctx),
        Command::Status { remote } => status(ctx, remote),
        Command::Record => record(ctx),
        Command::Update { clean } => update(ctx, clean),
        Command::Check { raw } => check(ctx, raw),
        Command::Buildversion { raw } => buildversion(ctx, raw),
        Command::Advance { deps, all } => advance(ctx, &deps, all),
        Command::Completion { shell } => completion(shell),
    }
}

/// Load the user configuration and the project at the context's working
/// directory, warning about any skipped manifest entries.
fn load_project(ctx: &Context) -> Result<Project> {
    let config = Config::load().context("failed to load configuration")?;
    if let Some(path) = config.loaded_from() {
        output::debug(
            format!("config loaded from {}", path.display()),
            ctx.verbosity(),
        );
    }

    let root = ctx.working_dir()?;
    let loaded = Project::load(&root, &config.binaries()).context("failed to load project")?;

    for skip in &loaded.skipped {
        output::warn(
            format!("skipping dependency '{}': {}", skip.name, skip.reason),
            ctx.verbosity(),
        );
    }

    Ok(loaded.project)
}
