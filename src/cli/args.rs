//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hitch - Keep multi-repository projects on recorded dependency states
#[derive(Parser, Debug)]
#[command(name = "hitch")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Run as if hitch was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List declared dependencies
    #[command(
        name = "list",
        long_about = "List every dependency declared in hitch.toml.\n\n\
            Shows each dependency's name, working copy path, version control \
            system, and remote url, in declaration order. Malformed manifest \
            entries are reported as warnings and left out.",
        after_help = "\
WORKFLOW EXAMPLES:
    # See what the project depends on
    hitch list"
    )]
    List,

    /// Show working copy status for every dependency
    #[command(
        name = "status",
        long_about = "Show the working copy status of every dependency.\n\n\
            Reports whether each working copy is clean or carries uncommitted \
            changes, plus its current branch and revision. With --remote, every \
            dependency is fetched first and commits not yet pushed or pulled \
            are counted.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Quick local status
    hitch status

    # Include unpushed/unpulled commit counts (fetches every dependency)
    hitch status --remote"
    )]
    Status {
        /// Fetch first and report incoming/outgoing commit counts
        #[arg(short, long)]
        remote: bool,
    },

    /// Record dependency states into hitch.lock
    #[command(
        name = "record",
        long_about = "Capture the current revision of every dependency into \
            hitch.lock.\n\n\
            Recording refuses to run while any dependency has uncommitted \
            changes; a state captured over a dirty working copy would not be \
            reproducible. The previous lock file content is fully replaced.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Pin the current dependency revisions
    hitch record

    # Then share them with the team
    git add hitch.lock && git commit -m 'Bump dependency states'"
    )]
    Record,

    /// Move dependencies to their recorded states
    #[command(
        name = "update",
        long_about = "Move every dependency's working copy to the revision \
            recorded in hitch.lock.\n\n\
            Dependencies update in declaration order. Without --clean, \
            uncommitted changes anywhere abort the run before anything moves; \
            with --clean, local modifications are discarded.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Sync working copies to the lock file
    hitch update

    # Discard local modifications while syncing
    hitch update --clean"
    )]
    Update {
        /// Discard uncommitted changes instead of refusing to move
        #[arg(short, long)]
        clean: bool,
    },

    /// Verify every dependency is committed
    #[command(
        name = "check",
        long_about = "Verify that no dependency carries uncommitted changes.\n\n\
            Exits non-zero and lists the offenders otherwise, which makes it \
            usable as a pre-build or CI gate. With --raw the offenders are \
            printed as a bare comma-separated list for scripting.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Gate a release build on clean dependencies
    hitch check && make release

    # Feed offenders to a script
    hitch check --raw"
    )]
    Check {
        /// Print offender names only, comma-separated
        #[arg(short = '0', long)]
        raw: bool,
    },

    /// Compute the build version of the host repository
    #[command(
        name = "buildversion",
        long_about = "Compute a build version from the host repository's \
            history.\n\n\
            The version is a two part string <count>.<decimal>: the number of \
            commits leading to the current revision, which grows with every \
            commit along a line of history, and the decimal value of the \
            revision identifier's first three hex characters, enough of a \
            fingerprint to look the commit up in the log. Uncommitted changes \
            in the host repository or any dependency append a trailing .1 so \
            the version never silently describes an unreproducible build.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Human-readable form
    hitch buildversion

    # Bare value for build scripts
    VERSION=$(hitch buildversion --raw)"
    )]
    Buildversion {
        /// Print the bare version only
        #[arg(short = '0', long)]
        raw: bool,
    },

    /// Advance dependencies to their branch heads
    #[command(
        name = "advance",
        long_about = "Advance the named dependencies to the head of their \
            current branch.\n\n\
            Declared for workflow completeness; the operation itself is not \
            implemented yet and fails explicitly rather than pretending to \
            have advanced anything. Switching branches stays a manual step.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Advance one dependency
    hitch advance libalpha

    # Advance everything
    hitch advance --all"
    )]
    Advance {
        /// Dependencies to advance
        deps: Vec<String>,

        /// Advance all dependencies
        #[arg(short, long)]
        all: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for hitch \
            commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    hitch completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    hitch completion zsh >> ~/.zshrc

    # Fish
    hitch completion fish > ~/.config/fish/completions/hitch.fish

    # PowerShell
    hitch completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
